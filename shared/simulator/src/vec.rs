use nalgebra::{vector, UnitComplex, Vector2};
use std::f64::consts::{PI, TAU};

/// Squared lengths below this are treated as the zero vector.
pub const EPSILON: f64 = 1e-8;

/// Returns a vector with the given coordinates.
pub fn vec2(x: f64, y: f64) -> Vector2<f64> {
    vector![x, y]
}

/// Extra methods for `Vector2<f64>`.
pub trait Vec2Extras {
    /// Returns a unit vector with the same direction, or the vector itself
    /// when it is too short to have one.
    fn safe_normalize(self) -> Vector2<f64>;

    /// Returns true if the vector is too short to carry a direction.
    fn is_degenerate(self) -> bool;

    /// Returns the distance to `other`.
    fn distance_to(self, other: Vector2<f64>) -> f64;

    /// Returns the squared distance to `other`.
    fn distance_squared_to(self, other: Vector2<f64>) -> f64;

    /// Returns the angle of the vector in radians, in [0, 2π).
    fn heading(self) -> f64;

    /// Returns this vector rotated counterclockwise by `angle` radians.
    fn rotated(self, angle: f64) -> Vector2<f64>;

    /// Returns this vector rotated counterclockwise by 90 degrees.
    fn perpendicular(self) -> Vector2<f64>;

    /// Returns the signed angle in (-π, π] that rotates `self` onto `other`.
    fn signed_angle_to(self, other: Vector2<f64>) -> f64;
}

impl Vec2Extras for Vector2<f64> {
    fn safe_normalize(self) -> Vector2<f64> {
        if self.is_degenerate() {
            self
        } else {
            self.normalize()
        }
    }

    fn is_degenerate(self) -> bool {
        self.norm_squared() < EPSILON
    }

    fn distance_to(self, other: Vector2<f64>) -> f64 {
        (self - other).norm()
    }

    fn distance_squared_to(self, other: Vector2<f64>) -> f64 {
        (self - other).norm_squared()
    }

    fn heading(self) -> f64 {
        self.y.atan2(self.x).rem_euclid(TAU)
    }

    fn rotated(self, angle: f64) -> Vector2<f64> {
        UnitComplex::new(angle).transform_vector(&self)
    }

    fn perpendicular(self) -> Vector2<f64> {
        vector![-self.y, self.x]
    }

    fn signed_angle_to(self, other: Vector2<f64>) -> f64 {
        let angle = self.perp(&other).atan2(self.dot(&other));
        if angle <= -PI {
            angle + TAU
        } else {
            angle
        }
    }
}

/// A half-line starting at `origin` and heading along `dir`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vector2<f64>,
    pub dir: Vector2<f64>,
}

impl Ray {
    pub fn new(origin: Vector2<f64>, dir: Vector2<f64>) -> Ray {
        Ray {
            origin,
            dir: dir.safe_normalize(),
        }
    }

    /// Squared distance from `point` to the closest point on the ray.
    /// Points behind the origin measure to the origin itself.
    pub fn distance_squared_to_point(&self, point: Vector2<f64>) -> f64 {
        let along = (point - self.origin).dot(&self.dir);
        if along < 0.0 {
            return self.origin.distance_squared_to(point);
        }
        (self.origin + self.dir * along).distance_squared_to(point)
    }

    pub fn distance_to_point(&self, point: Vector2<f64>) -> f64 {
        self.distance_squared_to_point(point).sqrt()
    }

    pub fn intersects_circle(&self, center: Vector2<f64>, radius: f64) -> bool {
        self.distance_squared_to_point(center) <= radius * radius
    }
}
