use crate::vec::{Vec2Extras, EPSILON};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Successive obstacle contacts resolved for one unit within a single tick.
pub const MAX_SLIDE_ITERATIONS: usize = 4;

/// A static circular obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ObstacleRecord", into = "ObstacleRecord")]
pub struct Obstacle {
    pub id: i32,
    pub position: Vector2<f64>,
    pub radius: f64,
    pub radius_squared: f64,
    pub can_see_through: bool,
    /// Projectiles and units pass through when set.
    pub can_shoot_through: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObstacleRecord {
    #[serde(default)]
    id: i32,
    position: Vector2<f64>,
    radius: f64,
    #[serde(default)]
    can_see_through: bool,
    #[serde(default)]
    can_shoot_through: bool,
}

impl From<ObstacleRecord> for Obstacle {
    fn from(record: ObstacleRecord) -> Obstacle {
        Obstacle {
            can_see_through: record.can_see_through,
            can_shoot_through: record.can_shoot_through,
            ..Obstacle::new(record.id, record.position, record.radius)
        }
    }
}

impl From<Obstacle> for ObstacleRecord {
    fn from(obstacle: Obstacle) -> ObstacleRecord {
        ObstacleRecord {
            id: obstacle.id,
            position: obstacle.position,
            radius: obstacle.radius,
            can_see_through: obstacle.can_see_through,
            can_shoot_through: obstacle.can_shoot_through,
        }
    }
}

impl Obstacle {
    pub fn new(id: i32, position: Vector2<f64>, radius: f64) -> Obstacle {
        Obstacle {
            id,
            position,
            radius,
            radius_squared: radius * radius,
            can_see_through: false,
            can_shoot_through: false,
        }
    }

    /// Whether projectiles and units interact with this obstacle.
    pub fn is_solid(&self) -> bool {
        !self.can_shoot_through
    }
}

/// Earliest time in `[0, max_time]` at which a point at `position` moving
/// with `velocity` comes within `radius` of the origin.
///
/// Both arguments are relative to the target circle. A point that already
/// lies inside the circle hits at time zero. A near-zero relative velocity
/// never produces a hit.
pub fn time_of_impact(
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    radius: f64,
    max_time: f64,
) -> Option<f64> {
    let a = velocity.norm_squared();
    if a < EPSILON || max_time < 0.0 {
        return None;
    }
    let c = position.norm_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = 2.0 * position.dot(&velocity);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    // With c > 0 both roots share a sign, so a negative near root means the
    // circle is behind us.
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t < 0.0 || t > max_time {
        return None;
    }
    Some(t)
}

/// Where a moving circle first touches an obstacle.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub time: f64,
    pub obstacle: usize,
}

/// Finds the nearest obstacle contact for a circle of `radius` moving from
/// `position` with `velocity` within `max_time` seconds.
///
/// An overlapping obstacle only counts when the circle is moving further
/// into it.
pub fn nearest_contact(
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    radius: f64,
    obstacles: &[Obstacle],
    max_time: f64,
    skip: Option<usize>,
) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    for (index, obstacle) in obstacles.iter().enumerate() {
        if !obstacle.is_solid() || skip == Some(index) {
            continue;
        }
        let relative = position - obstacle.position;
        let combined = obstacle.radius + radius;
        if relative.norm_squared() <= combined * combined && relative.dot(&velocity) >= 0.0 {
            continue;
        }
        if let Some(time) = time_of_impact(relative, velocity, combined, max_time) {
            if best.map_or(true, |b| time < b.time) {
                best = Some(Contact {
                    time,
                    obstacle: index,
                });
            }
        }
    }
    best
}

/// Moves a circle for `dt` seconds, sliding along any obstacles it runs into.
///
/// On contact the circle travels up to the obstacle, its velocity is replaced
/// by the component along the contact tangent, and it continues for the rest
/// of the tick. Returns the number of contacts.
pub fn slide(
    position: &mut Vector2<f64>,
    velocity: &mut Vector2<f64>,
    radius: f64,
    obstacles: &[Obstacle],
    dt: f64,
) -> usize {
    let mut remaining = dt;
    let mut last = None;
    for contacts in 0..MAX_SLIDE_ITERATIONS {
        let contact = match nearest_contact(*position, *velocity, radius, obstacles, remaining, last)
        {
            Some(contact) => contact,
            None => {
                *position += *velocity * remaining;
                return contacts;
            }
        };

        let obstacle = &obstacles[contact.obstacle];
        *position += *velocity * contact.time;
        remaining -= contact.time;
        last = Some(contact.obstacle);

        let offset = *position - obstacle.position;
        if offset.is_degenerate() {
            *velocity = Vector2::zeros();
            return contacts + 1;
        }
        let normal = offset.normalize();
        let combined = obstacle.radius + radius;
        if offset.norm() < combined {
            *position = obstacle.position + normal * combined;
        }
        let tangent = normal.perpendicular();
        *velocity = tangent * velocity.dot(&tangent);
    }
    MAX_SLIDE_ITERATIONS
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vec::vec2;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_time_of_impact() {
        let t = time_of_impact(vec2(10.0, 0.0), vec2(-5.0, 0.0), 1.0, 3.0).unwrap();
        assert_abs_diff_eq!(t, 1.8, epsilon = 1e-12);

        assert!(time_of_impact(vec2(10.0, 0.0), vec2(-5.0, 0.0), 1.0, 1.0).is_none());
        assert!(time_of_impact(vec2(10.0, 0.0), vec2(5.0, 0.0), 1.0, 10.0).is_none());
        assert!(time_of_impact(vec2(10.0, 5.0), vec2(-5.0, 0.0), 1.0, 10.0).is_none());
        assert!(time_of_impact(vec2(10.0, 0.0), vec2(0.0, 0.0), 1.0, 10.0).is_none());
        assert_eq!(
            time_of_impact(vec2(0.5, 0.0), vec2(1.0, 0.0), 1.0, 1.0),
            Some(0.0)
        );
    }

    #[test]
    fn test_slide_stays_outside() {
        let obstacles = vec![Obstacle::new(0, vec2(3.0, 0.2), 1.0)];
        let mut position = vec2(0.0, 0.0);
        let mut velocity = vec2(30.0, 0.0);
        let contacts = slide(&mut position, &mut velocity, 1.0, &obstacles, 1.0 / 30.0 * 3.0);
        assert_eq!(contacts, 1);
        assert!(position.distance_to(obstacles[0].position) >= 2.0 - 1e-9);
        assert!(velocity.norm() < 30.0);
        assert!(velocity.x > 0.0);
        assert!(velocity.y < 0.0);
    }

    #[test]
    fn test_slide_ignores_shoot_through() {
        let mut obstacle = Obstacle::new(0, vec2(1.0, 0.0), 1.0);
        obstacle.can_shoot_through = true;
        let mut position = vec2(0.0, 0.0);
        let mut velocity = vec2(3.0, 0.0);
        assert_eq!(slide(&mut position, &mut velocity, 1.0, &[obstacle], 1.0), 0);
        assert_abs_diff_eq!(position, vec2(3.0, 0.0));
    }
}
