use crate::vec::Vec2Extras;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// The shrinking safe area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub current_center: Vector2<f64>,
    pub current_radius: f64,
    pub next_center: Vector2<f64>,
    pub next_radius: f64,
}

impl Zone {
    /// A zone that stays put.
    pub fn fixed(center: Vector2<f64>, radius: f64) -> Zone {
        Zone {
            current_center: center,
            current_radius: radius,
            next_center: center,
            next_radius: radius,
        }
    }

    /// Whether any part of a circle at `position` lies outside the current zone.
    pub fn is_outside(&self, position: Vector2<f64>, radius: f64) -> bool {
        position.distance_to(self.current_center) + radius > self.current_radius
    }
}
