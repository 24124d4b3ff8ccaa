use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// The single action a unit performs alongside its movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOrder {
    /// Raise the equipped weapon; `shoot` commits to firing once aimed.
    Aim { shoot: bool },
    UseShieldPotion,
    Pickup { loot: i32 },
}

/// A candidate command for one unit, held fixed over a lookahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOrder {
    pub target_velocity: Vector2<f64>,
    pub target_direction: Vector2<f64>,
    pub action: Option<ActionOrder>,
}

impl UnitOrder {
    pub fn new(
        target_velocity: Vector2<f64>,
        target_direction: Vector2<f64>,
        action: Option<ActionOrder>,
    ) -> UnitOrder {
        UnitOrder {
            target_velocity,
            target_direction,
            action,
        }
    }

    pub fn is_aiming(&self) -> bool {
        match self.action {
            Some(ActionOrder::Aim { .. }) => true,
            Some(ActionOrder::UseShieldPotion) | Some(ActionOrder::Pickup { .. }) | None => false,
        }
    }

    pub fn commits_to_fire(&self) -> bool {
        match self.action {
            Some(ActionOrder::Aim { shoot }) => shoot,
            Some(ActionOrder::UseShieldPotion) | Some(ActionOrder::Pickup { .. }) | None => false,
        }
    }
}
