use crate::constants::{Constants, WeaponProperties};
use crate::vec::{vec2, Vec2Extras};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A controlled unit as seen at the start of a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i32,
    pub player_id: i32,
    pub health: f64,
    pub shield: f64,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Facing, a unit vector.
    pub direction: Vector2<f64>,
    /// Aim charge in [0, 1].
    pub aim: f64,
    pub radius: f64,
    pub weapon: Option<usize>,
    pub next_shot_tick: i32,
    /// Ammo per weapon type.
    pub ammo: Vec<i32>,
    pub shield_potions: i32,
}

impl Unit {
    /// A unit at rest facing +x with full health and no weapon.
    pub fn new(id: i32, position: Vector2<f64>, constants: &Constants) -> Unit {
        Unit {
            id,
            player_id: 0,
            health: constants.unit_health,
            shield: 0.0,
            position,
            velocity: Vector2::zeros(),
            direction: vec2(1.0, 0.0),
            aim: 0.0,
            radius: constants.unit_radius,
            weapon: None,
            next_shot_tick: 0,
            ammo: vec![0; constants.weapons.len()],
            shield_potions: 0,
        }
    }

    pub fn equipped_weapon<'a>(&self, constants: &'a Constants) -> Option<&'a WeaponProperties> {
        self.weapon.and_then(|index| constants.weapon(index))
    }

    pub fn has_ammo(&self) -> bool {
        self.weapon
            .and_then(|index| self.ammo.get(index))
            .map_or(false, |&ammo| ammo > 0)
    }

    /// Maximum forward and backward speeds after the aim penalty.
    pub fn max_speeds(&self, constants: &Constants) -> (f64, f64) {
        let factor = match self.equipped_weapon(constants) {
            Some(weapon) => 1.0 - (1.0 - weapon.aim_movement_speed_modifier) * self.aim,
            None => 1.0,
        };
        (
            constants.max_unit_forward_speed * factor,
            constants.max_unit_backward_speed * factor,
        )
    }

    /// The circle of reachable velocities: its center (relative to the unit,
    /// on the facing axis) and its radius.
    pub fn speed_circle(&self, constants: &Constants) -> (Vector2<f64>, f64) {
        let (forward, backward) = self.max_speeds(constants);
        let center = self.direction.safe_normalize() * ((forward - backward) / 2.0);
        (center, (forward + backward) / 2.0)
    }

    /// Fastest velocity the unit can hold along `direction`.
    ///
    /// The reachable velocities form a circle shifted forward along the
    /// facing axis, so the answer is the length of the chord from the unit to
    /// that circle in the requested direction. A zero direction has no chord
    /// and yields zero.
    pub fn envelope_velocity(&self, constants: &Constants, direction: Vector2<f64>) -> Vector2<f64> {
        if direction.is_degenerate() {
            return Vector2::zeros();
        }
        let direction = direction.normalize();
        let (forward, backward) = self.max_speeds(constants);
        let offset = (forward - backward) / 2.0;
        let radius = (forward + backward) / 2.0;

        let facing = self.direction.safe_normalize();
        let cos = facing.dot(&direction).clamp(-1.0, 1.0);
        let sin = facing.perp(&direction).clamp(-1.0, 1.0);
        let length = offset * cos + (radius * radius - offset * offset * sin * sin).max(0.0).sqrt();
        direction * length.max(0.0)
    }

    /// Rotation speed in radians per second at the current aim.
    pub fn rotation_speed(&self, constants: &Constants) -> f64 {
        let modifier = self
            .equipped_weapon(constants)
            .map_or(1.0, |weapon| weapon.aim_rotation_speed_modifier);
        let base = constants.rotation_speed;
        base + (base * modifier - base) * self.aim
    }

    pub fn is_fully_aimed(&self) -> bool {
        (1.0 - self.aim).abs() < 1e-6
    }
}
