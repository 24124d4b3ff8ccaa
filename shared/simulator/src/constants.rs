use crate::collision::Obstacle;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Ballistic and aiming properties of one weapon type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponProperties {
    pub name: String,
    /// Shots per second.
    pub rounds_per_second: f64,
    pub projectile_speed: f64,
    pub projectile_damage: f64,
    /// Seconds a projectile stays in flight.
    pub projectile_life_time: f64,
    /// Seconds to charge aim from 0 to 1.
    pub aim_time: f64,
    /// Movement speed multiplier at full aim.
    pub aim_movement_speed_modifier: f64,
    /// Rotation speed multiplier at full aim.
    pub aim_rotation_speed_modifier: f64,
    #[serde(default)]
    pub max_inventory_ammo: i32,
}

/// Read-only physical rules shared by every simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constants {
    pub ticks_per_second: f64,
    pub unit_radius: f64,
    pub unit_health: f64,
    pub max_shield: f64,
    pub max_unit_forward_speed: f64,
    pub max_unit_backward_speed: f64,
    /// Maximum change of velocity per second.
    pub unit_acceleration: f64,
    /// Radians per second with no aim applied.
    pub rotation_speed: f64,
    /// Damage applied every tick a unit spends outside the zone.
    pub zone_damage_per_tick: i32,
    pub weapons: Vec<WeaponProperties>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Constants {
    pub fn from_json(json: &str) -> anyhow::Result<Constants> {
        let constants: Constants =
            serde_json::from_str(json).context("Failed to parse constants")?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ticks_per_second <= 0.0 {
            bail!("ticksPerSecond must be positive, got {}", self.ticks_per_second);
        }
        if self.unit_radius <= 0.0 {
            bail!("unitRadius must be positive, got {}", self.unit_radius);
        }
        if self.max_unit_forward_speed < 0.0 || self.max_unit_backward_speed < 0.0 {
            bail!(
                "Unit speeds must not be negative, got forward {} backward {}",
                self.max_unit_forward_speed,
                self.max_unit_backward_speed
            );
        }
        if self.unit_acceleration < 0.0 {
            bail!("unitAcceleration must not be negative, got {}", self.unit_acceleration);
        }
        if self.rotation_speed < 0.0 {
            bail!("rotationSpeed must not be negative, got {}", self.rotation_speed);
        }
        for (index, weapon) in self.weapons.iter().enumerate() {
            weapon
                .validate()
                .with_context(|| format!("Invalid weapon {} ({:?})", index, weapon.name))?;
        }
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if obstacle.radius < 0.0 {
                bail!("Obstacle {} has negative radius {}", index, obstacle.radius);
            }
        }
        Ok(())
    }

    /// Length of one tick in seconds.
    pub fn tick_length(&self) -> f64 {
        1.0 / self.ticks_per_second
    }

    pub fn weapon(&self, index: usize) -> Option<&WeaponProperties> {
        self.weapons.get(index)
    }
}

impl WeaponProperties {
    fn validate(&self) -> anyhow::Result<()> {
        if self.aim_time <= 0.0 {
            bail!("aimTime must be positive, got {}", self.aim_time);
        }
        if self.projectile_speed <= 0.0 {
            bail!("projectileSpeed must be positive, got {}", self.projectile_speed);
        }
        if self.rounds_per_second <= 0.0 {
            bail!("roundsPerSecond must be positive, got {}", self.rounds_per_second);
        }
        for (name, modifier) in [
            ("aimMovementSpeedModifier", self.aim_movement_speed_modifier),
            ("aimRotationSpeedModifier", self.aim_rotation_speed_modifier),
        ] {
            if !(0.0..=1.0).contains(&modifier) {
                bail!("{} must be within [0, 1], got {}", name, modifier);
            }
        }
        Ok(())
    }
}

pub fn magic_wand() -> WeaponProperties {
    WeaponProperties {
        name: "Magic wand".to_string(),
        rounds_per_second: 2.0,
        projectile_speed: 30.0,
        projectile_damage: 15.0,
        projectile_life_time: 1.0,
        aim_time: 0.1,
        aim_movement_speed_modifier: 1.0,
        aim_rotation_speed_modifier: 1.0,
        max_inventory_ammo: 1000,
    }
}

pub fn staff() -> WeaponProperties {
    WeaponProperties {
        name: "Staff".to_string(),
        rounds_per_second: 4.0,
        projectile_speed: 40.0,
        projectile_damage: 20.0,
        projectile_life_time: 0.75,
        aim_time: 0.5,
        aim_movement_speed_modifier: 0.5,
        aim_rotation_speed_modifier: 0.5,
        max_inventory_ammo: 200,
    }
}

pub fn bow() -> WeaponProperties {
    WeaponProperties {
        name: "Bow".to_string(),
        rounds_per_second: 1.0,
        projectile_speed: 60.0,
        projectile_damage: 50.0,
        projectile_life_time: 1.0,
        aim_time: 1.0,
        aim_movement_speed_modifier: 0.25,
        aim_rotation_speed_modifier: 0.25,
        max_inventory_ammo: 30,
    }
}

impl Default for Constants {
    fn default() -> Constants {
        Constants {
            ticks_per_second: 30.0,
            unit_radius: 1.0,
            unit_health: 100.0,
            max_shield: 100.0,
            max_unit_forward_speed: 10.0,
            max_unit_backward_speed: 5.0,
            unit_acceleration: 30.0,
            rotation_speed: PI,
            zone_damage_per_tick: 1,
            weapons: vec![magic_wand(), staff(), bow()],
            obstacles: vec![],
        }
    }
}
