use crate::bullet::{Flight, Projectile, Target};
use crate::collision::{self, Obstacle};
use crate::constants::Constants;
use crate::order::UnitOrder;
use crate::unit::Unit;
use crate::vec::Vec2Extras;
use crate::zone::Zone;
use instant::Instant;
use nalgebra::Vector2;

/// Ticks simulated per candidate order.
pub const HORIZON_TICKS: i32 = 30;

/// Scratch state owned by a single lookahead run.
#[derive(Debug, Clone)]
pub struct TickState {
    pub unit: Unit,
    pub tick: i32,
}

impl TickState {
    pub fn new(unit: Unit, tick: i32) -> TickState {
        TickState { unit, tick }
    }
}

/// Damage predicted for each candidate order, in input order.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub damages: Vec<i32>,
    /// Index of the least damaging order; the earliest wins ties.
    pub best: Option<usize>,
}

/// Predicts the outcome of unit orders by stepping a private copy of the
/// world forward.
pub struct Simulator {
    constants: Constants,
    horizon: i32,
}

impl Simulator {
    pub fn new(constants: Constants) -> Simulator {
        log::info!(
            "simulator: {} ticks/s, {} weapons, {} obstacles",
            constants.ticks_per_second,
            constants.weapons.len(),
            constants.obstacles.len()
        );
        Simulator {
            constants,
            horizon: HORIZON_TICKS,
        }
    }

    pub fn with_horizon(mut self, horizon: i32) -> Simulator {
        self.horizon = horizon;
        self
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn horizon(&self) -> i32 {
        self.horizon
    }

    /// Total damage `unit` takes over the horizon while following `order`.
    ///
    /// `bullets` are advanced in place, so each call needs its own copy.
    pub fn evaluate(
        &self,
        unit: &Unit,
        order: &UnitOrder,
        bullets: &mut [Projectile],
        obstacles: &[Obstacle],
        zone: &Zone,
        start_tick: i32,
    ) -> i32 {
        let mut state = TickState::new(unit.clone(), start_tick);
        let mut damage = 0;
        for _ in 0..self.horizon {
            damage += self.step(&mut state, order, bullets, obstacles, zone);
        }
        log::trace!(
            "unit {} order {:?}: {} damage over {} ticks",
            unit.id,
            order,
            damage,
            self.horizon
        );
        damage
    }

    /// Evaluates every order against its own fresh copy of `bullets`.
    pub fn rank_orders(
        &self,
        unit: &Unit,
        orders: &[UnitOrder],
        bullets: &[Projectile],
        obstacles: &[Obstacle],
        zone: &Zone,
        start_tick: i32,
    ) -> Ranking {
        let start_time = Instant::now();
        let mut scratch = bullets.to_vec();
        let mut damages = Vec::with_capacity(orders.len());
        for order in orders {
            for (copy, pristine) in scratch.iter_mut().zip(bullets) {
                copy.reset(pristine);
            }
            damages.push(self.evaluate(unit, order, &mut scratch, obstacles, zone, start_tick));
        }

        let best = damages
            .iter()
            .enumerate()
            .min_by_key(|(_, damage)| **damage)
            .map(|(index, _)| index);
        log::debug!(
            "unit {}: ranked {} orders against {} bullets in {:.3}ms, best {:?}",
            unit.id,
            orders.len(),
            bullets.len(),
            start_time.elapsed().as_secs_f64() * 1e3,
            best.map(|index| damages[index])
        );
        Ranking { damages, best }
    }

    /// Advances the world by one tick and returns the damage the unit took.
    pub fn step(
        &self,
        state: &mut TickState,
        order: &UnitOrder,
        bullets: &mut [Projectile],
        obstacles: &[Obstacle],
        zone: &Zone,
    ) -> i32 {
        let constants = &self.constants;
        let dt = constants.tick_length();
        let unit = &mut state.unit;
        let weapon = unit.equipped_weapon(constants);
        let mut damage = 0;

        // Aim.
        unit.aim = match weapon {
            Some(weapon) => {
                let delta = dt / weapon.aim_time;
                if order.is_aiming() {
                    (unit.aim + delta).clamp(0.0, 1.0)
                } else {
                    (unit.aim - delta).clamp(0.0, 1.0)
                }
            }
            None => 0.0,
        };

        // Rotation.
        if !order.target_direction.is_degenerate() {
            let angle = unit.direction.signed_angle_to(order.target_direction);
            let max_angle = unit.rotation_speed(constants) * dt;
            unit.direction = if angle.abs() <= max_angle {
                order.target_direction.normalize()
            } else {
                unit.direction.rotated(max_angle.copysign(angle)).safe_normalize()
            };
        }

        // Firing. The shot is not tracked; half its damage stands in for the
        // expected trade.
        if let Some(weapon) = weapon {
            if order.commits_to_fire()
                && unit.is_fully_aimed()
                && state.tick >= unit.next_shot_tick
                && unit.has_ammo()
            {
                damage -= (weapon.projectile_damage / 2.0) as i32;
                unit.next_shot_tick = i32::MAX;
            }
        }

        // Velocity.
        let target_velocity = limit_to_envelope(unit, constants, order.target_velocity);
        let change = target_velocity - unit.velocity;
        let max_change = constants.unit_acceleration * dt;
        if change.norm() > max_change {
            unit.velocity += change * (max_change / change.norm());
        } else {
            unit.velocity = target_velocity;
        }

        // Obstacles.
        let start = unit.position;
        collision::slide(
            &mut unit.position,
            &mut unit.velocity,
            unit.radius,
            obstacles,
            dt,
        );

        // Bullets.
        let target = Target {
            id: unit.id,
            position: start,
            velocity: (unit.position - start) / dt,
            radius: unit.radius,
        };
        for bullet in bullets.iter_mut() {
            if bullet.advance(&target, obstacles, dt) == Flight::HitUnit {
                damage += constants
                    .weapon(bullet.weapon_type_index)
                    .map_or(0, |weapon| weapon.projectile_damage as i32);
            }
        }

        // Zone.
        if zone.is_outside(unit.position, unit.radius) {
            damage += constants.zone_damage_per_tick;
        }

        state.tick = state.tick.saturating_add(1);
        damage
    }
}

/// The requested velocity, shortened to what the unit can reach in that
/// direction.
fn limit_to_envelope(unit: &Unit, constants: &Constants, requested: Vector2<f64>) -> Vector2<f64> {
    if requested.is_degenerate() {
        return Vector2::zeros();
    }
    let envelope = unit.envelope_velocity(constants, requested);
    if requested.norm_squared() < envelope.norm_squared() {
        requested
    } else {
        envelope
    }
}
