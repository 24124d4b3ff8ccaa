use crate::collision::{time_of_impact, Obstacle};
use crate::constants::Constants;
use crate::unit::Unit;
use crate::vec::{Ray, Vec2Extras};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Lifecycle of a projectile within one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileState {
    #[default]
    Active,
    Hit,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projectile {
    pub id: i32,
    pub weapon_type_index: usize,
    pub shooter_id: i32,
    pub shooter_player_id: i32,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Seconds of flight left.
    pub life_time: f64,
    #[serde(skip)]
    pub state: ProjectileState,
}

/// A moving circle a projectile may strike during one tick.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub id: i32,
    /// Position at the start of the tick.
    pub position: Vector2<f64>,
    /// Average velocity over the tick.
    pub velocity: Vector2<f64>,
    pub radius: f64,
}

impl Target {
    pub fn from_unit(unit: &Unit) -> Target {
        Target {
            id: unit.id,
            position: unit.position,
            velocity: unit.velocity,
            radius: unit.radius,
        }
    }
}

/// What happened to a projectile during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flight {
    /// Already destroyed before this tick.
    Inactive,
    HitUnit,
    HitObstacle { obstacle: usize },
    Expired,
    Flying,
}

impl Projectile {
    pub fn new(
        id: i32,
        weapon_type_index: usize,
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        life_time: f64,
    ) -> Projectile {
        Projectile {
            id,
            weapon_type_index,
            shooter_id: -1,
            shooter_player_id: -1,
            position,
            velocity,
            life_time,
            state: ProjectileState::Active,
        }
    }

    /// The shot `unit` would fire right now along its facing, or `None` if it
    /// has no weapon.
    pub fn synthetic_shot(unit: &Unit, constants: &Constants) -> Option<Projectile> {
        let weapon_type_index = unit.weapon?;
        let weapon = constants.weapon(weapon_type_index)?;
        let direction = unit.direction.safe_normalize();
        Some(Projectile {
            shooter_id: unit.id,
            shooter_player_id: unit.player_id,
            ..Projectile::new(
                -1,
                weapon_type_index,
                unit.position + direction * unit.radius,
                direction * weapon.projectile_speed,
                weapon.projectile_life_time,
            )
        })
    }

    pub fn is_destroyed(&self) -> bool {
        self.state != ProjectileState::Active
    }

    /// Makes a copy usable for a fresh simulation run.
    pub fn reset(&mut self, pristine: &Projectile) {
        self.position = pristine.position;
        self.velocity = pristine.velocity;
        self.life_time = pristine.life_time;
        self.state = pristine.state;
    }

    /// Time within this tick at which the projectile reaches `target`.
    /// A unit is never struck by its own shots.
    pub fn target_impact(&self, target: &Target, dt: f64) -> Option<f64> {
        if self.shooter_id == target.id {
            return None;
        }
        time_of_impact(
            self.position - target.position,
            self.velocity - target.velocity,
            target.radius,
            dt.min(self.life_time),
        )
    }

    /// Nearest solid obstacle struck within this tick, with its impact time.
    pub fn obstacle_impact(&self, obstacles: &[Obstacle], dt: f64) -> Option<(f64, usize)> {
        let max_time = dt.min(self.life_time);
        let mut best: Option<(f64, usize)> = None;
        for (index, obstacle) in obstacles.iter().enumerate() {
            if !obstacle.is_solid() {
                continue;
            }
            if let Some(t) = time_of_impact(
                self.position - obstacle.position,
                self.velocity,
                obstacle.radius,
                max_time,
            ) {
                if best.map_or(true, |(best_t, _)| t < best_t) {
                    best = Some((t, index));
                }
            }
        }
        best
    }

    /// Flies for one tick against a single target.
    ///
    /// When both an obstacle and the target lie on this tick's path the
    /// nearer one takes the projectile; a tie goes to the target.
    pub fn advance(&mut self, target: &Target, obstacles: &[Obstacle], dt: f64) -> Flight {
        if self.is_destroyed() {
            return Flight::Inactive;
        }

        let speed = self.velocity.norm();
        let unit_hit = self.target_impact(target, dt);
        let obstacle_hit = self.obstacle_impact(obstacles, dt);
        match (unit_hit, obstacle_hit) {
            (Some(unit_t), Some((obstacle_t, obstacle))) if obstacle_t * speed < unit_t * speed => {
                self.state = ProjectileState::Hit;
                return Flight::HitObstacle { obstacle };
            }
            (Some(_), _) => {
                self.state = ProjectileState::Hit;
                return Flight::HitUnit;
            }
            (None, Some((_, obstacle))) => {
                self.state = ProjectileState::Hit;
                return Flight::HitObstacle { obstacle };
            }
            (None, None) => {}
        }

        if self.life_time <= dt {
            self.state = ProjectileState::Expired;
            return Flight::Expired;
        }

        self.position += self.velocity * dt;
        self.life_time -= dt;
        Flight::Flying
    }

    /// Whether the straight path of this projectile reaches `unit` before
    /// running out of life. Obstacles are not considered.
    pub fn intersects_unit(&self, unit: &Unit) -> bool {
        self.intersects_circle(unit.position, unit.radius)
            && self.reaches(self.position.distance_to(unit.position) - unit.radius)
    }

    pub fn intersects_circle(&self, center: Vector2<f64>, radius: f64) -> bool {
        if self.velocity.is_degenerate() {
            return false;
        }
        Ray::new(self.position, self.velocity).intersects_circle(center, radius)
    }

    fn reaches(&self, distance: f64) -> bool {
        distance / self.velocity.norm() <= self.life_time
    }
}

/// Whether `shot` would reach a circular target before any solid obstacle
/// lying on its line of fire.
pub fn has_clear_shot(
    shot: &Projectile,
    target_position: Vector2<f64>,
    target_radius: f64,
    obstacles: &[Obstacle],
) -> bool {
    if !shot.intersects_circle(target_position, target_radius) {
        return false;
    }
    let target_distance = shot.position.distance_to(target_position) - target_radius;
    if !shot.reaches(target_distance) {
        return false;
    }
    let nearest_obstacle = obstacles
        .iter()
        .filter(|o| o.is_solid() && shot.intersects_circle(o.position, o.radius))
        .map(|o| shot.position.distance_to(o.position) - o.radius)
        .fold(f64::INFINITY, f64::min);
    target_distance <= nearest_obstacle
}
