//! Entity models and their per-tick update rules
//!
//! Ship, asteroids, bullets and particles. Each entity only touches its own
//! state in `update`; cross-entity effects live in the collision pass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::outline::Outline;
use super::tick::TickInput;
use super::wrap::WorldBounds;
use crate::consts::*;
use crate::progression::PlayerStats;
use crate::{angle_delta, polar_to_cartesian};

/// Entity identifier, unique within a session
pub type EntityId = u32;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing (radians)
    pub angle: f32,
    /// Bullet spawn point, recomputed every update
    pub nose: Vec2,
    pub dead: bool,
}

impl Ship {
    /// Ship at `position`, pointing up
    pub fn new(position: Vec2) -> Self {
        let angle = std::f32::consts::FRAC_PI_2;
        Self {
            position,
            velocity: Vec2::ZERO,
            angle,
            nose: position + polar_to_cartesian(SHIP_SIZE, angle),
            dead: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn update(&mut self, dt: f32, input: &TickInput, stats: &PlayerStats, bounds: &WorldBounds) {
        if self.dead {
            return;
        }

        if let Some(target) = input.target_angle {
            self.steer_toward(target, dt);
        }

        if input.thrust {
            self.velocity += polar_to_cartesian(stats.ship_acceleration * dt, self.angle);
        } else {
            // Per-tick damping, so coasting distance depends on frame rate
            self.velocity *= SHIP_DAMPING;
            if self.velocity.length() < SHIP_STOP_SPEED {
                self.velocity = Vec2::ZERO;
            }
        }

        self.velocity = self.velocity.clamp_length_max(stats.ship_max_speed);

        self.position += self.velocity * dt;
        bounds.wrap(&mut self.position);

        self.nose = self.position + polar_to_cartesian(SHIP_SIZE, self.angle);
    }

    /// Rotate toward `target` at most `SHIP_ROTATION_SPEED * dt`, snapping when close
    fn steer_toward(&mut self, target: f32, dt: f32) {
        let diff = angle_delta(self.angle, target);
        let max_rotation = SHIP_ROTATION_SPEED * dt;
        if diff.abs() < max_rotation {
            self.angle = target;
        } else if diff > 0.0 {
            self.angle += max_rotation;
        } else {
            self.angle -= max_rotation;
        }
    }
}

/// Asteroid size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Radius (also the outline base radius)
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => ASTEROID_SIZE_LARGE,
            AsteroidSize::Medium => ASTEROID_SIZE_MEDIUM,
            AsteroidSize::Small => ASTEROID_SIZE_SMALL,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            AsteroidSize::Large => ASTEROID_SCORE_LARGE,
            AsteroidSize::Medium => ASTEROID_SCORE_MEDIUM,
            AsteroidSize::Small => ASTEROID_SCORE_SMALL,
        }
    }

    pub fn xp_value(self) -> u32 {
        match self {
            AsteroidSize::Large => XP_LARGE,
            AsteroidSize::Medium => XP_MEDIUM,
            AsteroidSize::Small => XP_SMALL,
        }
    }

    /// Size of the two fragments left behind, if any
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: EntityId,
    pub size: AsteroidSize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub outline: Outline,
    pub active: bool,
}

impl Asteroid {
    /// Spawn with a random heading, speed, and outline
    pub fn new<R: Rng + ?Sized>(id: EntityId, size: AsteroidSize, position: Vec2, rng: &mut R) -> Self {
        let heading = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(ASTEROID_SPEED_MIN..=ASTEROID_SPEED_MAX);
        Self {
            id,
            size,
            position,
            velocity: polar_to_cartesian(speed, heading),
            outline: Outline::jagged(size.radius(), position, rng),
            active: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    pub fn xp_value(&self) -> u32 {
        self.size.xp_value()
    }

    pub fn update(&mut self, dt: f32, bounds: &WorldBounds) {
        if !self.active {
            return;
        }
        self.position += self.velocity * dt;
        bounds.wrap(&mut self.position);
        self.outline.position = self.position;
        self.outline.rotation += ASTEROID_SPIN_DEG.to_radians() * dt;
    }
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub distance_traveled: f32,
    pub max_distance: f32,
    /// Copied from stats at fire time
    pub damage: f32,
    /// Asteroids this bullet can still pass through
    pub remaining_hits: u32,
    pub size: f32,
    pub active: bool,
}

impl Bullet {
    /// Fire from `position` along `angle`, snapshotting the current stats
    pub fn new(position: Vec2, angle: f32, stats: &PlayerStats) -> Self {
        Self {
            position,
            velocity: polar_to_cartesian(stats.bullet_speed, angle),
            distance_traveled: 0.0,
            max_distance: BULLET_MAX_DISTANCE * stats.bullet_lifetime_multiplier,
            damage: stats.base_damage,
            remaining_hits: stats.pierce_level,
            size: BULLET_SIZE * stats.bullet_size_multiplier,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32, bounds: &WorldBounds) {
        if !self.active {
            return;
        }
        // Measure before wrapping so a teleport doesn't reset the budget
        self.distance_traveled += self.velocity.length() * dt;

        self.position += self.velocity * dt;
        bounds.wrap(&mut self.position);

        if self.distance_traveled >= self.max_distance {
            self.active = false;
        }
    }
}

/// A cosmetic particle (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds left
    pub lifetime: f32,
    pub active: bool,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            lifetime: PARTICLE_LIFETIME,
            active: true,
        }
    }

    /// Remaining life in [0, 1], for fading
    pub fn life_ratio(&self) -> f32 {
        (self.lifetime / PARTICLE_LIFETIME).clamp(0.0, 1.0)
    }

    /// Particles never wrap; they die long before reaching an edge
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.position += self.velocity * dt;
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.active = false;
        }
    }
}
