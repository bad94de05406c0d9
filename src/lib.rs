//! Asteroids Redux - survivor-style Asteroids simulation core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (entities, wrapping, collisions, tick orchestration)
//! - `progression`: Player stats, upgrade catalog, level-up flow
//! - `settings`: Session configuration
//! - `error`: Error types for configuration and upgrade selection

pub mod error;
pub mod progression;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, UpgradeError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default world dimensions (virtual units)
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;

    /// Ship
    pub const SHIP_SIZE: f32 = 20.0;
    /// Radians per second
    pub const SHIP_ROTATION_SPEED: f32 = 5.0;
    /// Per-tick velocity multiplier when not thrusting
    pub const SHIP_DAMPING: f32 = 0.99;
    /// Below this speed a coasting ship stops dead
    pub const SHIP_STOP_SPEED: f32 = 1.0;

    /// Bullets
    pub const BULLET_MAX_DISTANCE: f32 = 600.0;
    pub const BULLET_SIZE: f32 = 5.0;

    /// Asteroids
    pub const ASTEROID_SPEED_MIN: f32 = 25.0;
    pub const ASTEROID_SPEED_MAX: f32 = 100.0;
    pub const ASTEROID_SIZE_LARGE: f32 = 60.0;
    pub const ASTEROID_SIZE_MEDIUM: f32 = 30.0;
    pub const ASTEROID_SIZE_SMALL: f32 = 15.0;
    pub const ASTEROID_SCORE_LARGE: u32 = 50;
    pub const ASTEROID_SCORE_MEDIUM: u32 = 20;
    pub const ASTEROID_SCORE_SMALL: u32 = 10;
    pub const XP_LARGE: u32 = 10;
    pub const XP_MEDIUM: u32 = 6;
    pub const XP_SMALL: u32 = 3;
    pub const ASTEROID_VERTICES: usize = 8;
    /// Outline radius varies by ±20%
    pub const ASTEROID_JITTER: f32 = 0.2;
    /// Outline spin (degrees per second)
    pub const ASTEROID_SPIN_DEG: f32 = 50.0;
    /// Spawn re-roll tolerance around the ship (per axis)
    pub const SPAWN_SAFE_DISTANCE: f32 = 10.0;

    /// Particles
    pub const PARTICLE_LIFETIME: f32 = 0.5;
    pub const PARTICLE_SPEED: f32 = 60.0;
    pub const DESTRUCTION_PARTICLES: usize = 10;
    pub const SHIP_HIT_PARTICLES: usize = 10;
    pub const SHIP_DEATH_PARTICLES: usize = 30;

    /// Waves
    pub const INITIAL_ASTEROID_COUNT: u32 = 4;
    pub const WAVE_SPAWN_MULTIPLIER: u32 = 3;

    /// Explosive rounds: radius = base * (1 + step * level)
    pub const EXPLOSION_BASE_RADIUS: f32 = 80.0;
    pub const EXPLOSION_RADIUS_STEP: f32 = 0.25;

    /// Progression
    pub const MAX_LEVEL: u32 = 15;
    pub const BASE_XP_TO_LEVEL: u32 = 40;
    pub const XP_PER_LEVEL: u32 = 10;
    /// XP bonus per magnet level
    pub const MAGNET_XP_BONUS: f32 = 0.05;
    pub const UPGRADE_OFFER_COUNT: usize = 3;
}

/// Signed shortest rotation from `from` to `to`, in (-π, π]
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta <= -PI {
        delta += TAU;
    }
    delta
}

/// Vector of the given length pointing along `angle`
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::from_angle(theta) * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_delta_shortest_path() {
        assert!((angle_delta(0.0, PI / 2.0) - PI / 2.0).abs() < 1e-5);
        // Crossing the ±π seam goes the short way
        let d = angle_delta(170f32.to_radians(), -170f32.to_radians());
        assert!((d - 20f32.to_radians()).abs() < 1e-4);
        // Exactly opposite resolves to +π
        assert!((angle_delta(0.0, PI) - PI).abs() < 1e-5);
        assert!((angle_delta(0.0, -PI) - PI).abs() < 1e-5);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(2.0, PI / 2.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 2.0).abs() < 1e-5);
    }
}
