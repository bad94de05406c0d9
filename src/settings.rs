//! Session settings
//!
//! Loaded from JSON by the native runner; every field is optional and falls
//! back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Game settings for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// World width (virtual units)
    pub world_width: f32,
    /// World height (virtual units)
    pub world_height: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Large asteroids spawned when the session starts
    pub initial_asteroids: u32,

    // === Gameplay ===
    /// Keep counting down the shoot cooldown while the upgrade choice is open
    /// (off: the cooldown freezes with the rest of the world)
    pub cooldown_runs_while_paused: bool,
    /// Offer Bullet Range and Bullet Size alongside the standard upgrades
    pub extended_upgrades: bool,

    // === Effects ===
    /// Maximum live particles (0 disables particles)
    pub max_particles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            seed: 0x5EED,
            initial_asteroids: INITIAL_ASTEROID_COUNT,

            cooldown_runs_while_paused: false,
            extended_upgrades: false,

            max_particles: 2000,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (width, height) = (self.world_width, self.world_height);
        // NaN fails both comparisons
        if !(width > 0.0 && height > 0.0) {
            return Err(SettingsError::InvalidBounds { width, height });
        }
        // Too small for any spawn point to clear the guard box around the ship
        let guard = 2.0 * SPAWN_SAFE_DISTANCE;
        if width <= guard && height <= guard {
            return Err(SettingsError::InvalidBounds { width, height });
        }
        Ok(())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "extended_upgrades": true }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert!(settings.extended_upgrades);
        assert_eq!(settings.world_width, WORLD_WIDTH);
        assert!(!settings.cooldown_runs_while_paused);
    }

    #[test]
    fn test_rejects_non_positive_bounds() {
        let err = Settings::from_json(r#"{ "world_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidBounds { .. }));
    }

    #[test]
    fn test_rejects_world_inside_spawn_guard() {
        let err = Settings::from_json(r#"{ "world_width": 20.0, "world_height": 20.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidBounds { .. }));

        // One long axis leaves room to spawn
        let narrow = Settings::from_json(r#"{ "world_width": 10.0, "world_height": 400.0 }"#).unwrap();
        assert_eq!(narrow.world_width, 10.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ seed: }").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 7,
            max_particles: 10,
            ..Default::default()
        };
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
