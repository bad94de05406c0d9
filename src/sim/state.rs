//! Game state and session-level types
//!
//! Everything one session owns: the world, the progression controller,
//! score, shoot cooldown, and the event log handed to presentation code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::AsteroidSize;
use super::snapshot::RenderSnapshot;
use super::world::WorldManager;
use super::wrap::WorldBounds;
use crate::error::{SettingsError, UpgradeError};
use crate::progression::{PlayerStats, ProgressionController, UpgradeCatalog, UpgradeId};
use crate::settings::Settings;

/// Offer rolls use their own stream so world randomness doesn't shift the offers
const PROGRESSION_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation frozen until an upgrade is chosen
    ChoosingUpgrade,
    /// Ship destroyed; the session is finished
    GameOver,
}

/// Things that happened, for audio/HUD feedback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ShotFired { bullets: u32 },
    AsteroidDestroyed { size: AsteroidSize, position: Vec2 },
    ShipHit { hp_left: i32 },
    LevelUp { level: u32 },
    UpgradeApplied { id: UpgradeId, level: u32 },
    WaveSpawned { count: u32 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub world: WorldManager,
    pub progression: ProgressionController,
    pub score: u64,
    /// Seconds until the next volley may fire (fires at ≤ 0)
    pub shoot_cooldown: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(super) game_over: bool,
    pub(super) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session from validated settings
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    /// Default settings with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Settings {
            seed,
            ..Settings::default()
        })
    }

    fn build(settings: Settings) -> Self {
        let bounds = WorldBounds::new(settings.world_width, settings.world_height);
        let catalog = if settings.extended_upgrades {
            UpgradeCatalog::extended()
        } else {
            UpgradeCatalog::standard()
        };

        let mut world = WorldManager::new(bounds, settings.seed, settings.max_particles);
        world.spawn_asteroids(settings.initial_asteroids);

        log::info!(
            "New session: seed {:#x}, {}x{} world, {} asteroids, {} upgrades",
            settings.seed,
            bounds.width,
            bounds.height,
            settings.initial_asteroids,
            catalog.len()
        );

        Self {
            progression: ProgressionController::new(catalog, settings.seed ^ PROGRESSION_SEED_SALT),
            settings,
            world,
            score: 0,
            shoot_cooldown: 0.0,
            time_ticks: 0,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.progression.is_paused() {
            GamePhase::ChoosingUpgrade
        } else {
            GamePhase::Running
        }
    }

    /// Paused for an upgrade choice
    pub fn is_paused(&self) -> bool {
        self.progression.is_paused()
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn stats(&self) -> &PlayerStats {
        self.progression.stats()
    }

    pub fn bounds(&self) -> WorldBounds {
        *self.world.bounds()
    }

    /// Change the world size (e.g. on window resize); entities outside snap back on their next move
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SettingsError> {
        let resized = Settings {
            world_width: width,
            world_height: height,
            ..self.settings.clone()
        };
        resized.validate()?;
        self.settings = resized;
        self.world.set_bounds(WorldBounds::new(width, height));
        log::debug!("World resized to {}x{}", width, height);
        Ok(())
    }

    /// Pick the offer at `index`
    pub fn choose_upgrade(&mut self, index: usize) -> Result<UpgradeId, UpgradeError> {
        let id = self.progression.choose(index).inspect_err(|err| {
            log::warn!("Rejected upgrade choice {}: {}", index, err);
        })?;
        self.record_upgrade(id);
        Ok(id)
    }

    /// Pick the offer with `id`
    pub fn choose_upgrade_id(&mut self, id: UpgradeId) -> Result<(), UpgradeError> {
        self.progression.choose_id(id).inspect_err(|err| {
            log::warn!("Rejected upgrade choice {:?}: {}", id, err);
        })?;
        self.record_upgrade(id);
        Ok(())
    }

    fn record_upgrade(&mut self, id: UpgradeId) {
        let level = self.progression.stats().upgrade_level(id);
        self.events.push(GameEvent::UpgradeApplied { id, level });
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for rendering and HUD
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}
