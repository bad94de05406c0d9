//! Level-up flow
//!
//! XP comes in from destroyed asteroids; crossing a threshold levels the
//! player up and pauses play with up to three upgrade offers. Picking one
//! applies its stat effect and resumes.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::catalog::{UpgradeCatalog, UpgradeDefinition, UpgradeId};
use super::stats::PlayerStats;
use crate::consts::*;
use crate::error::UpgradeError;

/// Whether the simulation may advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionPhase {
    Running,
    /// Waiting for the player to pick an upgrade
    ChoosingUpgrade,
}

/// Owns the player's stats and gates play on upgrade choices
#[derive(Debug, Clone)]
pub struct ProgressionController {
    stats: PlayerStats,
    catalog: UpgradeCatalog,
    phase: ProgressionPhase,
    offers: Vec<&'static UpgradeDefinition>,
    /// Seconds the current upgrade choice has been open
    choice_open_time: f32,
    rng: Pcg32,
}

impl ProgressionController {
    pub fn new(catalog: UpgradeCatalog, seed: u64) -> Self {
        Self::with_stats(PlayerStats::default(), catalog, seed)
    }

    pub fn with_stats(stats: PlayerStats, catalog: UpgradeCatalog, seed: u64) -> Self {
        Self {
            stats,
            catalog,
            phase: ProgressionPhase::Running,
            offers: Vec::new(),
            choice_open_time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn catalog(&self) -> UpgradeCatalog {
        self.catalog
    }

    pub fn phase(&self) -> ProgressionPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == ProgressionPhase::ChoosingUpgrade
    }

    /// Upgrades on offer (empty while running)
    pub fn offers(&self) -> &[&'static UpgradeDefinition] {
        &self.offers
    }

    pub fn choice_open_time(&self) -> f32 {
        self.choice_open_time
    }

    /// Advance the open-choice timer (UI debounce)
    pub fn tick_paused(&mut self, dt: f32) {
        if self.is_paused() {
            self.choice_open_time += dt;
        }
    }

    /// Take `amount` damage and return the HP left
    pub fn damage(&mut self, amount: i32) -> i32 {
        self.stats.current_hp -= amount;
        self.stats.current_hp
    }

    /// Grant XP (magnet bonus applied) and resolve level-ups.
    /// Returns how many levels were gained.
    pub fn grant_xp(&mut self, amount: u32) -> u32 {
        let gained = self.stats.scaled_xp(amount);
        self.stats.current_xp = self.stats.current_xp.saturating_add(gained);
        self.check_level_up()
    }

    fn check_level_up(&mut self) -> u32 {
        let mut levels = 0;
        while self.stats.current_xp >= self.stats.xp_to_next_level && self.stats.level < MAX_LEVEL {
            self.stats.current_xp -= self.stats.xp_to_next_level;
            self.stats.level += 1;
            self.stats.xp_to_next_level = PlayerStats::xp_threshold_for(self.stats.level);
            levels += 1;
            log::info!(
                "Level up! now level {} (next at {} xp)",
                self.stats.level,
                self.stats.xp_to_next_level
            );
            self.trigger_level_up();
        }
        levels
    }

    fn trigger_level_up(&mut self) {
        self.offers = self.roll_offers();
        self.choice_open_time = 0.0;
        if self.offers.is_empty() {
            // Nothing left to buy; keep playing instead of waiting on an empty choice
            log::info!("All upgrades maxed, no choice offered");
            self.phase = ProgressionPhase::Running;
        } else {
            self.phase = ProgressionPhase::ChoosingUpgrade;
        }
    }

    /// Shuffle the not-yet-maxed upgrades and take up to three
    pub fn roll_offers(&mut self) -> Vec<&'static UpgradeDefinition> {
        let mut eligible: Vec<&'static UpgradeDefinition> = self
            .catalog
            .iter()
            .filter(|def| self.stats.upgrade_level(def.id) < def.max_level())
            .collect();
        eligible.shuffle(&mut self.rng);
        eligible.truncate(UPGRADE_OFFER_COUNT);
        eligible
    }

    /// Apply the offer at `index` and resume play
    pub fn choose(&mut self, index: usize) -> Result<UpgradeId, UpgradeError> {
        if !self.is_paused() {
            return Err(UpgradeError::NotPaused);
        }
        let def = self
            .offers
            .get(index)
            .copied()
            .ok_or(UpgradeError::InvalidChoice {
                index,
                offered: self.offers.len(),
            })?;
        self.apply(def);
        Ok(def.id)
    }

    /// Apply the offered upgrade with `id` and resume play
    pub fn choose_id(&mut self, id: UpgradeId) -> Result<(), UpgradeError> {
        if !self.is_paused() {
            return Err(UpgradeError::NotPaused);
        }
        let def = self
            .offers
            .iter()
            .copied()
            .find(|def| def.id == id)
            .ok_or(UpgradeError::NotOffered(id))?;
        self.apply(def);
        Ok(())
    }

    fn apply(&mut self, def: &'static UpgradeDefinition) {
        self.stats.apply_upgrade(def.id);
        log::info!(
            "Upgrade {} -> level {}/{}",
            def.display_name,
            self.stats.upgrade_level(def.id),
            def.max_level()
        );
        self.offers.clear();
        self.choice_open_time = 0.0;
        self.phase = ProgressionPhase::Running;
    }
}
