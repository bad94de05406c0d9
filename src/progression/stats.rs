//! Player progression state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::UpgradeId;
use crate::consts::*;

/// Everything upgrades can touch, plus level/XP/HP bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub level: u32,
    pub current_xp: u32,
    pub xp_to_next_level: u32,

    pub max_hp: i32,
    /// May dip below zero on the killing hit
    pub current_hp: i32,

    pub base_damage: f32,
    /// Seconds between volleys
    pub fire_cooldown: f32,
    pub bullet_speed: f32,
    /// Range multiplier
    pub bullet_lifetime_multiplier: f32,
    pub bullet_size_multiplier: f32,
    pub ship_acceleration: f32,
    pub ship_max_speed: f32,

    pub multi_shot_level: u32,
    pub pierce_level: u32,
    pub shield_level: u32,
    pub shield_recharge_time: f32,
    pub magnet_level: u32,
    pub explosion_radius_level: u32,

    /// Purchased level per upgrade (absent = 0)
    pub upgrade_levels: BTreeMap<UpgradeId, u32>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_to_next_level: BASE_XP_TO_LEVEL,

            max_hp: 3,
            current_hp: 3,

            base_damage: 1.0,
            fire_cooldown: 0.35,
            bullet_speed: 350.0,
            bullet_lifetime_multiplier: 1.0,
            bullet_size_multiplier: 1.0,
            ship_acceleration: 300.0,
            ship_max_speed: 450.0,

            multi_shot_level: 0,
            pierce_level: 0,
            shield_level: 0,
            shield_recharge_time: 0.0,
            magnet_level: 0,
            explosion_radius_level: 0,

            upgrade_levels: BTreeMap::new(),
        }
    }
}

impl PlayerStats {
    pub fn upgrade_level(&self, id: UpgradeId) -> u32 {
        self.upgrade_levels.get(&id).copied().unwrap_or(0)
    }

    /// XP threshold for leaving `level`
    pub fn xp_threshold_for(level: u32) -> u32 {
        BASE_XP_TO_LEVEL + XP_PER_LEVEL * level.saturating_sub(1)
    }

    /// XP bar fill in [0, 1]
    pub fn xp_progress(&self) -> f32 {
        if self.xp_to_next_level == 0 {
            return 0.0;
        }
        (self.current_xp as f32 / self.xp_to_next_level as f32).min(1.0)
    }

    /// HP for display (never negative)
    pub fn display_hp(&self) -> i32 {
        self.current_hp.max(0)
    }

    /// Explosive rounds radius, or None without the upgrade
    pub fn explosion_radius(&self) -> Option<f32> {
        (self.explosion_radius_level > 0).then(|| {
            EXPLOSION_BASE_RADIUS * (1.0 + EXPLOSION_RADIUS_STEP * self.explosion_radius_level as f32)
        })
    }

    /// XP after the magnet bonus, rounded down
    pub fn scaled_xp(&self, amount: u32) -> u32 {
        let bonus = 1.0 + MAGNET_XP_BONUS * self.magnet_level as f32;
        (amount as f32 * bonus).floor() as u32
    }

    /// Record one more level of `id` and apply its stat effect
    pub fn apply_upgrade(&mut self, id: UpgradeId) {
        *self.upgrade_levels.entry(id).or_insert(0) += 1;

        match id {
            UpgradeId::Damage => self.base_damage *= 1.2,
            UpgradeId::FireRate => self.fire_cooldown *= 0.88,
            UpgradeId::BulletSpeed => self.bullet_speed *= 1.25,
            UpgradeId::BulletRange => self.bullet_lifetime_multiplier *= 1.3,
            UpgradeId::MultiShot => self.multi_shot_level += 1,
            UpgradeId::Pierce => self.pierce_level += 1,
            UpgradeId::MoveSpeed => {
                self.ship_acceleration *= 1.15;
                self.ship_max_speed *= 1.15;
            }
            UpgradeId::MaxHp => {
                self.max_hp += 1;
                if self.current_hp < self.max_hp {
                    self.current_hp += 1;
                }
            }
            UpgradeId::Shield => {
                self.shield_level += 1;
                self.shield_recharge_time = if self.shield_level == 2 { 7.0 } else { 12.0 };
            }
            UpgradeId::Magnet => self.magnet_level += 1,
            UpgradeId::ExplosionRadius => self.explosion_radius_level += 1,
            UpgradeId::BulletSize => self.bullet_size_multiplier += 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let stats = PlayerStats::default();
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp_to_next_level, 40);
        assert_eq!(stats.current_hp, stats.max_hp);
        assert_eq!(stats.upgrade_level(UpgradeId::Pierce), 0);
        assert!(stats.explosion_radius().is_none());
    }

    #[test]
    fn test_threshold_formula() {
        assert_eq!(PlayerStats::xp_threshold_for(1), 40);
        assert_eq!(PlayerStats::xp_threshold_for(2), 50);
        assert_eq!(PlayerStats::xp_threshold_for(15), 180);
    }

    #[test]
    fn test_xp_progress_guards_zero_threshold() {
        let stats = PlayerStats {
            xp_to_next_level: 0,
            current_xp: 5,
            ..Default::default()
        };
        assert_eq!(stats.xp_progress(), 0.0);

        let stats = PlayerStats {
            current_xp: 10,
            ..Default::default()
        };
        assert!((stats.xp_progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_display_hp_clamps() {
        let stats = PlayerStats {
            current_hp: -2,
            ..Default::default()
        };
        assert_eq!(stats.display_hp(), 0);
    }

    #[test]
    fn test_magnet_scaling_floors() {
        let mut stats = PlayerStats::default();
        assert_eq!(stats.scaled_xp(10), 10);
        stats.magnet_level = 2;
        assert_eq!(stats.scaled_xp(10), 11);
        stats.magnet_level = 3;
        // 10 * 1.15 = 11.5
        assert_eq!(stats.scaled_xp(10), 11);
    }

    #[test]
    fn test_multiplicative_upgrades() {
        let mut stats = PlayerStats::default();
        stats.apply_upgrade(UpgradeId::Damage);
        stats.apply_upgrade(UpgradeId::FireRate);
        stats.apply_upgrade(UpgradeId::BulletSpeed);
        stats.apply_upgrade(UpgradeId::MoveSpeed);
        assert!((stats.base_damage - 1.2).abs() < 1e-5);
        assert!((stats.fire_cooldown - 0.308).abs() < 1e-5);
        assert!((stats.bullet_speed - 437.5).abs() < 1e-3);
        assert!((stats.ship_acceleration - 345.0).abs() < 1e-3);
        assert!((stats.ship_max_speed - 517.5).abs() < 1e-3);
        assert_eq!(stats.upgrade_level(UpgradeId::Damage), 1);
    }

    #[test]
    fn test_counter_upgrades() {
        let mut stats = PlayerStats::default();
        stats.apply_upgrade(UpgradeId::MultiShot);
        stats.apply_upgrade(UpgradeId::MultiShot);
        stats.apply_upgrade(UpgradeId::Pierce);
        stats.apply_upgrade(UpgradeId::Magnet);
        stats.apply_upgrade(UpgradeId::ExplosionRadius);
        assert_eq!(stats.multi_shot_level, 2);
        assert_eq!(stats.upgrade_level(UpgradeId::MultiShot), 2);
        assert_eq!(stats.pierce_level, 1);
        assert_eq!(stats.magnet_level, 1);
        assert_eq!(stats.explosion_radius(), Some(100.0));
    }

    #[test]
    fn test_max_hp_heals_only_when_hurt() {
        let mut stats = PlayerStats::default();
        stats.apply_upgrade(UpgradeId::MaxHp);
        // 3/3 -> max 4, current 3 < 4 so it heals
        assert_eq!((stats.current_hp, stats.max_hp), (4, 4));

        stats.current_hp = 1;
        stats.apply_upgrade(UpgradeId::MaxHp);
        assert_eq!((stats.current_hp, stats.max_hp), (2, 5));
    }

    #[test]
    fn test_shield_recharge_steps() {
        let mut stats = PlayerStats::default();
        stats.apply_upgrade(UpgradeId::Shield);
        assert_eq!(stats.shield_recharge_time, 12.0);
        stats.apply_upgrade(UpgradeId::Shield);
        assert_eq!(stats.shield_recharge_time, 7.0);
    }

    #[test]
    fn test_extended_upgrades() {
        let mut stats = PlayerStats::default();
        stats.apply_upgrade(UpgradeId::BulletRange);
        stats.apply_upgrade(UpgradeId::BulletSize);
        assert!((stats.bullet_lifetime_multiplier - 1.3).abs() < 1e-6);
        assert!((stats.bullet_size_multiplier - 1.5).abs() < 1e-6);
    }
}
