//! Upgrade catalog
//!
//! Static upgrade definitions. Each definition carries one description per
//! purchasable level, so its max level is the description count.

use serde::{Deserialize, Serialize};

/// Upgrade identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    Damage,
    FireRate,
    BulletSpeed,
    MultiShot,
    Pierce,
    MoveSpeed,
    MaxHp,
    Shield,
    Magnet,
    ExplosionRadius,
    /// Extended catalog only
    BulletRange,
    /// Extended catalog only
    BulletSize,
}

/// A purchasable upgrade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeDefinition {
    pub id: UpgradeId,
    pub display_name: &'static str,
    pub descriptions: &'static [&'static str],
}

impl UpgradeDefinition {
    pub fn max_level(&self) -> u32 {
        self.descriptions.len() as u32
    }

    /// Description of the level the player would buy next (`current` is the owned level)
    pub fn description_for(&self, current: u32) -> Option<&'static str> {
        self.descriptions.get(current as usize).copied()
    }
}

static STANDARD: [UpgradeDefinition; 10] = [
    UpgradeDefinition {
        id: UpgradeId::Damage,
        display_name: "Damage",
        descriptions: &[
            "Bullets deal +20% damage",
            "Bullets deal +40% damage",
            "Bullets deal +60% damage",
            "Bullets deal +80% damage",
            "Bullets deal +100% damage",
        ],
    },
    UpgradeDefinition {
        id: UpgradeId::FireRate,
        display_name: "Fire Rate",
        descriptions: &[
            "Fire rate +12%",
            "Fire rate +24%",
            "Fire rate +36%",
            "Fire rate +48%",
            "Fire rate +60%",
        ],
    },
    UpgradeDefinition {
        id: UpgradeId::BulletSpeed,
        display_name: "Bullet Speed",
        descriptions: &["Bullet speed +25%", "Bullet speed +50%", "Bullet speed +75%"],
    },
    UpgradeDefinition {
        id: UpgradeId::MultiShot,
        display_name: "Multi Shot",
        descriptions: &["+1 extra bullet", "+2 extra bullets", "+3 extra bullets"],
    },
    UpgradeDefinition {
        id: UpgradeId::Pierce,
        display_name: "Pierce",
        descriptions: &["Bullets pierce 1 enemy", "Bullets pierce 2 enemies"],
    },
    UpgradeDefinition {
        id: UpgradeId::MoveSpeed,
        display_name: "Move Speed",
        descriptions: &[
            "Ship speed +15%",
            "Ship speed +30%",
            "Ship speed +45%",
            "Ship speed +60%",
        ],
    },
    UpgradeDefinition {
        id: UpgradeId::MaxHp,
        display_name: "Max HP",
        descriptions: &["Max HP +1", "Max HP +1", "Max HP +1"],
    },
    UpgradeDefinition {
        id: UpgradeId::Shield,
        display_name: "Shield",
        descriptions: &["Active Shield (12s recharge)", "Shield recharge reduced to 7s"],
    },
    UpgradeDefinition {
        id: UpgradeId::Magnet,
        display_name: "Magnet",
        descriptions: &["XP Gain +5%", "XP Gain +10%", "XP Gain +15%"],
    },
    UpgradeDefinition {
        id: UpgradeId::ExplosionRadius,
        display_name: "Explosive Rounds",
        descriptions: &[
            "Small explosion on kill",
            "Explosion radius +25%",
            "Explosion radius +50%",
        ],
    },
];

static EXTRAS: [UpgradeDefinition; 2] = [
    UpgradeDefinition {
        id: UpgradeId::BulletRange,
        display_name: "Bullet Range",
        descriptions: &["Bullet range +30%", "Bullet range +69%", "Bullet range +120%"],
    },
    UpgradeDefinition {
        id: UpgradeId::BulletSize,
        display_name: "Bigger Bullets",
        descriptions: &["Bigger bullets"],
    },
];

/// The set of upgrades a session can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeCatalog {
    extended: bool,
}

impl Default for UpgradeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl UpgradeCatalog {
    /// The ten upgrades of the base game
    pub fn standard() -> Self {
        Self { extended: false }
    }

    /// Standard upgrades plus Bullet Range and Bullet Size
    pub fn extended() -> Self {
        Self { extended: true }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static UpgradeDefinition> {
        let extras: &'static [UpgradeDefinition] = if self.extended { &EXTRAS } else { &[] };
        STANDARD.iter().chain(extras.iter())
    }

    pub fn get(&self, id: UpgradeId) -> Option<&'static UpgradeDefinition> {
        self.iter().find(|def| def.id == id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
