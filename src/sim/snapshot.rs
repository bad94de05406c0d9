//! Read-only view of a session for rendering and HUD code
//!
//! Plain serializable data, detached from the live state, so a frontend can
//! hold on to it (or ship it across a boundary as JSON) without borrowing.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::Serialize;

use super::entities::AsteroidSize;
use super::state::{GamePhase, GameState};
use crate::progression::UpgradeId;

#[derive(Debug, Clone, Serialize)]
pub struct ShipView {
    pub position: Vec2,
    pub angle: f32,
    pub nose: Vec2,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidView {
    pub id: u32,
    pub size: AsteroidSize,
    pub position: Vec2,
    /// World-space polygon
    pub outline: Vec<Vec2>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub position: Vec2,
    pub size: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub position: Vec2,
    /// 1 when spawned, 0 when expired
    pub life_ratio: f32,
}

/// HUD numbers
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub level: u32,
    pub current_xp: u32,
    pub xp_to_next_level: u32,
    /// XP bar fill in [0, 1]
    pub xp_progress: f32,
    /// Clamped at zero
    pub hp: i32,
    pub max_hp: i32,
    pub upgrade_levels: BTreeMap<UpgradeId, u32>,
}

/// One card on the level-up screen
#[derive(Debug, Clone, Serialize)]
pub struct OfferView {
    pub id: UpgradeId,
    pub name: &'static str,
    /// What the next level does
    pub description: &'static str,
    /// Level the player would reach by picking it
    pub next_level: u32,
    pub max_level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub paused: bool,
    pub score: u64,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub player: PlayerView,
    /// Empty unless paused for an upgrade choice
    pub offers: Vec<OfferView>,
    /// Seconds the upgrade choice has been open
    pub choice_open_time: f32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let world = &state.world;
        let stats = state.stats();

        let offers = state
            .progression
            .offers()
            .iter()
            .map(|def| {
                let owned = stats.upgrade_level(def.id);
                OfferView {
                    id: def.id,
                    name: def.display_name,
                    description: def.description_for(owned).unwrap_or_default(),
                    next_level: owned + 1,
                    max_level: def.max_level(),
                }
            })
            .collect();

        Self {
            tick: state.time_ticks,
            phase: state.phase(),
            paused: state.is_paused(),
            score: state.score,
            ship: ShipView {
                position: world.ship.position,
                angle: world.ship.angle,
                nose: world.ship.nose,
                alive: !world.ship.is_dead(),
            },
            asteroids: world
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    id: a.id,
                    size: a.size,
                    position: a.position,
                    outline: a.outline.world_vertices(),
                    active: a.active,
                })
                .collect(),
            bullets: world
                .bullets
                .iter()
                .map(|b| BulletView {
                    position: b.position,
                    size: b.size,
                    active: b.active,
                })
                .collect(),
            particles: world
                .particles
                .iter()
                .map(|p| ParticleView {
                    position: p.position,
                    life_ratio: p.life_ratio(),
                })
                .collect(),
            player: PlayerView {
                level: stats.level,
                current_xp: stats.current_xp,
                xp_to_next_level: stats.xp_to_next_level,
                xp_progress: stats.xp_progress(),
                hp: stats.display_hp(),
                max_hp: stats.max_hp,
                upgrade_levels: stats.upgrade_levels.clone(),
            },
            offers,
            choice_open_time: state.progression.choice_open_time(),
        }
    }
}
