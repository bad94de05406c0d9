//! Fixed timestep simulation tick
//!
//! Per tick: shoot cooldown, firing, world update, collisions, wave check,
//! death check. While an upgrade choice is open only the cooldown (if
//! configured) and the choice timer advance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionEvents, check_collisions};
use super::entities::{AsteroidSize, Bullet};
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::progression::ProgressionController;

/// Control signals for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Desired facing (radians), None when there is no directional input
    pub target_angle: Option<f32>,
    pub thrust: bool,
    /// Fire whenever the cooldown allows
    pub fire: bool,
}

/// Routes collision consequences into the session
struct SessionEvents<'a> {
    progression: &'a mut ProgressionController,
    score: &'a mut u64,
    events: &'a mut Vec<GameEvent>,
}

impl CollisionEvents for SessionEvents<'_> {
    fn award_score(&mut self, points: u32) {
        *self.score += u64::from(points);
    }

    fn grant_xp(&mut self, amount: u32) {
        if self.progression.grant_xp(amount) > 0 {
            self.events.push(GameEvent::LevelUp {
                level: self.progression.stats().level,
            });
        }
    }

    fn damage_ship(&mut self, amount: i32) -> i32 {
        let hp_left = self.progression.damage(amount);
        self.events.push(GameEvent::ShipHit { hp_left });
        hp_left
    }

    fn asteroid_destroyed(&mut self, size: AsteroidSize, position: Vec2) {
        self.events.push(GameEvent::AsteroidDestroyed { size, position });
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.game_over {
        return;
    }
    state.time_ticks += 1;

    let paused = state.progression.is_paused();

    if !paused || state.settings.cooldown_runs_while_paused {
        state.shoot_cooldown = (state.shoot_cooldown - dt).max(0.0);
    }

    if paused {
        state.progression.tick_paused(dt);
    } else {
        if input.fire && !state.world.ship.is_dead() {
            try_fire(state);
        }

        state.world.update(dt, input, state.progression.stats());

        let explosion_radius = state.progression.stats().explosion_radius();
        let mut sink = SessionEvents {
            progression: &mut state.progression,
            score: &mut state.score,
            events: &mut state.events,
        };
        check_collisions(&mut state.world, explosion_radius, &mut sink);
    }

    if state.world.asteroids.is_empty() {
        let count = WAVE_SPAWN_MULTIPLIER + state.progression.stats().level;
        state.world.spawn_asteroids(count);
        state.events.push(GameEvent::WaveSpawned { count });
        log::info!("Wave cleared, spawning {} asteroids", count);
    }

    if state.world.ship.is_dead() {
        state.game_over = true;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over: score {} at level {} after {} ticks",
            state.score,
            state.progression.stats().level,
            state.time_ticks
        );
    }
}

/// Half-width of the multi-shot fan (degrees); counts past four fire straight
pub fn spread_degrees(count: u32) -> f32 {
    match count {
        2 => 8.0,
        3 => 12.0,
        4 => 16.0,
        _ => 0.0,
    }
}

/// Angle offsets (radians) for a volley of `count` bullets, evenly spanning the fan
pub fn volley_offsets(count: u32) -> Vec<f32> {
    if count <= 1 {
        return vec![0.0; count as usize];
    }
    let max = spread_degrees(count).to_radians();
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32;
            -max + (2.0 * max) * t
        })
        .collect()
}

fn try_fire(state: &mut GameState) {
    if state.shoot_cooldown > 0.0 {
        return;
    }

    let stats = state.progression.stats();
    let count = 1 + stats.multi_shot_level;
    let (nose, angle) = (state.world.ship.nose, state.world.ship.angle);

    for offset in volley_offsets(count) {
        state.world.add_bullet(Bullet::new(nose, angle + offset, stats));
    }

    state.shoot_cooldown = stats.fire_cooldown;
    state.events.push(GameEvent::ShotFired { bullets: count });
}
