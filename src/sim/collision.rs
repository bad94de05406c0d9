//! Collision detection and the destruction cascade
//!
//! Two passes per tick: bullets against asteroid outlines (point-in-polygon),
//! then the ship against asteroid circles. Destroyed asteroids split into
//! deferred children, and with the explosion upgrade every destruction can
//! take nearby small asteroids with it.

use glam::Vec2;

use super::entities::{AsteroidSize, EntityId};
use super::world::WorldManager;
use crate::consts::*;

/// Receiver for the gameplay consequences of collisions
pub trait CollisionEvents {
    fn award_score(&mut self, points: u32);

    /// XP before any magnet bonus
    fn grant_xp(&mut self, amount: u32);

    /// Apply damage to the ship, returning the HP left
    fn damage_ship(&mut self, amount: i32) -> i32;

    /// Hook for feedback (sound, screen shake); called once per destroyed asteroid
    fn asteroid_destroyed(&mut self, _size: AsteroidSize, _position: Vec2) {}
}

/// What a collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub asteroids_destroyed: u32,
    pub ship_hit: bool,
}

/// An asteroid that has left play and still needs its consequences applied
#[derive(Debug, Clone, Copy)]
struct Destroyed {
    size: AsteroidSize,
    position: Vec2,
}

/// Run both collision passes against the current world.
/// `explosion_radius` comes from [`crate::progression::PlayerStats::explosion_radius`].
pub fn check_collisions<E: CollisionEvents>(
    world: &mut WorldManager,
    explosion_radius: Option<f32>,
    events: &mut E,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    if world.ship.is_dead() {
        return report;
    }

    bullet_pass(world, explosion_radius, events, &mut report);
    ship_pass(world, events, &mut report);

    report
}

fn bullet_pass<E: CollisionEvents>(
    world: &mut WorldManager,
    explosion_radius: Option<f32>,
    events: &mut E,
    report: &mut CollisionReport,
) {
    for b in 0..world.bullets.len() {
        if !world.bullets[b].active {
            continue;
        }
        let point = world.bullets[b].position;

        let mut i = 0;
        while i < world.asteroids.len() {
            let asteroid = &world.asteroids[i];
            if !asteroid.active || !asteroid.outline.contains(point) {
                i += 1;
                continue;
            }

            // Out of the live list right away; `i` now indexes the next asteroid
            let hit = world.asteroids.remove(i);
            let destroyed = Destroyed {
                size: hit.size,
                position: hit.position,
            };
            report.asteroids_destroyed += destroy(world, destroyed, explosion_radius, events);

            let bullet = &mut world.bullets[b];
            if bullet.remaining_hits > 0 {
                bullet.remaining_hits -= 1;
            } else {
                bullet.active = false;
                break;
            }
        }
    }

    world.bullets.retain(|b| b.active);
}

fn ship_pass<E: CollisionEvents>(
    world: &mut WorldManager,
    events: &mut E,
    report: &mut CollisionReport,
) {
    let ship_pos = world.ship.position;
    let Some(idx) = world
        .asteroids
        .iter()
        .position(|a| a.active && ship_pos.distance(a.position) < SHIP_SIZE + a.radius())
    else {
        return;
    };

    // One hit per tick, even with several overlaps
    world.asteroids.remove(idx);
    report.ship_hit = true;

    let hp = events.damage_ship(1);
    world.spawn_particles(ship_pos, SHIP_HIT_PARTICLES);
    log::debug!("Ship hit, {} hp left", hp);

    if hp <= 0 {
        world.ship.dead = true;
        world.spawn_particles(ship_pos, SHIP_DEATH_PARTICLES);
    }
}

/// Apply destruction consequences for `first` and everything its explosions chain into.
/// Returns the number of asteroids destroyed.
fn destroy<E: CollisionEvents>(
    world: &mut WorldManager,
    first: Destroyed,
    explosion_radius: Option<f32>,
    events: &mut E,
) -> u32 {
    let mut pending = vec![first];
    let mut count = 0;

    while let Some(dead) = pending.pop() {
        count += 1;
        world.spawn_particles(dead.position, DESTRUCTION_PARTICLES);
        events.grant_xp(dead.size.xp_value());
        events.award_score(dead.size.score());
        events.asteroid_destroyed(dead.size, dead.position);
        log::debug!("Destroyed {:?} asteroid at {}", dead.size, dead.position);

        if let Some(child) = dead.size.split() {
            for _ in 0..2 {
                let fragment = world.create_asteroid(child, dead.position);
                world.add_asteroid(fragment);
            }
        }

        let Some(radius) = explosion_radius else {
            continue;
        };

        // Only small asteroids chain, and each is deactivated before it is queued
        let mut chained: Vec<EntityId> = Vec::new();
        for nearby in &mut world.asteroids {
            if nearby.active
                && nearby.size == AsteroidSize::Small
                && nearby.position.distance(dead.position) <= radius
            {
                nearby.active = false;
                chained.push(nearby.id);
                pending.push(Destroyed {
                    size: nearby.size,
                    position: nearby.position,
                });
            }
        }
        for id in chained {
            world.remove_asteroid(id);
        }
    }

    count
}
