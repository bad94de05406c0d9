//! Entity ownership and per-tick advancement
//!
//! Asteroid additions and removals requested mid-pass are queued and only
//! committed at the end of `update`, removals first. The collision pass can
//! therefore split and chain-destroy asteroids while it walks the live list,
//! and freshly split fragments are never visible until the next tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{Asteroid, AsteroidSize, Bullet, EntityId, Particle, Ship};
use super::tick::TickInput;
use super::wrap::WorldBounds;
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::progression::PlayerStats;

/// Spawn attempts per asteroid before the guard gives up
const MAX_SPAWN_REROLLS: u32 = 64;

/// Inside the spawn guard box around the ship (both axes within range)
fn near_ship(ship: Vec2, point: Vec2) -> bool {
    (point.x - ship.x).abs() <= SPAWN_SAFE_DISTANCE && (point.y - ship.y).abs() <= SPAWN_SAFE_DISTANCE
}

/// Owns every entity in the world
#[derive(Debug, Clone)]
pub struct WorldManager {
    pub ship: Ship,
    /// Live asteroids
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    asteroids_to_add: Vec<Asteroid>,
    asteroids_to_remove: Vec<EntityId>,
    bounds: WorldBounds,
    max_particles: usize,
    rng: Pcg32,
    next_id: EntityId,
}

impl WorldManager {
    /// Empty world with the ship parked at the center
    pub fn new(bounds: WorldBounds, seed: u64, max_particles: usize) -> Self {
        Self {
            ship: Ship::new(bounds.center()),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            asteroids_to_add: Vec::new(),
            asteroids_to_remove: Vec::new(),
            bounds,
            max_particles,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn set_bounds(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance every entity, then commit queued asteroid changes
    pub fn update(&mut self, dt: f32, input: &TickInput, stats: &PlayerStats) {
        let bounds = self.bounds;

        self.ship.update(dt, input, stats, &bounds);

        for asteroid in &mut self.asteroids {
            asteroid.update(dt, &bounds);
        }

        for bullet in &mut self.bullets {
            bullet.update(dt, &bounds);
        }
        self.bullets.retain(|b| b.active);

        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(|p| p.active);

        self.flush_deferred();
    }

    /// Removals before additions: a fragment queued this tick can't be caught by a removal
    fn flush_deferred(&mut self) {
        if !self.asteroids_to_remove.is_empty() {
            let remove = std::mem::take(&mut self.asteroids_to_remove);
            self.asteroids.retain(|a| !remove.contains(&a.id));
        }
        self.asteroids.append(&mut self.asteroids_to_add);
    }

    /// Build an asteroid with a fresh ID (not yet in the world)
    pub fn create_asteroid(&mut self, size: AsteroidSize, position: Vec2) -> Asteroid {
        let id = self.next_entity_id();
        Asteroid::new(id, size, position, &mut self.rng)
    }

    /// Spawn `count` large asteroids at random points away from the ship.
    ///
    /// A point is only re-rolled when it is within `SPAWN_SAFE_DISTANCE` of the
    /// ship on both axes at once, so spawns close on a single axis slip through.
    /// After `MAX_SPAWN_REROLLS` misses the last point is kept, so a world
    /// no bigger than the guard box still finishes spawning.
    pub fn spawn_asteroids(&mut self, count: u32) {
        let ship_pos = self.ship.position;

        for _ in 0..count {
            let mut pos = self.random_point();
            let mut rerolls = 0;
            while near_ship(ship_pos, pos) && rerolls < MAX_SPAWN_REROLLS {
                pos = self.random_point();
                rerolls += 1;
            }
            let asteroid = self.create_asteroid(AsteroidSize::Large, pos);
            self.asteroids.push(asteroid);
        }
    }

    fn random_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(0.0..=self.bounds.width),
            self.rng.random_range(0.0..=self.bounds.height),
        )
    }

    /// Queue an asteroid for addition at the end of the tick
    pub fn add_asteroid(&mut self, asteroid: Asteroid) {
        self.asteroids_to_add.push(asteroid);
    }

    /// Queue an asteroid for removal at the end of the tick
    pub fn remove_asteroid(&mut self, id: EntityId) {
        self.asteroids_to_remove.push(id);
    }

    /// Remove a live asteroid right away (collision hits)
    pub fn remove_asteroid_now(&mut self, id: EntityId) -> Option<Asteroid> {
        let idx = self.asteroids.iter().position(|a| a.id == id)?;
        Some(self.asteroids.remove(idx))
    }

    pub fn pending_additions(&self) -> &[Asteroid] {
        &self.asteroids_to_add
    }

    pub fn pending_removals(&self) -> &[EntityId] {
        &self.asteroids_to_remove
    }

    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// Burst of particles flying out in random directions
    pub fn spawn_particles(&mut self, position: Vec2, count: usize) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(1.0..=PARTICLE_SPEED);
            self.particles
                .push(Particle::new(position, polar_to_cartesian(speed, angle)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> WorldManager {
        WorldManager::new(WorldBounds::default(), 42, 1000)
    }

    #[test]
    fn test_ship_starts_centered() {
        let world = world();
        assert_eq!(world.ship.position, Vec2::new(640.0, 360.0));
        assert!(world.asteroids.is_empty());
    }

    #[test]
    fn test_spawn_asteroids_in_bounds_with_unique_ids() {
        let mut world = world();
        world.spawn_asteroids(50);
        assert_eq!(world.asteroids.len(), 50);
        let bounds = *world.bounds();
        for a in &world.asteroids {
            assert_eq!(a.size, AsteroidSize::Large);
            assert!(bounds.contains(a.position));
            assert!(!near_ship(world.ship.position, a.position));
        }
        let ids: HashSet<_> = world.asteroids.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_spawn_guard_only_checks_both_axes_together() {
        let ship = Vec2::new(640.0, 360.0);
        assert!(near_ship(ship, ship + Vec2::new(5.0, 5.0)));
        assert!(near_ship(ship, ship - Vec2::splat(SPAWN_SAFE_DISTANCE)));
        // Close on one axis only is accepted
        assert!(!near_ship(ship, ship + Vec2::new(5.0, 500.0)));
        assert!(!near_ship(ship, ship + Vec2::new(-500.0, 0.0)));
    }

    #[test]
    fn test_spawn_finishes_when_world_fits_inside_guard() {
        // Every point is within the guard box, so each spawn runs out of rerolls
        for size in [20.0, 5.0] {
            let mut world = WorldManager::new(WorldBounds::new(size, size), 3, 10);
            world.spawn_asteroids(4);
            assert_eq!(world.asteroids.len(), 4);
            for a in &world.asteroids {
                assert!(world.bounds().contains(a.position));
            }
        }
    }

    #[test]
    fn test_spawn_guard_rerolls_in_tiny_world() {
        // 30x30 world with the ship at the center: most points are rejected
        let mut world = WorldManager::new(WorldBounds::new(30.0, 30.0), 9, 10);
        world.spawn_asteroids(20);
        for a in &world.asteroids {
            let dx = (a.position.x - 15.0).abs();
            let dy = (a.position.y - 15.0).abs();
            assert!(dx > SPAWN_SAFE_DISTANCE || dy > SPAWN_SAFE_DISTANCE);
        }
    }

    #[test]
    fn test_additions_are_deferred_until_update() {
        let mut world = world();
        let a = world.create_asteroid(AsteroidSize::Medium, Vec2::new(100.0, 100.0));
        world.add_asteroid(a);
        assert!(world.asteroids.is_empty());
        assert_eq!(world.pending_additions().len(), 1);

        world.update(DT, &TickInput::default(), &PlayerStats::default());
        assert_eq!(world.asteroids.len(), 1);
        assert!(world.pending_additions().is_empty());
    }

    #[test]
    fn test_removals_are_deferred_and_flushed_first() {
        let mut world = world();
        world.spawn_asteroids(3);
        let victim = world.asteroids[1].id;
        world.remove_asteroid(victim);
        assert_eq!(world.asteroids.len(), 3);

        // A fragment queued in the same tick survives the flush
        let fragment = world.create_asteroid(AsteroidSize::Small, Vec2::new(10.0, 10.0));
        let fragment_id = fragment.id;
        world.add_asteroid(fragment);

        world.update(DT, &TickInput::default(), &PlayerStats::default());
        assert_eq!(world.asteroids.len(), 3);
        assert!(world.asteroids.iter().all(|a| a.id != victim));
        assert!(world.asteroids.iter().any(|a| a.id == fragment_id));
        assert!(world.pending_removals().is_empty());
    }

    #[test]
    fn test_remove_now() {
        let mut world = world();
        world.spawn_asteroids(2);
        let id = world.asteroids[0].id;
        assert_eq!(world.remove_asteroid_now(id).map(|a| a.id), Some(id));
        assert_eq!(world.asteroids.len(), 1);
        assert!(world.remove_asteroid_now(id).is_none());
    }

    #[test]
    fn test_inactive_bullets_and_particles_are_culled() {
        let mut world = world();
        let stats = PlayerStats::default();
        world.add_bullet(Bullet::new(Vec2::new(5.0, 5.0), 0.0, &stats));
        world.spawn_particles(Vec2::new(50.0, 50.0), 10);
        assert_eq!(world.particles.len(), 10);

        // 0.6 s > particle lifetime, < bullet range
        for _ in 0..36 {
            world.update(DT, &TickInput::default(), &stats);
        }
        assert!(world.particles.is_empty());
        assert_eq!(world.bullets.len(), 1);

        for _ in 0..120 {
            world.update(DT, &TickInput::default(), &stats);
        }
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_particle_speeds_and_cap() {
        let mut world = WorldManager::new(WorldBounds::default(), 1, 15);
        world.spawn_particles(Vec2::ZERO, 10);
        world.spawn_particles(Vec2::ZERO, 10);
        assert_eq!(world.particles.len(), 15);
        for p in &world.particles {
            let speed = p.velocity.length();
            assert!(speed >= 1.0 - 1e-3 && speed <= PARTICLE_SPEED + 1e-3);
        }
    }

    #[test]
    fn test_update_moves_ship_and_asteroids() {
        let mut world = world();
        world.spawn_asteroids(1);
        let before = world.asteroids[0].position;
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        world.update(DT, &thrust, &PlayerStats::default());
        assert_ne!(world.asteroids[0].position, before);
        assert!(world.ship.velocity.length() > 0.0);
    }
}
