//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the live collections)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod entities;
pub mod outline;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;
pub mod wrap;

pub use collision::{CollisionEvents, CollisionReport, check_collisions};
pub use entities::{Asteroid, AsteroidSize, Bullet, EntityId, Particle, Ship};
pub use outline::Outline;
pub use snapshot::RenderSnapshot;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick, volley_offsets};
pub use world::WorldManager;
pub use wrap::WorldBounds;
