//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected RNG only (seeded in tests)
//! - Stable iteration order (spawn order)
//! - No rendering, input, or platform dependencies

pub mod aabb;
pub mod collision;
pub mod particles;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{distance_points, first_obstacle_hit, orb_in_reach};
pub use state::{GameEvent, GameState, Obstacle, ObstacleKind, Orb, Particle, ParticleColor};
pub use tick::{TickInput, tick};
