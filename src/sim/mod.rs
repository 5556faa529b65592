//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta and held keys are the only inputs
//! - Seeded RNG only, and only at world build time
//! - Stable iteration order (pickup spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod attach;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;
pub mod vehicle;
pub mod world;

pub use aabb::Aabb;
pub use level::LevelProgress;
pub use state::{EntityId, GameEvent, GameState, Pickup, WorldBounds};
pub use tick::{TickInput, tick};
pub use vehicle::{Controls, Vehicle};
pub use world::{InitError, LevelLayout, VehicleLayout, WorldLayout, initialize};
