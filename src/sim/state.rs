//! Game state and core simulation types
//!
//! Everything a host needs to snapshot or render lives here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level::LevelProgress;
use super::vehicle::Vehicle;
use crate::tuning::Tuning;

/// Identifier shared by the vehicle and pickups
pub type EntityId = u32;

/// Ground plane extent; fixed after initialization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds(Aabb);

impl WorldBounds {
    /// Flat square centred on the origin
    pub fn square(half_extent: f32) -> Self {
        Self(Aabb::new(
            Vec3::new(-half_extent, 0.0, -half_extent),
            Vec3::new(half_extent, 0.0, half_extent),
        ))
    }

    pub fn extent(&self) -> &Aabb {
        &self.0
    }
}

/// A collectible object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    /// Level this pickup must be collected in
    pub level: u32,
    /// World position while free; ignored once attached
    pub position: Vec3,
    pub scale: f32,
    /// Model-space bounds at unit scale
    pub local_bounds: Aabb,
    /// Once set, never cleared; inert pickups are skipped by collision
    pub inert: bool,
    /// Vehicle this pickup is stuck to
    pub attached_to: Option<EntityId>,
    /// Offset in the attached vehicle's frame (translation + yaw)
    pub local_offset: Vec3,
}

impl Pickup {
    pub fn new(id: EntityId, level: u32, position: Vec3, scale: f32, local_bounds: Aabb) -> Self {
        Self {
            id,
            level,
            position,
            scale,
            local_bounds,
            inert: false,
            attached_to: None,
            local_offset: Vec3::ZERO,
        }
    }

    /// World-space box at the pickup's free position
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds
            .scaled(self.scale)
            .translated(self.position)
    }

    /// Bind to the vehicle; the offset is given in world orientation
    pub fn attach(&mut self, vehicle: &Vehicle, world_offset: Vec3) {
        self.inert = true;
        self.attached_to = Some(vehicle.id);
        self.local_offset = vehicle.rotation().inverse() * world_offset;
    }

    /// Where the renderer should draw this pickup
    pub fn world_position(&self, vehicle: &Vehicle) -> Vec3 {
        match self.attached_to {
            Some(id) if id == vehicle.id => vehicle.position + vehicle.rotation() * self.local_offset,
            _ => self.position,
        }
    }
}

/// Notable things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A pickup on the active level stuck to the vehicle
    PickupAttached { pickup: EntityId, level: u32 },
    /// The vehicle hit a pickup from another level
    ObstacleStruck { pickup: EntityId, level: u32 },
    /// Velocity was scaled down after obstacle hits
    VelocityDamped { factor: f32 },
    /// The level counter moved to `level`
    LevelAdvanced { level: u32 },
    /// The final level was cleared; fires once per run
    GameComplete { level: u32 },
}

/// Complete simulation state, owned by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub bounds: WorldBounds,
    /// `None` until the vehicle model has loaded
    pub vehicle: Option<Vehicle>,
    /// In spawn order; entries are never removed
    pub pickups: Vec<Pickup>,
    pub progress: LevelProgress,
    /// Number of ticks simulated with a ready vehicle
    pub frame: u64,
    next_id: EntityId,
}

impl GameState {
    /// Empty world waiting for assets; ticking it does nothing
    pub fn loading(tuning: Tuning, bounds: WorldBounds) -> Self {
        let progress = LevelProgress::new(tuning.terminal_level);
        Self {
            tuning,
            bounds,
            vehicle: None,
            pickups: Vec::new(),
            progress,
            frame: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_ready(&self) -> bool {
        self.vehicle.is_some()
    }

    /// Place the vehicle, making the state tickable
    pub fn spawn_vehicle(&mut self, local_bounds: Aabb, scale: f32) -> EntityId {
        let id = self.next_entity_id();
        self.vehicle = Some(Vehicle::new(id, local_bounds, scale));
        id
    }

    pub fn spawn_pickup(&mut self, level: u32, position: Vec3, scale: f32, local_bounds: Aabb) -> EntityId {
        let id = self.next_entity_id();
        self.pickups
            .push(Pickup::new(id, level, position, scale, local_bounds));
        id
    }

    pub fn level(&self) -> u32 {
        self.progress.current
    }

    pub fn is_complete(&self) -> bool {
        self.progress.completed
    }

    /// Pickups on `level` that have not been collected yet
    pub fn remaining_in_level(&self, level: u32) -> usize {
        self.pickups
            .iter()
            .filter(|p| p.level == level && !p.inert)
            .count()
    }

    /// Pickups stuck to the vehicle, in the order they were spawned
    pub fn attached_pickups(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter().filter(|p| p.attached_to.is_some())
    }
}
