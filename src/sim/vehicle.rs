//! The player's vehicle and its controller
//!
//! Velocity is a unitless scalar in [-max, max]. Acceleration and turning
//! scale with the frame delta, but translation does not: each frame the
//! vehicle moves exactly `velocity` units along its forward vector.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::{EntityId, WorldBounds};
use crate::tuning::Tuning;
use crate::{heading_to_forward, normalize_or_zero};

/// Directional intents for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

/// The controllable ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: EntityId,
    pub position: Vec3,
    /// Yaw about +Y (radians)
    pub heading: f32,
    pub velocity: f32,
    pub scale: f32,
    /// Model-space bounds at unit scale
    pub local_bounds: Aabb,
}

impl Vehicle {
    pub fn new(id: EntityId, local_bounds: Aabb, scale: f32) -> Self {
        // Rest the box on the ground plane
        let height = local_bounds.scaled(scale).size().y;
        Self {
            id,
            position: Vec3::new(0.0, height / 2.0, 0.0),
            heading: 0.0,
            velocity: 0.0,
            scale,
            local_bounds,
        }
    }

    /// World-space box for the current pose
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds
            .transformed(self.scale, self.heading, self.position)
    }

    /// Half the diagonal of the current world box
    pub fn radius(&self) -> f32 {
        self.world_bounds().half_diagonal()
    }

    pub fn forward(&self) -> Vec3 {
        heading_to_forward(self.heading)
    }

    /// forward × up; zero if forward is degenerate
    pub fn right(&self) -> Vec3 {
        normalize_or_zero(self.forward().cross(Vec3::Y))
    }

    /// Rotation of the vehicle's local frame
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Integrate one frame of throttle, steering and translation
    pub fn drive(&mut self, controls: Controls, dt_ms: f32, tuning: &Tuning) {
        let max = tuning.max_velocity;

        if controls.forward {
            self.velocity = (self.velocity + dt_ms * tuning.acceleration).clamp(-max, max);
        } else if controls.reverse {
            self.velocity = (self.velocity - dt_ms * tuning.acceleration).clamp(-max, max);
        } else {
            self.velocity *= tuning.drag;
        }

        // Turn rate follows the signed velocity, so steering flips in reverse
        let turn = tuning.turn_speed * dt_ms * self.velocity;
        if controls.left {
            self.heading += turn;
        } else if controls.right {
            self.heading -= turn;
        }

        self.position += self.forward() * self.velocity;
    }

    /// Keep the vehicle's bounding radius inside the ground plane on x/z
    pub fn clamp_to(&mut self, bounds: &WorldBounds) {
        let radius = self.radius();
        let extent = bounds.extent();
        self.position.x = clamp_axis(self.position.x, extent.min.x + radius, extent.max.x - radius);
        self.position.z = clamp_axis(self.position.z, extent.min.z + radius, extent.max.z - radius);
    }
}

/// Clamp that tolerates an empty range by pinning to its midpoint
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        value.clamp(lo, hi)
    }
}
