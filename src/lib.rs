//! Ball Collector - drive a ball over a plane, stick pickups to it
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle, collisions, attachment, levels)
//! - `tuning`: Data-driven game balance and world layout config
//! - `assets`: Seam to the external model loader
//! - `web`: Browser host glue (wasm32 only)

pub mod assets;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use assets::{AssetError, ModelSource, StaticModels};
pub use tuning::{AttachmentStrategy, GameConfig, OffLevelPolicy, Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Velocity gained per millisecond of held throttle
    pub const ACCELERATION: f32 = 0.0001;
    /// Per-frame multiplicative velocity decay with no throttle held
    pub const DRAG: f32 = 0.98;
    /// Heading change per millisecond per unit of velocity (radians)
    pub const TURN_SPEED: f32 = 0.01;
    /// Velocity is clamped to [-MAX_VELOCITY, MAX_VELOCITY]
    pub const MAX_VELOCITY: f32 = 1.0;
    /// Velocity multiplier applied once per frame after striking an off-level pickup
    pub const OBSTACLE_DAMPING: f32 = 0.9;
    /// Level count at which the run is complete
    pub const TERMINAL_LEVEL: u32 = 2;

    /// Ground plane is a square centred on the origin
    pub const WORLD_HALF_EXTENT: f32 = 50.0;
    /// Model scale applied to the vehicle
    pub const VEHICLE_SCALE: f32 = 2.0;

    /// Vectors shorter than this are treated as zero
    pub const EPSILON: f32 = 1.0e-6;
}

/// Unit vector the vehicle faces at the given yaw (radians about +Y).
///
/// Yaw 0 faces +Z, matching the scene convention of the rendering host.
#[inline]
pub fn heading_to_forward(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, heading.cos())
}

/// Wrap an angle to [-π, π)
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Normalize, or return zero for vectors too short to carry a direction
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    if v.length_squared() <= consts::EPSILON * consts::EPSILON {
        Vec3::ZERO
    } else {
        v.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-6);
        assert_eq!(wrap_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(normalize_or_zero(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(normalize_or_zero(Vec3::new(0.0, 0.0, 3.0)), Vec3::Z);
    }
}
