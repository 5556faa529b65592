//! Data-driven game balance
//!
//! Tuning values and the world layout are loaded together as one JSON
//! document. Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::world::WorldLayout;

/// What happens when the vehicle hits a pickup that is not on the active level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffLevelPolicy {
    /// Pass through it with no effect
    Ignore,
    /// Treat it as an obstacle and damp velocity once per frame
    #[default]
    Damp,
}

/// How a collected pickup is placed on the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentStrategy {
    /// Contact point pushed to the side of the vehicle it was hit on
    #[default]
    SurfaceSide,
    /// Surface-side direction, distance set by the box overlap
    OverlapScaled,
    /// On the vehicle's bounding sphere, along the centre-to-centre direction
    Radial,
}

/// Physics and rules constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Velocity gained per millisecond of throttle
    pub acceleration: f32,
    /// Per-frame velocity multiplier while coasting (0..1)
    pub drag: f32,
    /// Radians per millisecond per unit of velocity
    pub turn_speed: f32,
    /// Absolute velocity cap
    pub max_velocity: f32,
    /// Velocity multiplier after striking an off-level pickup (0..1)
    pub obstacle_damping: f32,
    pub off_level_policy: OffLevelPolicy,
    pub attachment: AttachmentStrategy,
    /// Completing this many levels ends the run
    pub terminal_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            drag: DRAG,
            turn_speed: TURN_SPEED,
            max_velocity: MAX_VELOCITY,
            obstacle_damping: OBSTACLE_DAMPING,
            off_level_policy: OffLevelPolicy::default(),
            attachment: AttachmentStrategy::default(),
            terminal_level: TERMINAL_LEVEL,
        }
    }
}

impl Tuning {
    /// Check ranges that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &str) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if !(self.acceleration.is_finite() && self.acceleration >= 0.0) {
            return Err(invalid("acceleration", "must be finite and >= 0"));
        }
        // Zero drag would stop the vehicle dead instead of decaying
        if !(self.drag > 0.0 && self.drag < 1.0) {
            return Err(invalid("drag", "must be in (0, 1)"));
        }
        if !self.turn_speed.is_finite() {
            return Err(invalid("turn_speed", "must be finite"));
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return Err(invalid("max_velocity", "must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.obstacle_damping) {
            return Err(invalid("obstacle_damping", "must be in [0, 1]"));
        }
        if self.terminal_level == 0 {
            return Err(invalid("terminal_level", "must be at least 1"));
        }
        Ok(())
    }
}

/// Everything needed to build a world: rules plus layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub layout: WorldLayout,
}

impl GameConfig {
    /// Parse and validate a JSON config; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        self.tuning.validate()?;
        self.layout.validate(self.tuning.terminal_level)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// Malformed JSON
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value outside its allowed range
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tuning.terminal_level, 2);
        assert_eq!(config.layout.levels.len(), 2);
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{ "tuning": { "drag": 0.5, "off_level_policy": "ignore", "attachment": "radial" } }"#;
        let config = GameConfig::from_json(json).unwrap();

        assert_eq!(config.tuning.drag, 0.5);
        assert_eq!(config.tuning.off_level_policy, OffLevelPolicy::Ignore);
        assert_eq!(config.tuning.attachment, AttachmentStrategy::Radial);
        // Untouched fields keep defaults
        assert_eq!(config.tuning.acceleration, ACCELERATION);
        assert_eq!(config.layout.levels.len(), 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_json(r#"{ "tuning": { "drag": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "drag", .. }));

        let err = GameConfig::from_json(r#"{ "tuning": { "drag": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "drag", .. }));

        let err = GameConfig::from_json(r#"{ "tuning": { "terminal_level": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "terminal_level", .. }));

        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_policy() {
        let mut config = GameConfig::default();
        config.tuning.attachment = AttachmentStrategy::OverlapScaled;
        let json = config.to_json().unwrap();
        assert!(json.contains("overlap_scaled"));
        let back = GameConfig::from_json(&json).unwrap();
        assert_eq!(back.tuning, config.tuning);
    }
}
