//! Per-frame simulation step
//!
//! Order within a frame: drive, clamp, detect, then resolve hits in list
//! order against the live level counter. A hit that clears a level lets a
//! later hit in the same frame count for the next level.

use std::collections::BTreeSet;

use super::attach;
use super::collision;
use super::state::{GameEvent, GameState};
use super::vehicle::Controls;
use crate::tuning::OffLevelPolicy;

/// Input for a single frame: the identifiers of every held key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: BTreeSet<String>,
}

impl TickInput {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            held: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }
}

impl Controls {
    /// Map key identifiers to driving intents; unknown keys are ignored
    pub fn from_input(input: &TickInput) -> Self {
        let any = |keys: &[&str]| keys.iter().any(|k| input.is_held(k));
        Self {
            forward: any(&["ArrowUp", "KeyW"]),
            reverse: any(&["ArrowDown", "KeyS"]),
            left: any(&["ArrowLeft", "KeyA"]),
            right: any(&["ArrowRight", "KeyD"]),
        }
    }
}

/// Advance the game by one rendered frame.
///
/// Does nothing until the vehicle is loaded. Returns the events of this
/// frame in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let Some(vehicle) = state.vehicle.as_mut() else {
        return events;
    };

    let dt_ms = if dt_ms.is_finite() && dt_ms >= 0.0 {
        dt_ms
    } else {
        log::warn!("Ignoring invalid frame delta {dt_ms}");
        0.0
    };

    state.frame += 1;

    vehicle.drive(Controls::from_input(input), dt_ms, &state.tuning);
    vehicle.clamp_to(&state.bounds);

    let hits = collision::detect(&vehicle.world_bounds(), &state.pickups);

    let mut blocked = false;
    for index in hits {
        let level = state.pickups[index].level;
        if level == state.progress.current {
            attach::resolve(vehicle, &mut state.pickups[index], state.tuning.attachment);
            events.push(GameEvent::PickupAttached {
                pickup: state.pickups[index].id,
                level,
            });
            events.extend(state.progress.check(&state.pickups));
        } else if state.tuning.off_level_policy == OffLevelPolicy::Damp {
            log::debug!("Struck off-level pickup {} (level {level})", state.pickups[index].id);
            blocked = true;
            events.push(GameEvent::ObstacleStruck {
                pickup: state.pickups[index].id,
                level,
            });
        }
    }

    if blocked {
        let factor = state.tuning.obstacle_damping;
        vehicle.velocity *= factor;
        events.push(GameEvent::VelocityDamped { factor });
    }

    events
}
