//! Level progression
//!
//! The counter only moves forward, one level per check, and stops at the
//! terminal level. Completion is reported exactly once.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, Pickup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Active level; pickups on it are collectable
    pub current: u32,
    /// Reaching this level ends the run
    pub terminal: u32,
    /// Set when the completion event has been emitted
    pub completed: bool,
}

impl LevelProgress {
    pub fn new(terminal: u32) -> Self {
        Self {
            current: 0,
            terminal,
            completed: false,
        }
    }

    /// Advance if every pickup on the active level is inert.
    ///
    /// Safe to call any number of times; does nothing once complete.
    pub fn check(&mut self, pickups: &[Pickup]) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.completed || self.current >= self.terminal {
            return events;
        }

        let cleared = pickups
            .iter()
            .filter(|p| p.level == self.current)
            .all(|p| p.inert);
        if !cleared {
            return events;
        }

        self.current += 1;
        log::info!("Level {} cleared, now on level {}", self.current - 1, self.current);
        events.push(GameEvent::LevelAdvanced {
            level: self.current,
        });

        if self.current == self.terminal {
            self.completed = true;
            log::info!("All {} levels cleared - game complete", self.terminal);
            events.push(GameEvent::GameComplete {
                level: self.current,
            });
        }

        events
    }
}
