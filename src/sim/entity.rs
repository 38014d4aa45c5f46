//! Shared entity capabilities
//!
//! Frogs and power-ups are both spawned, time-limited and clickable. The
//! scheduler treats them uniformly through [`Entity`] for hit-testing and
//! console labels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::square_contains;

/// Lifecycle of a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityState {
    /// On screen and clickable
    Alive,
    /// Hit by the player, playing its death animation (frogs only)
    BeingEliminated,
    /// Terminal; removed from the scheduler on the next sweep
    Dead,
}

/// Why an entity died. Exactly one cause is ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Eliminated,
    Collected,
    Expired,
}

/// Reference to a live entity held by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    Frog(u32),
    PowerUp(u32),
}

pub trait Entity {
    fn id(&self) -> u32;
    fn label(&self) -> Option<u8>;
    fn position(&self) -> Vec2;
    fn size(&self) -> f32;
    fn state(&self) -> EntityState;

    /// Anything not yet `Dead` still occupies the screen
    fn is_live(&self) -> bool {
        self.state() != EntityState::Dead
    }

    fn contains(&self, point: Vec2) -> bool {
        self.is_live() && square_contains(self.position(), self.size(), point)
    }
}
