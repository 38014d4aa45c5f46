//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Sim clock only (advanced by `tick`)
//! - Seeded RNG only
//! - No rendering, audio or filesystem dependencies

pub mod difficulty;
pub mod entity;
pub mod frog;
pub mod powerup;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use difficulty::{DifficultyCurve, DifficultySnapshot};
pub use entity::{DeathCause, Entity, EntityRef, EntityState};
pub use frog::{Frog, FrogKind, FrogStats};
pub use powerup::{PowerUp, PowerUpEffects, PowerUpKind};
pub use session::{SessionConfig, SessionContext, SessionState};
pub use snapshot::{FrameSnapshot, FrogView, PowerUpView};
pub use spawn::SpawnScheduler;
pub use state::{EndReason, GameEvent, GameState};
pub use tick::{PlayerAction, TickInput, tick};
