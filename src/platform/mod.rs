//! Platform abstraction layer
//!
//! Handles the native terminal side of:
//! - Time/ticks (fixed-step frame clock)
//! - Input events (keys, mouse, typed selections)

pub mod input;
pub mod time;

pub use input::{Command, map_event, parse_selection};
pub use time::FrameClock;
