//! Kill The Frog - A real-time whack-the-frog arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, difficulty, session)
//! - `renderer`: Renderer contract and terminal renderer
//! - `platform`: Frame clock and input mapping
//! - `audio`: Fire-and-forget audio cues
//! - `highscores`: Plain-integer high score persistence
//! - `persistence`: Small-file read/write helpers
//! - `settings`: JSON configuration

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreFile, MemoryHighScore, ScorePersistence};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Session defaults
    pub const GAME_DURATION_SECS: f32 = 60.0;
    pub const STARTING_LIVES: i32 = 3;

    /// Game area (pixels)
    pub const AREA_WIDTH: f32 = 800.0;
    pub const AREA_HEIGHT: f32 = 600.0;
    /// Inset applied to spawn positions so entities never hang off-screen
    pub const SPAWN_PADDING: f32 = 50.0;

    /// Frog spawn cadence
    pub const FROG_INITIAL_DELAY: f64 = 1.0;
    pub const FROG_MIN_SPAWN_INTERVAL: f32 = 0.8;
    pub const FROG_MAX_SPAWN_INTERVAL: f32 = 2.0;
    /// Death animation window after a successful hit
    pub const FROG_DEATH_ANIMATION: f64 = 0.3;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_LIFETIME: f64 = 5.0;
    pub const POWERUP_SPAWN_INTERVAL: f64 = 15.0;
    pub const POWERUP_EFFECT_DURATION: f64 = 10.0;

    /// Console labels run 1..=MAX_LABEL
    pub const MAX_LABEL: u8 = 9;
}

/// Axis-aligned square test centred on `center`.
///
/// Left/top edges are inclusive, right/bottom exclusive, so two touching
/// entities never both claim the shared edge.
#[inline]
pub fn square_contains(center: Vec2, size: f32, point: Vec2) -> bool {
    let half = size / 2.0;
    let min = center - Vec2::splat(half);
    point.x >= min.x && point.y >= min.y && point.x < min.x + size && point.y < min.y + size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_contains_edges() {
        let c = Vec2::new(100.0, 100.0);
        assert!(square_contains(c, 50.0, c));
        assert!(square_contains(c, 50.0, Vec2::new(75.0, 75.0)));
        assert!(!square_contains(c, 50.0, Vec2::new(125.0, 100.0)));
        assert!(!square_contains(c, 50.0, Vec2::new(100.0, 74.9)));
    }
}
