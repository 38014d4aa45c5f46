//! Game settings and preferences
//!
//! Persisted as JSON. Every field has a default, so partial or older
//! files still load.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::HighScoreFile;
use crate::persistence::{self, PersistenceError};
use crate::sim::SessionConfig;

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "KILL_THE_FROG_CONFIG";
/// Environment variable overriding the RNG seed
pub const SEED_ENV: &str = "KILL_THE_FROG_SEED";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Session length in seconds
    pub game_duration_secs: f32,
    pub starting_lives: i32,

    // === Game area ===
    pub area_width: f32,
    pub area_height: f32,
    /// Spawn inset from every edge
    pub spawn_padding: f32,

    // === Simulation ===
    /// Fixed seed for reproducible runs; random when unset
    pub seed: Option<u64>,
    pub ticks_per_second: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Storage ===
    /// Override for the high score file
    pub high_score_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,
            starting_lives: STARTING_LIVES,

            area_width: AREA_WIDTH,
            area_height: AREA_HEIGHT,
            spawn_padding: SPAWN_PADDING,

            seed: None,
            ticks_per_second: (1.0 / SIM_DT).round() as u32,

            master_volume: 0.8,
            muted: false,

            high_score_path: None,
        }
    }
}

impl Settings {
    /// Session tunables derived from these settings
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            duration_secs: self.game_duration_secs.max(0.0),
            starting_lives: self.starting_lives.max(1),
            area: Vec2::new(self.area_width, self.area_height),
            spawn_padding: self.spawn_padding.max(0.0),
        }
    }

    /// Fixed simulation step
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.ticks_per_second.clamp(1, 1000) as f32
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_path
            .clone()
            .unwrap_or_else(HighScoreFile::default_path)
    }

    /// Strict load, for callers that care why it failed
    pub fn try_load_from(path: &Path) -> Result<Self, PersistenceError> {
        let json = persistence::read_text(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Settings from `KILL_THE_FROG_CONFIG` (if set), then the seed override
    pub fn from_env() -> Self {
        let mut settings = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => Self::default(),
        };
        if let Ok(raw) = std::env::var(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => settings.seed = Some(seed),
                Err(_) => log::warn!("Ignoring {SEED_ENV}={raw:?}: not a u64"),
            }
        }
        settings
    }

    pub fn save_to(&self, path: &Path) {
        let result = serde_json::to_string_pretty(self)
            .map_err(PersistenceError::from)
            .and_then(|json| persistence::write_text(path, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {e}"),
        }
    }
}
