//! Session state: score, lives and the countdown
//!
//! Mutated only through the event methods below. A fresh session is begun
//! with [`SessionState::start`], which resets every field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyCurve, DifficultySnapshot};
use super::powerup::PowerUpEffects;
use super::state::{EndReason, GameEvent};
use crate::consts::*;

/// Per-session tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub duration_secs: f32,
    pub starting_lives: i32,
    /// Game area size in pixels
    pub area: Vec2,
    pub spawn_padding: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: GAME_DURATION_SECS,
            starting_lives: STARTING_LIVES,
            area: Vec2::new(AREA_WIDTH, AREA_HEIGHT),
            spawn_padding: SPAWN_PADDING,
        }
    }
}

/// Score/lives/time aggregate for one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub lives: i32,
    pub time_remaining: f32,
    pub is_playing: bool,
    /// Sim clock value at `start`
    pub started_at: f64,
    duration_secs: f32,
    starting_lives: i32,
    end_reason: Option<EndReason>,
}

impl SessionState {
    /// Idle session (not playing until `start`)
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            score: 0,
            lives: config.starting_lives,
            time_remaining: config.duration_secs,
            is_playing: false,
            started_at: 0.0,
            duration_secs: config.duration_secs,
            starting_lives: config.starting_lives,
            end_reason: None,
        }
    }

    pub fn start(&mut self, now: f64, difficulty: &mut DifficultyCurve, events: &mut Vec<GameEvent>) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.time_remaining = self.duration_secs;
        self.is_playing = true;
        self.started_at = now;
        self.end_reason = None;
        difficulty.reset();

        log::info!(
            "Session started: {}s, {} lives",
            self.duration_secs,
            self.starting_lives
        );
        events.push(GameEvent::SessionStarted);
    }

    /// Seconds since `start`
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    /// Advance the countdown and refresh the derived modifiers
    pub fn tick(
        &mut self,
        dt: f32,
        now: f64,
        effects: &mut PowerUpEffects,
        difficulty: &mut DifficultyCurve,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.is_playing {
            return;
        }

        effects.update(now);

        let previous_wave = difficulty.current_wave();
        let snapshot = difficulty.update(self.elapsed(now));
        if snapshot.current_wave != previous_wave {
            log::info!(
                "Wave {} (multiplier {:.1})",
                snapshot.current_wave,
                snapshot.multiplier
            );
            events.push(GameEvent::WaveAdvanced {
                wave: snapshot.current_wave,
            });
        }

        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.end(EndReason::OutOfTime, events);
        }
    }

    /// Score pipeline: power-up multiplier first, then the wave bonus.
    /// Returns the points actually added.
    pub fn add_score(
        &mut self,
        raw: u32,
        effects: &PowerUpEffects,
        difficulty: &DifficultySnapshot,
    ) -> u32 {
        if !self.is_playing {
            return 0;
        }
        let points = difficulty.score_bonus(effects.apply_points_multiplier(raw));
        self.score = self.score.saturating_add(points);
        points
    }

    /// A frog escaped
    pub fn miss(&mut self, events: &mut Vec<GameEvent>) {
        if !self.is_playing {
            return;
        }
        self.lives -= 1;
        if self.lives <= 0 {
            self.end(EndReason::OutOfLives, events);
        }
    }

    /// Uncapped
    pub fn add_life(&mut self) {
        if !self.is_playing {
            return;
        }
        self.lives += 1;
    }

    /// Ends the session once; later calls are ignored
    pub fn end(&mut self, reason: EndReason, events: &mut Vec<GameEvent>) {
        if !self.is_playing {
            return;
        }
        self.is_playing = false;
        self.end_reason = Some(reason);
        log::info!("Session over ({:?}), final score {}", reason, self.score);
        events.push(GameEvent::SessionEnded {
            score: self.score,
            reason,
        });
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
    }
}

/// Everything an entity may touch while reacting to a hit or expiry.
///
/// Built fresh by [`GameState`](super::GameState) for each tick or action;
/// nothing here outlives the call.
pub struct SessionContext<'a> {
    pub now: f64,
    pub session: &'a mut SessionState,
    pub effects: &'a mut PowerUpEffects,
    pub difficulty: DifficultySnapshot,
    pub events: &'a mut Vec<GameEvent>,
}

impl SessionContext<'_> {
    /// Run raw points through the scoring pipeline
    pub fn award(&mut self, raw: u32) -> u32 {
        self.session.add_score(raw, self.effects, &self.difficulty)
    }

    pub fn miss(&mut self) {
        self.session.miss(self.events);
    }
}
