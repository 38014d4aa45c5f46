//! Read-only frame snapshot
//!
//! Renderers pull one of these per frame instead of subscribing to state
//! changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::frog::FrogKind;
use super::powerup::PowerUpKind;
use super::state::{EndReason, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrogView {
    pub id: u32,
    pub label: Option<u8>,
    pub kind: FrogKind,
    pub pos: Vec2,
    pub size: f32,
    /// 0.0 alive, rising to 1.0 over the death animation
    pub death_progress: f32,
    /// Glow phase, 0.0 to 1.0
    pub pulse: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub label: Option<u8>,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    pub remaining: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub score: u32,
    pub lives: i32,
    pub time_remaining: f32,
    pub wave: u32,
    pub multiplier: f32,
    pub high_score: u32,
    /// The host's high score store accepted this session's score
    pub new_high_score: bool,
    pub is_playing: bool,
    pub end_reason: Option<EndReason>,
    pub slow_motion_remaining: f32,
    pub double_points_remaining: f32,
    pub area: Vec2,
    pub frogs: Vec<FrogView>,
    pub power_ups: Vec<PowerUpView>,
}

impl GameState {
    pub fn snapshot(&self, high_score: u32) -> FrameSnapshot {
        let now = self.clock;
        let difficulty = self.difficulty.snapshot();

        let frogs = self
            .spawner
            .frogs()
            .iter()
            .filter(|f| f.is_live())
            .map(|f| FrogView {
                id: f.id,
                label: f.label,
                kind: f.kind,
                pos: f.pos,
                size: f.size,
                death_progress: f.death_progress(now),
                pulse: f.pulse(now),
                remaining: f.remaining_lifetime(now) as f32,
            })
            .collect();

        let power_ups = self
            .spawner
            .power_ups()
            .iter()
            .filter(|p| p.is_live())
            .map(|p| PowerUpView {
                id: p.id,
                label: p.label,
                kind: p.kind,
                pos: p.pos,
                size: p.size,
                remaining: p.remaining_lifetime(now) as f32,
            })
            .collect();

        FrameSnapshot {
            score: self.session.score,
            lives: self.session.lives,
            time_remaining: self.session.time_remaining,
            wave: difficulty.current_wave,
            multiplier: difficulty.multiplier,
            high_score,
            new_high_score: false,
            is_playing: self.session.is_playing,
            end_reason: self.session.end_reason(),
            slow_motion_remaining: self.effects.remaining(PowerUpKind::SlowMotion, now) as f32,
            double_points_remaining: self.effects.remaining(PowerUpKind::DoublePoints, now)
                as f32,
            area: self.spawner.area(),
            frogs,
            power_ups,
        }
    }
}
