//! Frogs: the targets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultySnapshot;
use super::entity::{DeathCause, Entity, EntityState};
use super::powerup::PowerUpEffects;
use super::session::SessionContext;
use super::state::GameEvent;
use crate::consts::FROG_DEATH_ANIMATION;

/// Frog types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrogKind {
    Normal,
    Fast,
    Slow,
    /// Rare, short-lived, worth a lot
    Golden,
}

/// Base stats before power-up and difficulty scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrogStats {
    pub lifetime: f64,
    pub score: u32,
    pub size: f32,
}

impl FrogKind {
    pub fn stats(&self) -> FrogStats {
        match self {
            FrogKind::Normal => FrogStats {
                lifetime: 2.0,
                score: 10,
                size: 50.0,
            },
            FrogKind::Fast => FrogStats {
                lifetime: 1.5,
                score: 15,
                size: 45.0,
            },
            FrogKind::Slow => FrogStats {
                lifetime: 3.0,
                score: 5,
                size: 55.0,
            },
            FrogKind::Golden => FrogStats {
                lifetime: 1.0,
                score: 50,
                size: 40.0,
            },
        }
    }

    /// Map a uniform roll in [0, 1) onto the spawn table:
    /// 5% Golden, 20% Fast, 20% Slow, 55% Normal
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.05 {
            FrogKind::Golden
        } else if roll < 0.25 {
            FrogKind::Fast
        } else if roll < 0.45 {
            FrogKind::Slow
        } else {
            FrogKind::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrogKind::Normal => "Normal",
            FrogKind::Fast => "Fast",
            FrogKind::Slow => "Slow",
            FrogKind::Golden => "Golden",
        }
    }
}

/// A frog entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frog {
    pub id: u32,
    /// Console digit, if one was free at spawn
    pub label: Option<u8>,
    pub kind: FrogKind,
    pub pos: Vec2,
    pub size: f32,
    /// Fixed at spawn; later slow-motion activations do not rescale it
    pub lifetime: f64,
    pub score_value: u32,
    pub spawn_time: f64,
    pub death_time: Option<f64>,
    pub state: EntityState,
    pub cause: Option<DeathCause>,
}

impl Frog {
    /// Build a frog: base stats, then slow motion, then difficulty
    pub fn new(
        id: u32,
        kind: FrogKind,
        pos: Vec2,
        now: f64,
        effects: &PowerUpEffects,
        difficulty: &DifficultySnapshot,
    ) -> Self {
        let base = kind.stats();
        let lifetime = effects.apply_time_multiplier(base.lifetime);

        Self {
            id,
            label: None,
            kind,
            pos,
            size: difficulty.size_reduction(base.size),
            lifetime: difficulty.lifetime_reduction(lifetime),
            score_value: base.score,
            spawn_time: now,
            death_time: None,
            state: EntityState::Alive,
            cause: None,
        }
    }

    /// Player hit. Returns the points awarded, or None if the frog was
    /// already dying or dead.
    pub fn eliminate(&mut self, ctx: &mut SessionContext<'_>) -> Option<u32> {
        if self.state != EntityState::Alive {
            return None;
        }
        self.state = EntityState::BeingEliminated;
        self.death_time = Some(ctx.now);
        self.cause = Some(DeathCause::Eliminated);

        let points = ctx.award(self.score_value);
        ctx.events.push(GameEvent::FrogEliminated {
            id: self.id,
            kind: self.kind,
            points,
        });
        Some(points)
    }

    /// Advance one tick: finish the death animation or run out of time
    pub fn update(&mut self, ctx: &mut SessionContext<'_>) {
        match self.state {
            EntityState::Dead => {}
            EntityState::BeingEliminated => {
                let died_at = self.death_time.unwrap_or(self.spawn_time);
                if ctx.now - died_at >= FROG_DEATH_ANIMATION {
                    self.state = EntityState::Dead;
                }
            }
            EntityState::Alive => {
                if ctx.now - self.spawn_time >= self.lifetime {
                    self.expire(ctx);
                }
            }
        }
    }

    /// Escapes only count (and only make noise) while a session is running
    fn expire(&mut self, ctx: &mut SessionContext<'_>) {
        self.state = EntityState::Dead;
        self.cause = Some(DeathCause::Expired);
        if !ctx.session.is_playing {
            return;
        }
        ctx.events.push(GameEvent::FrogEscaped {
            id: self.id,
            kind: self.kind,
        });
        ctx.miss();
    }

    /// Death animation progress, 0.0 to 1.0
    pub fn death_progress(&self, now: f64) -> f32 {
        match (self.state, self.death_time) {
            (EntityState::BeingEliminated, Some(t)) => {
                ((now - t) / FROG_DEATH_ANIMATION).clamp(0.0, 1.0) as f32
            }
            (EntityState::Dead, Some(_)) => 1.0,
            _ => 0.0,
        }
    }

    /// Pulse phase for golden frog glow, 0.0 to 1.0
    pub fn pulse(&self, now: f64) -> f32 {
        (0.5 + 0.5 * ((now - self.spawn_time) * 8.0).sin()) as f32
    }

    pub fn remaining_lifetime(&self, now: f64) -> f64 {
        (self.lifetime - (now - self.spawn_time)).max(0.0)
    }
}

impl Entity for Frog {
    fn id(&self) -> u32 {
        self.id
    }
    fn label(&self) -> Option<u8> {
        self.label
    }
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn size(&self) -> f32 {
        self.size
    }
    fn state(&self) -> EntityState {
        self.state
    }
}
