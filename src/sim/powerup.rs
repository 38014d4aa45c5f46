//! Power-ups: the collectible entity and the global effects it grants

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{DeathCause, Entity, EntityState};
use super::session::{SessionContext, SessionState};
use super::state::GameEvent;
use crate::consts::*;

/// Slow motion stretches lifetimes and spawn intervals by this factor
pub const SLOW_MOTION_FACTOR: f64 = 1.5;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Frogs live longer and spawn less often
    SlowMotion,
    /// Points doubled
    DoublePoints,
    /// One extra life, applied instantly
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::SlowMotion,
        PowerUpKind::DoublePoints,
        PowerUpKind::ExtraLife,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::DoublePoints => "Double Points",
            PowerUpKind::ExtraLife => "Extra Life",
        }
    }

    /// Short on-screen glyph
    pub fn symbol(&self) -> &'static str {
        match self {
            PowerUpKind::SlowMotion => "S",
            PowerUpKind::DoublePoints => "2X",
            PowerUpKind::ExtraLife => "+1",
        }
    }
}

/// Timed global modifiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpEffects {
    pub slow_motion_active: bool,
    pub slow_motion_expiry: f64,
    pub double_points_active: bool,
    pub double_points_expiry: f64,
}

impl PowerUpEffects {
    /// Switch off anything whose expiry has passed
    pub fn update(&mut self, now: f64) {
        if self.slow_motion_active && now >= self.slow_motion_expiry {
            self.slow_motion_active = false;
            log::info!("Slow motion expired");
        }
        if self.double_points_active && now >= self.double_points_expiry {
            self.double_points_active = false;
            log::info!("Double points expired");
        }
    }

    /// Start (or refresh) an effect. Extra life goes straight to the session.
    pub fn activate(&mut self, kind: PowerUpKind, now: f64, session: &mut SessionState) {
        match kind {
            PowerUpKind::SlowMotion => {
                self.slow_motion_active = true;
                self.slow_motion_expiry = now + POWERUP_EFFECT_DURATION;
            }
            PowerUpKind::DoublePoints => {
                self.double_points_active = true;
                self.double_points_expiry = now + POWERUP_EFFECT_DURATION;
            }
            PowerUpKind::ExtraLife => session.add_life(),
        }
        log::info!("Power-up activated: {}", kind.as_str());
    }

    pub fn apply_points_multiplier(&self, points: u32) -> u32 {
        if self.double_points_active {
            points.saturating_mul(2)
        } else {
            points
        }
    }

    pub fn apply_time_multiplier(&self, t: f64) -> f64 {
        if self.slow_motion_active {
            t * SLOW_MOTION_FACTOR
        } else {
            t
        }
    }

    /// Seconds left on a timed effect (0 when inactive or instant)
    pub fn remaining(&self, kind: PowerUpKind, now: f64) -> f64 {
        let (active, expiry) = match kind {
            PowerUpKind::SlowMotion => (self.slow_motion_active, self.slow_motion_expiry),
            PowerUpKind::DoublePoints => (self.double_points_active, self.double_points_expiry),
            PowerUpKind::ExtraLife => (false, 0.0),
        };
        if active { (expiry - now).max(0.0) } else { 0.0 }
    }
}

/// A collectible power-up on screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub label: Option<u8>,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    /// Fixed, unaffected by difficulty or slow motion
    pub lifetime: f64,
    pub spawn_time: f64,
    pub state: EntityState,
    pub cause: Option<DeathCause>,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2, now: f64) -> Self {
        Self {
            id,
            label: None,
            kind,
            pos,
            size: POWERUP_SIZE,
            lifetime: POWERUP_LIFETIME,
            spawn_time: now,
            state: EntityState::Alive,
            cause: None,
        }
    }

    /// Pick it up. Returns false if it was already gone.
    pub fn collect(&mut self, ctx: &mut SessionContext<'_>) -> bool {
        if self.state != EntityState::Alive {
            return false;
        }
        self.state = EntityState::Dead;
        self.cause = Some(DeathCause::Collected);
        ctx.effects.activate(self.kind, ctx.now, ctx.session);
        ctx.events.push(GameEvent::PowerUpCollected {
            id: self.id,
            kind: self.kind,
        });
        true
    }

    /// Expires silently: no penalty, no cue
    pub fn update(&mut self, now: f64) {
        if self.state == EntityState::Alive && now - self.spawn_time >= self.lifetime {
            self.state = EntityState::Dead;
            self.cause = Some(DeathCause::Expired);
            log::debug!("Power-up {} ({}) expired", self.id, self.kind.as_str());
        }
    }

    pub fn remaining_lifetime(&self, now: f64) -> f64 {
        (self.lifetime - (now - self.spawn_time)).max(0.0)
    }
}

impl Entity for PowerUp {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{DifficultyCurve, DifficultySnapshot};
    use crate::sim::session::SessionConfig;

    fn playing_session() -> SessionState {
        let mut session = SessionState::new(&SessionConfig::default());
        session.start(0.0, &mut DifficultyCurve::new(), &mut Vec::new());
        session
    }

    #[test]
    fn test_timed_effects_expire() {
        let mut session = playing_session();
        let mut effects = PowerUpEffects::default();
        effects.activate(PowerUpKind::SlowMotion, 2.0, &mut session);
        effects.activate(PowerUpKind::DoublePoints, 5.0, &mut session);

        assert_eq!(effects.apply_time_multiplier(2.0), 3.0);
        assert_eq!(effects.apply_points_multiplier(15), 30);
        assert_eq!(effects.remaining(PowerUpKind::SlowMotion, 4.0), 8.0);

        effects.update(11.99);
        assert!(effects.slow_motion_active);
        effects.update(12.0);
        assert!(!effects.slow_motion_active);
        assert!(effects.double_points_active);
        effects.update(15.0);
        assert!(!effects.double_points_active);
        assert_eq!(effects.apply_points_multiplier(15), 15);
    }

    #[test]
    fn test_extra_life_is_instant() {
        let mut session = playing_session();
        let mut effects = PowerUpEffects::default();
        effects.activate(PowerUpKind::ExtraLife, 0.0, &mut session);
        assert_eq!(session.lives, 4);
        assert!(!effects.slow_motion_active);
        assert!(!effects.double_points_active);
        assert_eq!(effects.remaining(PowerUpKind::ExtraLife, 0.0), 0.0);
    }

    #[test]
    fn test_collect_once() {
        let mut session = playing_session();
        let mut effects = PowerUpEffects::default();
        let mut events = Vec::new();
        let mut p = PowerUp::new(1, PowerUpKind::ExtraLife, Vec2::new(100.0, 100.0), 0.0);
        let mut ctx = SessionContext {
            now: 1.0,
            session: &mut session,
            effects: &mut effects,
            difficulty: DifficultySnapshot::default(),
            events: &mut events,
        };
        assert!(p.collect(&mut ctx));
        assert!(!p.collect(&mut ctx));
        assert_eq!(session.lives, 4);
        assert_eq!(p.cause, Some(DeathCause::Collected));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_silent_expiry() {
        let mut p = PowerUp::new(7, PowerUpKind::SlowMotion, Vec2::ZERO, 10.0);
        p.update(14.9);
        assert_eq!(p.state, EntityState::Alive);
        p.update(15.0);
        assert_eq!(p.state, EntityState::Dead);
        assert_eq!(p.cause, Some(DeathCause::Expired));
        assert_eq!(p.remaining_lifetime(20.0), 0.0);
    }
}
