//! Game state and core simulation types
//!
//! One `GameState` is the whole mutable world: the sim clock, the seeded
//! RNG, the session, active effects, difficulty and the spawner. Hosts own
//! it and drive it through [`tick`](super::tick::tick).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyCurve;
use super::entity::EntityRef;
use super::frog::FrogKind;
use super::powerup::{PowerUpEffects, PowerUpKind};
use super::session::{SessionConfig, SessionContext, SessionState};
use super::spawn::SpawnScheduler;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    OutOfLives,
    OutOfTime,
}

/// Things that happened during a tick, drained by the host for audio,
/// high scores and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    FrogEliminated { id: u32, kind: FrogKind, points: u32 },
    FrogEscaped { id: u32, kind: FrogKind },
    PowerUpCollected { id: u32, kind: PowerUpKind },
    WaveAdvanced { wave: u32 },
    SessionEnded { score: u32, reason: EndReason },
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Simulation clock in seconds, advanced only by `tick`
    pub clock: f64,
    pub session: SessionState,
    pub effects: PowerUpEffects,
    pub difficulty: DifficultyCurve,
    pub spawner: SpawnScheduler,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game; call `start_session` to play
    pub fn new(config: &SessionConfig, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: 0.0,
            session: SessionState::new(config),
            effects: PowerUpEffects::default(),
            difficulty: DifficultyCurve::new(),
            spawner: SpawnScheduler::new(config.area, config.spawn_padding),
            events: Vec::new(),
        }
    }

    /// Begin (or restart) a session from a clean slate
    pub fn start_session(&mut self) {
        self.effects = PowerUpEffects::default();
        self.spawner.reset(self.clock);
        self.session
            .start(self.clock, &mut self.difficulty, &mut self.events);
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing
    }

    /// Take everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Route a hit to whatever entity it targets. Returns true if an entity
    /// reacted.
    pub fn hit(&mut self, target: EntityRef) -> bool {
        if !self.session.is_playing {
            return false;
        }
        let mut ctx = SessionContext {
            now: self.clock,
            session: &mut self.session,
            effects: &mut self.effects,
            difficulty: self.difficulty.snapshot(),
            events: &mut self.events,
        };
        self.spawner.hit(target, &mut ctx)
    }

    /// Click at a game-area point. First match wins, power-ups before frogs.
    pub fn click(&mut self, point: Vec2) -> bool {
        match self.spawner.entity_at(point) {
            Some(target) => self.hit(target),
            None => false,
        }
    }

    /// Console selection by digit label
    pub fn select(&mut self, label: u8) -> bool {
        match self.spawner.entity_by_label(label) {
            Some(target) => self.hit(target),
            None => false,
        }
    }

    /// Advance entities and spawn cadences (one scheduler step)
    pub(crate) fn step_spawner(&mut self) {
        let mut ctx = SessionContext {
            now: self.clock,
            session: &mut self.session,
            effects: &mut self.effects,
            difficulty: self.difficulty.snapshot(),
            events: &mut self.events,
        };
        self.spawner.update(&mut ctx, &mut self.rng);
    }

    /// Advance the session countdown and derived modifiers
    pub(crate) fn step_session(&mut self, dt: f32) {
        self.session.tick(
            dt,
            self.clock,
            &mut self.effects,
            &mut self.difficulty,
            &mut self.events,
        );
    }

    /// Place a specific frog now (tests, scripted demos)
    pub fn spawn_frog(&mut self, kind: FrogKind, pos: Vec2) -> u32 {
        let difficulty = self.difficulty.snapshot();
        self.spawner
            .spawn_frog(kind, pos, self.clock, &self.effects, &difficulty)
    }

    /// Place a specific power-up now
    pub fn spawn_power_up(&mut self, kind: PowerUpKind, pos: Vec2) -> u32 {
        self.spawner.spawn_power_up(kind, pos, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityState;

    fn playing() -> GameState {
        let mut state = GameState::new(&SessionConfig::default(), 42);
        state.start_session();
        state.drain_events();
        state
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(&SessionConfig::default(), 1);
        assert!(!state.is_playing());
        assert!(state.spawner.frogs().is_empty());
    }

    #[test]
    fn test_click_prefers_power_up() {
        let mut state = playing();
        let frog = state.spawn_frog(FrogKind::Normal, Vec2::new(300.0, 300.0));
        let pu = state.spawn_power_up(PowerUpKind::ExtraLife, Vec2::new(305.0, 305.0));

        assert!(state.click(Vec2::new(304.0, 304.0)));
        assert_eq!(state.session.lives, 4);
        assert_eq!(state.session.score, 0);
        assert!(state.spawner.power_up(pu).is_some_and(|p| p.state == EntityState::Dead));
        assert!(state.spawner.frog(frog).is_some_and(|f| f.state == EntityState::Alive));

        // Second click reaches the frog
        assert!(state.click(Vec2::new(304.0, 304.0)));
        assert_eq!(state.session.score, 10);
    }

    #[test]
    fn test_click_misses_empty_space() {
        let mut state = playing();
        state.spawn_frog(FrogKind::Normal, Vec2::new(300.0, 300.0));
        assert!(!state.click(Vec2::new(10.0, 10.0)));
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_actions_ignored_after_game_over() {
        let mut state = playing();
        let frog = state.spawn_frog(FrogKind::Golden, Vec2::new(300.0, 300.0));
        state.session.end(EndReason::OutOfTime, &mut Vec::new());
        assert!(!state.click(Vec2::new(300.0, 300.0)));
        let label = state.spawner.frog(frog).and_then(|f| f.label);
        assert!(!state.select(label.unwrap_or(1)));
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_restart_clears_world() {
        let mut state = playing();
        state.spawn_frog(FrogKind::Normal, Vec2::new(300.0, 300.0));
        state.spawn_power_up(PowerUpKind::SlowMotion, Vec2::new(100.0, 100.0));
        state.effects.slow_motion_active = true;
        state.session.score = 120;

        state.start_session();
        assert!(state.spawner.frogs().is_empty());
        assert!(state.spawner.power_ups().is_empty());
        assert!(!state.effects.slow_motion_active);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::SessionStarted]);
    }
}
