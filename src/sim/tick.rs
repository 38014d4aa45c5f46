//! Simulation tick
//!
//! Core game loop step. Player actions queued since the previous tick are
//! applied first, then the clock advances, the session counts down and the
//! spawner runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// A single player action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Click at a game-area point
    Click(Vec2),
    /// Console digit 1-9
    Select(u8),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a session (ignored while one is running)
    pub start: bool,
    /// Actions in arrival order
    pub actions: Vec<PlayerAction>,
}

impl TickInput {
    pub fn push(&mut self, action: PlayerAction) {
        self.actions.push(action);
    }

    /// Clear one-shot inputs after processing
    pub fn clear(&mut self) {
        self.start = false;
        self.actions.clear();
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start && !state.is_playing() {
        state.start_session();
    }

    for action in &input.actions {
        match *action {
            PlayerAction::Click(point) => state.click(point),
            PlayerAction::Select(label) => state.select(label),
        };
    }

    let dt = dt.max(0.0);
    state.clock += dt as f64;
    state.step_session(dt);
    state.step_spawner();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::session::SessionConfig;
    use crate::sim::state::GameEvent;

    #[test]
    fn test_start_from_input() {
        let mut state = GameState::new(&SessionConfig::default(), 12345);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.is_playing());

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.is_playing());
        assert_eq!(state.drain_events(), vec![GameEvent::SessionStarted]);

        // Start while playing does not reset
        state.session.score = 30;
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.session.score, 30);
    }

    #[test]
    fn test_actions_apply_before_time_advances() {
        let mut state = GameState::new(&SessionConfig::default(), 5);
        state.start_session();
        let id = state.spawn_frog(
            crate::sim::frog::FrogKind::Golden,
            Vec2::new(400.0, 300.0),
        );
        // Golden frog lives 1.0s; a click queued in the tick that crosses
        // the deadline still lands first
        for _ in 0..59 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let mut input = TickInput::default();
        input.push(PlayerAction::Click(Vec2::new(400.0, 300.0)));
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.session.score, 50);
        assert_eq!(state.session.lives, 3);
        assert!(state.spawner.frog(id).is_some());
    }

    #[test]
    fn test_determinism() {
        let config = SessionConfig::default();
        let mut state1 = GameState::new(&config, 99999);
        let mut state2 = GameState::new(&config, 99999);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state1, &start, SIM_DT);
        tick(&mut state2, &start, SIM_DT);

        for i in 0..3_000 {
            let mut input = TickInput::default();
            if i % 45 == 0 {
                input.push(PlayerAction::Select(1));
                input.push(PlayerAction::Click(Vec2::new(400.0, 300.0)));
            }
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.session.score, state2.session.score);
        assert_eq!(state1.session.lives, state2.session.lives);
        assert_eq!(state1.drain_events(), state2.drain_events());
        let pos1: Vec<Vec2> = state1.spawner.frogs().iter().map(|f| f.pos).collect();
        let pos2: Vec<Vec2> = state2.spawner.frogs().iter().map(|f| f.pos).collect();
        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut state = GameState::new(&SessionConfig::default(), 1);
        state.start_session();
        tick(&mut state, &TickInput::default(), -1.0);
        assert_eq!(state.clock, 0.0);
        assert_eq!(state.session.time_remaining, 60.0);
    }
}
