//! Fixed-step frame clock
//!
//! Wall-clock frame deltas go into an accumulator; the sim is stepped in
//! whole `step` slices, at most `MAX_SUBSTEPS` per frame.

use std::time::Instant;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    accumulator: f32,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            accumulator: 0.0,
            last: None,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed a frame delta; returns how many sim steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Drop whatever the substep cap left behind
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    /// Measure the wall clock since the previous call and advance
    pub fn advance_to(&mut self, now: Instant) -> u32 {
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        self.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_accumulates_partial_steps() {
        let mut clock = FrameClock::new(0.01);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 1);
    }

    #[test]
    fn test_long_frames_are_capped() {
        let mut clock = FrameClock::new(1.0 / 120.0);
        // 5 seconds of stall is clamped to MAX_FRAME_DT, then to MAX_SUBSTEPS
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert!(clock.advance(0.0) <= 1);
        assert_eq!(clock.advance(-1.0), 0);
    }

    #[test]
    fn test_first_wall_clock_frame_is_empty() {
        let mut clock = FrameClock::new(0.01);
        let t0 = Instant::now();
        assert_eq!(clock.advance_to(t0), 0);
        assert_eq!(clock.advance_to(t0 + Duration::from_millis(35)), 3);
        // A stall is clamped like any other long frame
        assert_eq!(clock.advance_to(t0 + Duration::from_secs(9)), 8);
    }
}
