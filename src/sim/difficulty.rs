//! Difficulty curve
//!
//! Difficulty is a pure function of elapsed session time. It is recomputed
//! from scratch every tick instead of being accumulated, so it cannot drift.

use serde::{Deserialize, Serialize};

/// Seconds of session time per wave
pub const WAVE_DURATION_SECS: f64 = 15.0;
/// Multiplier gained per wave (30%)
pub const MULTIPLIER_PER_WAVE: f32 = 0.3;
/// Spawn speed-up never exceeds this factor
pub const MAX_SPAWN_SPEEDUP: f32 = 3.0;
/// Pixels shaved off a frog per wave
pub const SIZE_REDUCTION_PER_WAVE: f32 = 3.0;
pub const MIN_FROG_SIZE: f32 = 25.0;
/// Seconds shaved off a frog's lifetime per wave
pub const LIFETIME_REDUCTION_PER_WAVE: f64 = 0.1;
pub const MIN_FROG_LIFETIME: f64 = 0.5;

/// Difficulty derived from elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySnapshot {
    /// Current wave (1-based)
    pub current_wave: u32,
    /// `1 + (wave - 1) * 0.3`
    pub multiplier: f32,
}

impl Default for DifficultySnapshot {
    fn default() -> Self {
        Self::for_wave(1)
    }
}

impl DifficultySnapshot {
    /// Snapshot for an explicit wave number (clamped to at least 1)
    pub fn for_wave(wave: u32) -> Self {
        let wave = wave.max(1);
        Self {
            current_wave: wave,
            multiplier: 1.0 + (wave - 1) as f32 * MULTIPLIER_PER_WAVE,
        }
    }

    /// Snapshot for a number of seconds into the session
    pub fn for_elapsed(elapsed_secs: f64) -> Self {
        // `as u32` saturates, so absurd session lengths stay well-defined
        let completed = (elapsed_secs.max(0.0) / WAVE_DURATION_SECS).floor() as u32;
        Self::for_wave(completed.saturating_add(1))
    }

    fn waves_past_first(&self) -> u32 {
        self.current_wave - 1
    }

    /// Shorten a spawn interval, capped at a 3x speed-up
    pub fn spawn_interval_scale(&self, base: f32) -> f32 {
        base / self.multiplier.min(MAX_SPAWN_SPEEDUP)
    }

    /// Shrink a frog's size, never below 25px
    pub fn size_reduction(&self, base_size: f32) -> f32 {
        (base_size - self.waves_past_first() as f32 * SIZE_REDUCTION_PER_WAVE).max(MIN_FROG_SIZE)
    }

    /// Shorten a frog's lifetime, never below 0.5s
    pub fn lifetime_reduction(&self, base_lifetime: f64) -> f64 {
        (base_lifetime - self.waves_past_first() as f64 * LIFETIME_REDUCTION_PER_WAVE)
            .max(MIN_FROG_LIFETIME)
    }

    /// Apply the wave bonus to already-multiplied points, truncating.
    ///
    /// Done in tenths so `floor(20 * 1.3)` is exactly 26.
    pub fn score_bonus(&self, points: u32) -> u32 {
        let tenths = 10u64 + self.waves_past_first() as u64;
        let total = (points as u64).saturating_mul(tenths) / 10;
        total.min(u32::MAX as u64) as u32
    }
}

/// Session-scoped difficulty tracker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DifficultyCurve {
    snapshot: DifficultySnapshot,
}

impl DifficultyCurve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to wave 1 (session start)
    pub fn reset(&mut self) {
        self.snapshot = DifficultySnapshot::default();
    }

    /// Recompute from elapsed session time
    pub fn update(&mut self, elapsed_secs: f64) -> DifficultySnapshot {
        self.snapshot = DifficultySnapshot::for_elapsed(elapsed_secs);
        self.snapshot
    }

    pub fn snapshot(&self) -> DifficultySnapshot {
        self.snapshot
    }

    pub fn current_wave(&self) -> u32 {
        self.snapshot.current_wave
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_wave_boundaries() {
        assert_eq!(DifficultySnapshot::for_elapsed(0.0).current_wave, 1);
        assert_eq!(DifficultySnapshot::for_elapsed(14.99).current_wave, 1);
        assert_eq!(DifficultySnapshot::for_elapsed(15.0).current_wave, 2);
        assert_eq!(DifficultySnapshot::for_elapsed(45.0).current_wave, 4);
        assert_eq!(DifficultySnapshot::for_elapsed(-3.0).current_wave, 1);
    }

    #[test]
    fn test_wave_four_values() {
        let s = DifficultySnapshot::for_wave(4);
        assert_relative_eq!(s.multiplier, 1.9, epsilon = 1e-5);
        assert_relative_eq!(s.size_reduction(50.0), 41.0);
        assert_relative_eq!(s.lifetime_reduction(2.0), 1.7, epsilon = 1e-9);
        assert_relative_eq!(s.spawn_interval_scale(1.9), 1.0, epsilon = 1e-5);
        assert_eq!(s.score_bonus(20), 26);
    }

    #[test]
    fn test_curve_recomputes_not_accumulates() {
        let mut curve = DifficultyCurve::new();
        assert_eq!(curve.update(31.0).current_wave, 3);
        // Going backwards (new session clock) is fine, nothing accumulated
        assert_eq!(curve.update(1.0).current_wave, 1);
        curve.update(100.0);
        curve.reset();
        assert_eq!(curve.current_wave(), 1);
        assert_relative_eq!(curve.snapshot().multiplier, 1.0);
    }

    proptest! {
        #[test]
        fn prop_multiplier_formula(wave in 1u32..10_000) {
            let s = DifficultySnapshot::for_wave(wave);
            let expected = 1.0 + (wave - 1) as f32 * 0.3;
            prop_assert!((s.multiplier - expected).abs() <= expected * 1e-6);
            prop_assert!(s.multiplier >= 1.0);
        }

        #[test]
        fn prop_spawn_speedup_capped(wave in 1u32..100_000, base in 0.1f32..10.0) {
            let s = DifficultySnapshot::for_wave(wave);
            let scaled = s.spawn_interval_scale(base);
            prop_assert!(scaled >= base / 3.0 - 1e-5);
            prop_assert!(scaled <= base + 1e-5);
        }

        #[test]
        fn prop_reductions_clamped(wave in 1u32..u32::MAX) {
            let s = DifficultySnapshot::for_wave(wave);
            prop_assert!(s.size_reduction(55.0) >= 25.0);
            prop_assert!(s.lifetime_reduction(3.0 * 1.5) >= 0.5);
        }

        #[test]
        fn prop_monotonic_in_time(a in 0.0f64..10_000.0, b in 0.0f64..10_000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let s_lo = DifficultySnapshot::for_elapsed(lo);
            let s_hi = DifficultySnapshot::for_elapsed(hi);
            prop_assert!(s_lo.current_wave <= s_hi.current_wave);
            prop_assert!(s_lo.multiplier <= s_hi.multiplier);
        }
    }
}
