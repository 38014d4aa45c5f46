//! Audio cues
//!
//! Fire-and-forget sound effects. Every backend swallows its own failures;
//! nothing here can interrupt the game loop.

use std::io::{self, Write};

use crate::sim::{GameEvent, PowerUpKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Frog hit
    Eliminate,
    /// Frog escaped
    Miss,
    /// Session started
    SessionStart,
    /// Session over
    SessionEnd,
}

impl SoundEffect {
    /// Beep pattern as (frequency Hz, duration ms), for backends that can
    /// play tones
    pub fn tones(&self) -> &'static [(u32, u32)] {
        match self {
            SoundEffect::Eliminate => &[(800, 100)],
            SoundEffect::Miss => &[(300, 200)],
            SoundEffect::SessionStart => &[(400, 100), (600, 100), (800, 150)],
            SoundEffect::SessionEnd => &[(600, 150), (400, 150), (200, 300)],
        }
    }
}

/// The four cues the game core asks for
pub trait AudioCue {
    fn play_eliminate(&mut self);
    fn play_miss(&mut self);
    fn play_session_start(&mut self);
    fn play_session_end(&mut self);
}

/// Play the cue (if any) belonging to each event, in order
pub fn play_events(events: &[GameEvent], audio: &mut dyn AudioCue) {
    for event in events {
        match event {
            GameEvent::SessionStarted => audio.play_session_start(),
            GameEvent::FrogEliminated { .. } => audio.play_eliminate(),
            GameEvent::FrogEscaped { .. } => audio.play_miss(),
            GameEvent::PowerUpCollected { kind, .. } => match kind {
                PowerUpKind::ExtraLife => audio.play_session_start(),
                PowerUpKind::SlowMotion | PowerUpKind::DoublePoints => audio.play_eliminate(),
            },
            GameEvent::SessionEnded { .. } => audio.play_session_end(),
            GameEvent::WaveAdvanced { .. } => {}
        }
    }
}

/// Terminal bell backend
pub struct AudioManager<W: Write> {
    out: W,
    master_volume: f32,
    muted: bool,
}

impl AudioManager<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AudioManager<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        if let Err(e) = self.ring(effect) {
            log::debug!("Audio cue {:?} failed: {e}", effect);
        }
    }

    /// A bell can't pitch, so one ring per tone
    fn ring(&mut self, effect: SoundEffect) -> io::Result<()> {
        for _ in effect.tones() {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioCue for AudioManager<W> {
    fn play_eliminate(&mut self) {
        self.play(SoundEffect::Eliminate);
    }
    fn play_miss(&mut self) {
        self.play(SoundEffect::Miss);
    }
    fn play_session_start(&mut self) {
        self.play(SoundEffect::SessionStart);
    }
    fn play_session_end(&mut self) {
        self.play(SoundEffect::SessionEnd);
    }
}

/// Silent backend
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioCue for NullAudio {
    fn play_eliminate(&mut self) {}
    fn play_miss(&mut self) {}
    fn play_session_start(&mut self) {}
    fn play_session_end(&mut self) {}
}
