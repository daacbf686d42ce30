//! Deterministic control core
//!
//! All state-machine logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - No peripheral access; side effects come out as [`Effect`] values
//! - Time arrives as an explicit millisecond timestamp

pub mod arbiter;
pub mod game;
pub mod geometry;
pub mod obstacle;
pub mod player;
pub mod timer;

pub use arbiter::{EnvReading, Mode, ModeArbiter, ModeSwitch, SafetyAlert, safety_alert};
pub use game::{GameInput, GameMachine, GamePhase};
pub use geometry::collides;
pub use obstacle::Obstacle;
pub use player::{JumpPhase, Player};
pub use timer::{CountdownTimer, TimerInput, TimerPhase};

use crate::consts::{TONE_MS, TONE_VOLUME};

/// A side effect requested by a machine, replayed by the polling loop.
///
/// Machines never touch peripherals; they queue these and the loop performs
/// them in order after the tick. Tones and holds block, per the device model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Fixed-frequency tone: frequency, volume, duration, trailing silence.
    Tone {
        freq_hz: f32,
        volume: f32,
        duration_ms: u32,
        rest_ms: u32,
    },
    /// Latch a bit pattern onto the LED bank.
    Leds(u8),
    /// Hold the loop briefly so one press of an edge trigger reads once.
    Debounce,
    /// Play the timer-expired pixel scatter animation.
    ExpiryAnimation,
}

impl Effect {
    /// High chirp at takeoff (75% of the base duration).
    pub fn jump_tone() -> Self {
        tone(300.0, TONE_MS * 3 / 4)
    }

    /// Low thud on landing (25% of the base duration).
    pub fn land_tone() -> Self {
        tone(100.0, TONE_MS / 4)
    }

    /// Low buzz when the player hits an obstacle.
    pub fn crash_tone() -> Self {
        tone(100.0, TONE_MS)
    }

    /// Per-second alert during the final countdown window.
    pub fn alert_tone() -> Self {
        tone(400.0, TONE_MS)
    }

    /// Longer tone when the countdown reaches zero.
    pub fn expiry_tone() -> Self {
        tone(400.0, TONE_MS * 2)
    }
}

fn tone(freq_hz: f32, duration_ms: u32) -> Effect {
    Effect::Tone {
        freq_hz,
        volume: TONE_VOLUME,
        duration_ms,
        rest_ms: 0,
    }
}
