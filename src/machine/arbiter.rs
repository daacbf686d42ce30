//! Mode arbitration and the environmental safety interlock.
//!
//! Runs before any machine advances on every poll. Precedence: safety
//! lockout over the switch, the switch over whatever sub-state the selected
//! machine is in.

use super::{CountdownTimer, GameMachine};
use crate::consts::{MAX_HUMIDITY_PCT, MAX_TEMP_C};

/// Two-position mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    Game,
    Timer,
}

/// Which machine owns the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    GameActive,
    TimerActive,
}

/// One sensor poll, device units.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Why the device is locked out. When both readings trip their thresholds
/// the combined message wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyAlert {
    TemperatureHigh,
    HumidityHigh,
    BothHigh,
}

/// Classify a reading against the fixed thresholds.
pub fn safety_alert(reading: EnvReading) -> Option<SafetyAlert> {
    let temperature = reading.temperature_c >= MAX_TEMP_C;
    let humidity = reading.humidity_pct >= MAX_HUMIDITY_PCT;
    match (temperature, humidity) {
        (true, true) => Some(SafetyAlert::BothHigh),
        (true, false) => Some(SafetyAlert::TemperatureHigh),
        (false, true) => Some(SafetyAlert::HumidityHigh),
        (false, false) => None,
    }
}

/// Owns both machines and decides which one runs each poll.
#[derive(Debug, Clone)]
pub struct ModeArbiter {
    pub game: GameMachine,
    pub timer: CountdownTimer,
    mode: Mode,
    alert: Option<SafetyAlert>,
}

impl ModeArbiter {
    pub fn new(seed: u64) -> Self {
        Self {
            game: GameMachine::new(seed),
            timer: CountdownTimer::new(),
            mode: Mode::GameActive,
            alert: None,
        }
    }

    /// Re-derive the active mode from the switch and the sensor. Under a
    /// lockout both machines are forced inert; the overlay holds until the
    /// readings clear and the switch is read again.
    pub fn poll(&mut self, switch: ModeSwitch, reading: EnvReading) {
        let alert = safety_alert(reading);
        if let Some(alert) = alert {
            if self.alert.is_none() {
                log::warn!(
                    "safety lockout: {:?} (temp {:.1}C, humidity {:.1}%)",
                    alert,
                    reading.temperature_c,
                    reading.humidity_pct
                );
            }
            self.game.suspend();
            self.timer.force_stop();
            self.alert = Some(alert);
            return;
        }
        if self.alert.take().is_some() {
            log::info!("safety lockout cleared");
        }

        match switch {
            ModeSwitch::Game => {
                if self.mode != Mode::GameActive {
                    log::debug!("mode: game");
                }
                self.mode = Mode::GameActive;
                self.timer.force_stop();
                self.game.resume();
            }
            ModeSwitch::Timer => {
                if self.mode != Mode::TimerActive {
                    log::debug!("mode: timer");
                }
                self.mode = Mode::TimerActive;
                self.game.suspend();
                self.timer.resume();
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn alert(&self) -> Option<SafetyAlert> {
        self.alert
    }
}
