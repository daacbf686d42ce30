//! Countdown machine: pot-configured duration, wall-clock paced countdown,
//! pause/resume, expiry.
//!
//! Countdown accuracy comes from comparing elapsed wall-clock time against a
//! stored anchor, never from counting polls. At most one whole second is
//! consumed per poll; the anchor advances by exactly one second per
//! consumption so polling jitter cannot drift the countdown.

use super::Effect;
use crate::consts::{ALERT_WINDOW_S, MAX_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Dialing in a duration from the pot
    Init,
    /// Counting down
    Running,
    /// Frozen, display held
    Paused,
    /// Parked by the arbiter while the game mode or a safety lockout
    /// owns the panel
    Stopped,
}

/// Per-poll input for the timer machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerInput {
    /// Start from Init, pause from Running, resume from Paused.
    pub start_pause: bool,
    /// Back to Init, clearing the countdown.
    pub reset: bool,
    /// Potentiometer sample in 0..=1, read while configuring.
    pub config_sample: f32,
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    pub phase: TimerPhase,
    pub minutes: u32,
    pub seconds: u32,
    /// Power-of-two LED progress pattern, advanced each second of the
    /// last minute: 1, 2, 4, 8, wrap.
    led_step: u8,
    /// Wall-clock anchor (ms); one second is consumed per 1000ms past it.
    anchor_ms: u64,
    /// Unconsumed part of the current second, banked across a pause so
    /// paused time is excluded without losing the fraction already elapsed.
    carry_ms: u64,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Init,
            minutes: 0,
            seconds: 0,
            led_step: 1,
            anchor_ms: 0,
            carry_ms: 0,
        }
    }

    /// Advance one poll. No-op while stopped.
    pub fn step(&mut self, input: TimerInput, now_ms: u64, effects: &mut Vec<Effect>) {
        match self.phase {
            TimerPhase::Stopped => {}
            TimerPhase::Init => {
                self.configure(input.config_sample);
                if input.start_pause {
                    self.phase = TimerPhase::Running;
                    self.anchor_ms = now_ms;
                    self.carry_ms = 0;
                    log::debug!("countdown started at {}:{:02}", self.minutes, self.seconds);
                    effects.push(Effect::Debounce);
                }
            }
            TimerPhase::Running => {
                if input.reset {
                    self.reset(effects);
                    return;
                }
                if input.start_pause {
                    self.carry_ms = (now_ms - self.anchor_ms).min(999);
                    self.phase = TimerPhase::Paused;
                    effects.push(Effect::Debounce);
                    return;
                }
                if now_ms - self.anchor_ms >= 1000 {
                    self.anchor_ms += 1000;
                    self.consume_second(effects);
                }
            }
            TimerPhase::Paused => {
                if input.reset {
                    self.reset(effects);
                    return;
                }
                if input.start_pause {
                    // Resume where the second left off; paused time is excluded
                    self.anchor_ms = now_ms - self.carry_ms;
                    self.carry_ms = 0;
                    self.phase = TimerPhase::Running;
                    effects.push(Effect::Debounce);
                }
            }
        }
    }

    /// Map a 0..=1 configuration sample to whole seconds, rounding to
    /// nearest so the dial has no systematic low bias.
    fn configure(&mut self, sample: f32) {
        let total = (sample.clamp(0.0, 1.0) * MAX_SECONDS as f32).round() as u32;
        self.minutes = total / 60;
        self.seconds = total % 60;
    }

    /// One whole second of countdown, in the device's order: LED progress
    /// and alerts fire in the last minute, then the counters borrow down.
    fn consume_second(&mut self, effects: &mut Vec<Effect>) {
        if self.minutes == 0 {
            effects.push(Effect::Leds(self.led_step));
            self.led_step = if self.led_step >= 8 {
                1
            } else {
                self.led_step << 1
            };
            if self.seconds == 0 {
                self.expire(effects);
                return;
            }
            if self.seconds <= ALERT_WINDOW_S {
                effects.push(Effect::alert_tone());
            }
        }
        if self.seconds == 0 {
            // minutes > 0 here: the zero-zero case expired above
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.seconds -= 1;
        }
    }

    fn expire(&mut self, effects: &mut Vec<Effect>) {
        log::debug!("countdown expired");
        effects.push(Effect::expiry_tone());
        effects.push(Effect::Leds(0));
        self.clear();
        self.phase = TimerPhase::Init;
        effects.push(Effect::ExpiryAnimation);
    }

    fn reset(&mut self, effects: &mut Vec<Effect>) {
        log::debug!("countdown reset");
        self.clear();
        effects.push(Effect::Leds(0));
        self.phase = TimerPhase::Init;
    }

    fn clear(&mut self) {
        self.minutes = 0;
        self.seconds = 0;
        self.led_step = 1;
        self.carry_ms = 0;
    }

    /// Arbiter override: park the machine while another mode owns the panel.
    pub fn force_stop(&mut self) {
        self.phase = TimerPhase::Stopped;
    }

    /// Arbiter override: back into configuration when the mode returns.
    pub fn resume(&mut self) {
        if self.phase == TimerPhase::Stopped {
            self.phase = TimerPhase::Init;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_at(sample: f32) -> (CountdownTimer, Vec<Effect>) {
        let mut timer = CountdownTimer::new();
        let mut effects = Vec::new();
        timer.step(
            TimerInput {
                start_pause: true,
                config_sample: sample,
                ..Default::default()
            },
            0,
            &mut effects,
        );
        assert_eq!(timer.phase, TimerPhase::Running);
        effects.clear();
        (timer, effects)
    }

    #[test]
    fn test_half_dial_is_thirty_minutes() {
        let (timer, _) = start_at(0.5);
        assert_eq!((timer.minutes, timer.seconds), (30, 0));
    }

    #[test]
    fn test_config_rounds_to_nearest() {
        let mut timer = CountdownTimer::new();
        let mut effects = Vec::new();
        // ~0.5s of dial: truncation would read zero, rounding reads one
        timer.step(
            TimerInput {
                config_sample: 0.0001389,
                ..Default::default()
            },
            0,
            &mut effects,
        );
        assert_eq!((timer.minutes, timer.seconds), (0, 1));
    }

    #[test]
    fn test_one_second_tick_borrows_minute() {
        let (mut timer, mut effects) = start_at(0.5);
        // Sub-second polls consume nothing
        timer.step(TimerInput::default(), 999, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (30, 0));
        timer.step(TimerInput::default(), 1000, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (29, 59));
    }

    #[test]
    fn test_counters_never_negative() {
        let (mut timer, mut effects) = start_at(0.001); // ~4 seconds
        let mut now = 0;
        for _ in 0..20 {
            now += 1000;
            timer.step(TimerInput::default(), now, &mut effects);
            assert!(timer.minutes < 60);
            assert!(timer.seconds < 60);
        }
    }

    #[test]
    fn test_expiry_fires_exactly_once_from_one_second() {
        let mut timer = CountdownTimer::new();
        let mut effects = Vec::new();
        timer.step(
            TimerInput {
                start_pause: true,
                config_sample: 1.0 / MAX_SECONDS as f32,
                ..Default::default()
            },
            0,
            &mut effects,
        );
        assert_eq!((timer.minutes, timer.seconds), (0, 1));
        effects.clear();

        // First elapsed second: 0:01 -> 0:00, alert tone, no expiry yet
        timer.step(TimerInput::default(), 1000, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (0, 0));
        assert_eq!(timer.phase, TimerPhase::Running);
        assert!(effects.contains(&Effect::alert_tone()));
        assert!(!effects.contains(&Effect::ExpiryAnimation));
        effects.clear();

        // Second elapsed second: expiry, back to Init
        timer.step(TimerInput::default(), 2000, &mut effects);
        assert_eq!(timer.phase, TimerPhase::Init);
        let expiries = effects
            .iter()
            .filter(|e| **e == Effect::ExpiryAnimation)
            .count();
        assert_eq!(expiries, 1);
        assert!(effects.contains(&Effect::expiry_tone()));
        assert!(effects.contains(&Effect::Leds(0)));
    }

    #[test]
    fn test_led_pattern_walks_and_wraps_in_last_minute() {
        let (mut timer, mut effects) = start_at(50.0 / MAX_SECONDS as f32);
        assert_eq!((timer.minutes, timer.seconds), (0, 50));
        let mut seen = Vec::new();
        for i in 1..=6u64 {
            timer.step(TimerInput::default(), i * 1000, &mut effects);
            for e in effects.drain(..) {
                if let Effect::Leds(bits) = e {
                    seen.push(bits);
                }
            }
        }
        assert_eq!(seen, vec![1, 2, 4, 8, 1, 2]);
    }

    #[test]
    fn test_alert_tones_only_in_final_window() {
        let (mut timer, mut effects) = start_at(30.0 / MAX_SECONDS as f32);
        assert_eq!((timer.minutes, timer.seconds), (0, 30));
        // 0:30 -> 0:29: outside the window, LEDs but no tone
        timer.step(TimerInput::default(), 1000, &mut effects);
        assert!(!effects.contains(&Effect::alert_tone()));
        effects.clear();
        // Walk down to 0:10 and check the alert starts
        let mut now = 1000;
        while timer.seconds > ALERT_WINDOW_S {
            now += 1000;
            timer.step(TimerInput::default(), now, &mut effects);
            effects.clear();
        }
        now += 1000;
        timer.step(TimerInput::default(), now, &mut effects);
        assert!(effects.contains(&Effect::alert_tone()));
    }

    #[test]
    fn test_pause_resume_excludes_paused_time() {
        let (mut timer, mut effects) = start_at(0.5);

        // 600ms in, pause for three seconds
        timer.step(
            TimerInput {
                start_pause: true,
                ..Default::default()
            },
            600,
            &mut effects,
        );
        assert_eq!(timer.phase, TimerPhase::Paused);
        timer.step(TimerInput::default(), 2000, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (30, 0), "frozen while paused");

        // Resume at 3600: 600ms already elapsed, so the second completes 400ms later
        timer.step(
            TimerInput {
                start_pause: true,
                ..Default::default()
            },
            3600,
            &mut effects,
        );
        assert_eq!(timer.phase, TimerPhase::Running);
        timer.step(TimerInput::default(), 3900, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (30, 0), "not yet a full second");
        timer.step(TimerInput::default(), 4000, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (29, 59));

        // Pause and resume again immediately: no double-count
        timer.step(
            TimerInput {
                start_pause: true,
                ..Default::default()
            },
            4100,
            &mut effects,
        );
        timer.step(
            TimerInput {
                start_pause: true,
                ..Default::default()
            },
            9000,
            &mut effects,
        );
        timer.step(TimerInput::default(), 9800, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (29, 59));
        timer.step(TimerInput::default(), 9900, &mut effects);
        assert_eq!((timer.minutes, timer.seconds), (29, 58));
    }

    #[test]
    fn test_reset_from_running_and_paused() {
        let (mut timer, mut effects) = start_at(0.5);
        timer.step(
            TimerInput {
                reset: true,
                ..Default::default()
            },
            100,
            &mut effects,
        );
        assert_eq!(timer.phase, TimerPhase::Init);
        assert!(effects.contains(&Effect::Leds(0)));
        effects.clear();

        let (mut timer, _) = start_at(0.5);
        timer.step(
            TimerInput {
                start_pause: true,
                ..Default::default()
            },
            100,
            &mut effects,
        );
        assert_eq!(timer.phase, TimerPhase::Paused);
        timer.step(
            TimerInput {
                reset: true,
                ..Default::default()
            },
            200,
            &mut effects,
        );
        assert_eq!(timer.phase, TimerPhase::Init);
        assert_eq!((timer.minutes, timer.seconds), (0, 0));
    }

    #[test]
    fn test_force_stop_and_resume() {
        let (mut timer, mut effects) = start_at(0.5);
        timer.force_stop();
        assert_eq!(timer.phase, TimerPhase::Stopped);
        // Stopped ignores everything
        timer.step(
            TimerInput {
                start_pause: true,
                ..Default::default()
            },
            5000,
            &mut effects,
        );
        assert_eq!(timer.phase, TimerPhase::Stopped);
        assert!(effects.is_empty());

        timer.resume();
        assert_eq!(timer.phase, TimerPhase::Init);
    }
}
