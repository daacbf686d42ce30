//! The polling loop: arbitration first, then the active machine, then
//! drawing and queued side effects.
//!
//! One `poll` is one tick. The safety monitor and mode switch are read
//! before either machine advances, so a lockout or mode change detected
//! mid-tick lands before any further movement, scoring or countdown.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{DEBOUNCE_MS, HOLD_MS};
use crate::hal::{Clock, EnvSensor, LedBank, Screen, Speaker};
use crate::machine::{Effect, GameInput, Mode, ModeArbiter, ModeSwitch, TimerInput};
use crate::render;

/// Input sampled once per poll: edge-true buttons, the mode switch and the
/// normalized potentiometer.
#[derive(Debug, Clone, Copy)]
pub struct InputFrame {
    /// Jump / restart in game mode; start / pause / resume in timer mode.
    pub primary: bool,
    /// Timer reset.
    pub secondary: bool,
    pub mode: ModeSwitch,
    /// Potentiometer, normalized 0..=1.
    pub config: f32,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            primary: false,
            secondary: false,
            mode: ModeSwitch::Game,
            config: 0.0,
        }
    }
}

/// The assembled device: both machines plus the peripherals they drive.
pub struct Device<S, P, L, E, C> {
    pub arbiter: ModeArbiter,
    pub screen: S,
    pub speaker: P,
    pub leds: L,
    pub sensor: E,
    pub clock: C,
    effects: Vec<Effect>,
    anim_rng: Pcg32,
}

impl<S, P, L, E, C> Device<S, P, L, E, C>
where
    S: Screen,
    P: Speaker,
    L: LedBank,
    E: EnvSensor,
    C: Clock,
{
    pub fn new(seed: u64, screen: S, speaker: P, leds: L, sensor: E, clock: C) -> Self {
        Self {
            arbiter: ModeArbiter::new(seed),
            screen,
            speaker,
            leds,
            sensor,
            clock,
            effects: Vec::new(),
            anim_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    /// One loop iteration.
    pub fn poll(&mut self, input: InputFrame) {
        let reading = self.sensor.read();
        self.arbiter.poll(input.mode, reading);

        if let Some(alert) = self.arbiter.alert() {
            render::draw_warning(&mut self.screen, alert);
            return;
        }

        match self.arbiter.mode() {
            Mode::GameActive => {
                self.arbiter.game.step(
                    GameInput {
                        jump: input.primary,
                    },
                    &mut self.effects,
                );
                render::draw_game(&mut self.screen, &self.arbiter.game);
            }
            Mode::TimerActive => {
                let now = self.clock.now_ms();
                self.arbiter.timer.step(
                    TimerInput {
                        start_pause: input.primary,
                        reset: input.secondary,
                        config_sample: input.config,
                    },
                    now,
                    &mut self.effects,
                );
                render::draw_timer(&mut self.screen, &self.arbiter.timer);
            }
        }

        self.replay_effects();
    }

    /// Run `ticks` iterations with frame pacing, asking `input_for` for a
    /// fresh input frame before each poll.
    pub fn run<F>(&mut self, ticks: u64, mut input_for: F)
    where
        F: FnMut(&ModeArbiter) -> InputFrame,
    {
        for _ in 0..ticks {
            let frame = input_for(&self.arbiter);
            self.poll(frame);
            self.clock.hold_ms(HOLD_MS);
        }
    }

    fn replay_effects(&mut self) {
        for effect in std::mem::take(&mut self.effects) {
            match effect {
                Effect::Tone {
                    freq_hz,
                    volume,
                    duration_ms,
                    rest_ms,
                } => self.speaker.play(freq_hz, volume, duration_ms, rest_ms),
                Effect::Leds(bits) => self.leds.set(bits),
                Effect::Debounce => self.clock.hold_ms(DEBOUNCE_MS),
                Effect::ExpiryAnimation => render::play_expiry_animation(
                    &mut self.screen,
                    &mut self.clock,
                    &mut self.anim_rng,
                ),
            }
        }
    }
}
