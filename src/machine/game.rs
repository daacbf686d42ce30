//! Game machine: obstacle run with jump physics, scoring and restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{Effect, Obstacle, Player, collides};
use crate::consts::{LED_ALL, RADIUS, RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Running along the ground
    Playing,
    /// Jump, ascending leg
    JumpUp,
    /// Jump, descending leg
    JumpDown,
    /// Crashed; end screen up, waiting for a restart press
    Over,
    /// Parked by the arbiter while the timer mode or a safety lockout
    /// owns the panel; nothing advances
    Suspended,
}

/// Per-tick input for the game machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameInput {
    /// Jump while playing; restart while on the end screen.
    pub jump: bool,
}

#[derive(Debug, Clone)]
pub struct GameMachine {
    pub phase: GamePhase,
    pub player: Player,
    pub obstacle: Obstacle,
    pub score: u32,
    rng: Pcg32,
    /// Phase to restore when the arbiter lifts a suspension.
    resume_phase: GamePhase,
    /// Alternates the LED flash on the end screen.
    blink_on: bool,
}

impl GameMachine {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacle = Obstacle::spawn(&mut rng);
        Self {
            phase: GamePhase::Playing,
            player: Player::new(),
            obstacle,
            score: 0,
            rng,
            resume_phase: GamePhase::Playing,
            blink_on: false,
        }
    }

    /// Advance one tick. No-op while suspended.
    pub fn step(&mut self, input: GameInput, effects: &mut Vec<Effect>) {
        match self.phase {
            GamePhase::Suspended => {}
            GamePhase::Over => self.step_over(input, effects),
            GamePhase::Playing | GamePhase::JumpUp | GamePhase::JumpDown => {
                self.step_active(input, effects)
            }
        }
    }

    fn step_active(&mut self, input: GameInput, effects: &mut Vec<Effect>) {
        if self.obstacle.off_screen() {
            self.obstacle.regenerate(&mut self.rng);
        }
        self.obstacle.advance();

        match self.phase {
            GamePhase::Playing => {
                if input.jump && self.player.start_jump(effects) {
                    self.phase = GamePhase::JumpUp;
                }
            }
            GamePhase::JumpUp => {
                if self.player.ascend() {
                    self.phase = GamePhase::JumpDown;
                }
            }
            GamePhase::JumpDown => {
                if self.player.descend(effects) {
                    self.phase = GamePhase::Playing;
                }
            }
            _ => {}
        }

        if collides(
            self.player.pos.x,
            self.player.pos.y,
            RADIUS,
            self.obstacle.x,
            self.obstacle.height,
        ) {
            log::debug!(
                "crash at obstacle x={} h={}, final score {}",
                self.obstacle.x,
                self.obstacle.height,
                self.score
            );
            effects.push(Effect::crash_tone());
            self.phase = GamePhase::Over;
            return; // score freezes on the crash tick
        }
        self.score += RATE as u32;
    }

    fn step_over(&mut self, input: GameInput, effects: &mut Vec<Effect>) {
        if input.jump {
            self.restart(effects);
            return;
        }
        self.blink_on = !self.blink_on;
        effects.push(Effect::Leds(if self.blink_on { LED_ALL } else { 0 }));
    }

    fn restart(&mut self, effects: &mut Vec<Effect>) {
        log::debug!("new game, last score {}", self.score);
        self.score = 0;
        self.obstacle.regenerate(&mut self.rng);
        self.player.reset();
        self.blink_on = false;
        effects.push(Effect::Leds(0));
        self.phase = GamePhase::Playing;
    }

    /// Arbiter override: freeze in place until resumed.
    pub fn suspend(&mut self) {
        if self.phase != GamePhase::Suspended {
            self.resume_phase = self.phase;
            self.phase = GamePhase::Suspended;
        }
    }

    /// Arbiter override: restore whatever the machine was doing.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Suspended {
            self.phase = self.resume_phase;
        }
    }
}
