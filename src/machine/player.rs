//! Player vertical machine: grounded, ascending, descending.
//!
//! Horizontal position is fixed; jumping moves the center up one rate-step
//! per tick to the apex, then back down to the ground. Takeoff and landing
//! each queue exactly one tone.

use glam::IVec2;

use super::Effect;
use crate::consts::{APEX_Y, GROUND_X, GROUND_Y, RATE};

/// Jump sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: IVec2,
    pub phase: JumpPhase,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: IVec2::new(GROUND_X, GROUND_Y),
            phase: JumpPhase::Grounded,
        }
    }

    /// Begin a jump. Only honored while grounded; queues the takeoff chirp.
    pub fn start_jump(&mut self, effects: &mut Vec<Effect>) -> bool {
        if self.phase != JumpPhase::Grounded {
            return false;
        }
        effects.push(Effect::jump_tone());
        self.phase = JumpPhase::Ascending;
        true
    }

    /// One ascending step. Returns true on the tick that reaches the apex.
    pub fn ascend(&mut self) -> bool {
        self.pos.y -= RATE;
        if self.pos.y <= APEX_Y {
            self.pos.y = APEX_Y;
            self.phase = JumpPhase::Descending;
            return true;
        }
        false
    }

    /// One descending step. Returns true on touchdown; queues the landing thud.
    pub fn descend(&mut self, effects: &mut Vec<Effect>) -> bool {
        self.pos.y += RATE;
        if self.pos.y >= GROUND_Y {
            self.pos.y = GROUND_Y;
            self.phase = JumpPhase::Grounded;
            effects.push(Effect::land_tone());
            return true;
        }
        false
    }

    /// Snap back to the resting pose. New-game only, never mid-jump.
    pub fn reset(&mut self) {
        self.pos = IVec2::new(GROUND_X, GROUND_Y);
        self.phase = JumpPhase::Grounded;
    }
}
