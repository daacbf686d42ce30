//! Hopclock - an obstacle-jump game and a countdown timer on one panel
//!
//! Core modules:
//! - `machine`: deterministic state machines (game, timer, mode arbitration)
//! - `hal`: capability traits for the display, speaker, LEDs, sensor, clock
//! - `render`: scene drawing on top of the `Screen` trait
//! - `runner`: the polling loop tying machines to peripherals

pub mod hal;
pub mod machine;
pub mod render;
pub mod runner;

pub use machine::{CountdownTimer, GameMachine, ModeArbiter};
pub use runner::{Device, InputFrame};

/// Device configuration constants
pub mod consts {
    /// Panel pixel dimensions (C12832-class display)
    pub const SCREEN_W: i32 = 128;
    pub const SCREEN_H: i32 = 32;

    /// Frame pacing hold between polls (milliseconds)
    pub const HOLD_MS: u64 = 10;
    /// Hold after a start/pause/resume trigger so one press reads once
    pub const DEBOUNCE_MS: u64 = 250;
    /// Base tone duration (milliseconds)
    pub const TONE_MS: u32 = 150;
    /// Speaker volume (duty fraction)
    pub const TONE_VOLUME: f32 = 0.5;

    /// Player resting position and body radius
    pub const GROUND_X: i32 = 10;
    pub const GROUND_Y: i32 = 20;
    pub const RADIUS: i32 = 3;
    /// Jump apex displacement above the resting position
    pub const MAX_UP: i32 = 15;
    /// Player center y at the top of a jump (screen y grows downward)
    pub const APEX_Y: i32 = GROUND_Y - MAX_UP;
    /// Bottom edge of every obstacle
    pub const BASELINE_Y: i32 = GROUND_Y + RADIUS;
    /// Obstacle width
    pub const OBSTACLE_W: i32 = 2 * RADIUS;
    /// Horizontal scroll / vertical jump / score rate per tick
    pub const RATE: i32 = 1;
    /// y of the drawn ground line
    pub const GROUND_LINE_Y: i32 = 23;

    /// Environmental safety thresholds
    pub const MAX_TEMP_C: f32 = 40.0;
    pub const MAX_HUMIDITY_PCT: f32 = 70.0;

    /// Timer full-scale duration (one hour)
    pub const MAX_SECONDS: u32 = 60 * 60;
    /// Final-countdown window with a per-second alert tone
    pub const ALERT_WINDOW_S: u32 = 10;

    /// All four LEDs, flashed while the game-over screen is up
    pub const LED_ALL: u8 = 0b1111;
}
