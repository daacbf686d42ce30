//! Capability traits for the device peripherals.
//!
//! The machines in [`crate::machine`] never touch hardware; the polling loop
//! calls through these traits. Operations are infallible, like the panel
//! peripherals they model; analog and sensor reads are clamped by their
//! natural range and digital inputs are plain booleans.

pub mod sim;

use crate::machine::EnvReading;

/// Monochrome pixel display.
pub trait Screen {
    fn clear(&mut self);
    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32);
    /// Filled rectangle between two corners, in either corner order.
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    /// Draw `text` with its top-left at (x, y).
    fn text(&mut self, x: i32, y: i32, text: &str);
    fn pixel(&mut self, x: i32, y: i32);
    /// Push the frame to the panel.
    fn flush(&mut self);
}

/// Fixed-frequency tone output. Blocks for `duration_ms + rest_ms`.
pub trait Speaker {
    fn play(&mut self, freq_hz: f32, volume: f32, duration_ms: u32, rest_ms: u32);
}

/// LED bank, one bit per LED.
pub trait LedBank {
    fn set(&mut self, bits: u8);
}

/// Combined temperature / humidity sensor.
pub trait EnvSensor {
    fn read(&mut self) -> EnvReading;
}

/// Monotonic milliseconds plus the blocking holds the loop paces itself with.
pub trait Clock {
    fn now_ms(&mut self) -> u64;
    fn hold_ms(&mut self, ms: u64);
}
