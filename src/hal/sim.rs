//! In-memory peripheral implementations for the demo binary and tests.

use std::time::{Duration, Instant};

use super::{Clock, EnvSensor, LedBank, Screen, Speaker};
use crate::consts::{SCREEN_H, SCREEN_W};
use crate::machine::EnvReading;

/// Framebuffer-backed screen. Text is kept out of the pixel grid and
/// recorded separately so tests can assert on it directly.
pub struct SimScreen {
    pixels: Vec<bool>,
    pub texts: Vec<(i32, i32, String)>,
    pub flushes: u32,
}

impl Default for SimScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SimScreen {
    pub fn new() -> Self {
        Self {
            pixels: vec![false; (SCREEN_W * SCREEN_H) as usize],
            texts: Vec::new(),
            flushes: 0,
        }
    }

    pub fn pixel_at(&self, x: i32, y: i32) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.pixels[(y * SCREEN_W + x) as usize]
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// One ASCII row per pixel row, `#` for lit pixels.
    pub fn ascii(&self) -> String {
        let mut out = String::with_capacity(((SCREEN_W + 1) * SCREEN_H) as usize);
        for y in 0..SCREEN_H {
            for x in 0..SCREEN_W {
                out.push(if self.pixel_at(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < SCREEN_W && y >= 0 && y < SCREEN_H
    }

    fn set(&mut self, x: i32, y: i32) {
        if Self::in_bounds(x, y) {
            self.pixels[(y * SCREEN_W + x) as usize] = true;
        }
    }
}

impl Screen for SimScreen {
    fn clear(&mut self) {
        self.pixels.fill(false);
        self.texts.clear();
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set(cx + dx, cy + dy);
                }
            }
        }
    }

    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        for y in top..=bottom {
            for x in left..=right {
                self.set(x, y);
            }
        }
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        // Stepped interpolation; the device only draws axis-aligned lines
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for i in 0..=steps {
            let x = x0 + (x1 - x0) * i / steps;
            let y = y0 + (y1 - y0) * i / steps;
            self.set(x, y);
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str) {
        self.texts.push((x, y, text.to_string()));
    }

    fn pixel(&mut self, x: i32, y: i32) {
        self.set(x, y);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Speaker that records every tone. The blocking wait is left to the clock
/// so tests stay instantaneous.
#[derive(Default)]
pub struct SimSpeaker {
    pub tones: Vec<(f32, u32)>,
}

impl Speaker for SimSpeaker {
    fn play(&mut self, freq_hz: f32, _volume: f32, duration_ms: u32, _rest_ms: u32) {
        log::trace!("tone {freq_hz}Hz for {duration_ms}ms");
        self.tones.push((freq_hz, duration_ms));
    }
}

/// LED bank that remembers the latest pattern.
#[derive(Default)]
pub struct SimLeds {
    pub bits: u8,
}

impl LedBank for SimLeds {
    fn set(&mut self, bits: u8) {
        self.bits = bits;
    }
}

/// Sensor that returns whatever reading it was last given.
#[derive(Default)]
pub struct SimSensor {
    pub reading: EnvReading,
}

impl EnvSensor for SimSensor {
    fn read(&mut self) -> EnvReading {
        self.reading
    }
}

/// Manual clock for tests: time only moves when told to, and holds advance
/// it instead of sleeping.
#[derive(Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn hold_ms(&mut self, ms: u64) {
        self.now += ms;
    }
}

/// Wall clock for the demo binary; holds really sleep.
pub struct WallClock {
    start: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn now_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn hold_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_any_corner_order() {
        let mut screen = SimScreen::new();
        screen.fill_rect(10, 23, 16, 18);
        assert!(screen.pixel_at(10, 18));
        assert!(screen.pixel_at(16, 23));
        assert!(!screen.pixel_at(9, 20));
    }

    #[test]
    fn test_fill_circle_center_and_edge() {
        let mut screen = SimScreen::new();
        screen.fill_circle(10, 20, 3);
        assert!(screen.pixel_at(10, 20));
        assert!(screen.pixel_at(13, 20));
        assert!(!screen.pixel_at(14, 20));
    }

    #[test]
    fn test_clear_drops_pixels_and_text() {
        let mut screen = SimScreen::new();
        screen.pixel(5, 5);
        screen.text(0, 0, "hi");
        screen.clear();
        assert_eq!(screen.lit_count(), 0);
        assert!(screen.texts.is_empty());
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut screen = SimScreen::new();
        screen.fill_rect(125, 20, 135, 25);
        assert!(screen.pixel_at(127, 22));
        assert_eq!(screen.pixel_at(130, 22), false);
    }
}
