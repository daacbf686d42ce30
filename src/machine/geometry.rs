//! Player-vs-obstacle overlap test
//!
//! The player circle is treated as its bounding square of side `2 * radius`.
//! Bounds are inclusive: with fixed-step integer movement an exact boundary
//! touch lands on a matching tick, so touches count as hits instead of
//! tunneling through between checks.

use crate::consts::{BASELINE_Y, OBSTACLE_W};

/// True when the obstacle overlaps the player's bounding square.
///
/// The obstacle spans `[obstacle_x, obstacle_x + OBSTACLE_W]` horizontally and
/// rises `obstacle_height` pixels from the baseline. Screen y grows downward,
/// so its vertical span is `[BASELINE_Y - obstacle_height, BASELINE_Y]`.
pub fn collides(
    player_x: i32,
    player_y: i32,
    radius: i32,
    obstacle_x: i32,
    obstacle_height: i32,
) -> bool {
    let horizontal =
        obstacle_x <= player_x + radius && obstacle_x + OBSTACLE_W >= player_x - radius;
    let obstacle_top = BASELINE_Y - obstacle_height;
    let vertical = obstacle_top <= player_y + radius && BASELINE_Y >= player_y - radius;
    horizontal && vertical
}
