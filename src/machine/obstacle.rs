//! Single scrolling obstacle with random respawn.
//!
//! Exactly one obstacle is live at a time. It spawns at a random offset past
//! the player's resting spot with a height drawn from a band that keeps every
//! obstacle non-trivial and clearable, then scrolls left one rate-step per
//! tick until the game machine respawns it off the left edge.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{GROUND_X, MAX_UP, OBSTACLE_W, RADIUS, RATE, SCREEN_W};

/// Lowest height the generator draws: just under the player's diameter.
pub const MIN_HEIGHT: i32 = 2 * RADIUS - RATE;
/// One past the tallest height: margins keep it strictly below the apex.
pub const MAX_HEIGHT_EXCL: i32 = MIN_HEIGHT + (MAX_UP - 2 * RADIUS - 2 * RATE);
/// Leftmost spawn x, one step past the player's resting edge.
pub const SPAWN_MIN_X: i32 = GROUND_X + RATE + RADIUS;

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: i32,
    pub height: i32,
}

impl Obstacle {
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let mut obstacle = Self {
            x: 0,
            height: MIN_HEIGHT,
        };
        obstacle.regenerate(rng);
        obstacle
    }

    /// Redraw position and height for a fresh run across the panel.
    pub fn regenerate(&mut self, rng: &mut Pcg32) {
        self.x = SPAWN_MIN_X + rng.random_range(0..SCREEN_W - OBSTACLE_W);
        self.height = rng.random_range(MIN_HEIGHT..MAX_HEIGHT_EXCL);
    }

    /// Scroll one step toward the player.
    pub fn advance(&mut self) {
        self.x -= RATE;
    }

    /// Past the left edge; time to respawn.
    pub fn off_screen(&self) -> bool {
        self.x <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    proptest! {
        #[test]
        fn prop_generated_heights_are_clearable(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacle = Obstacle::spawn(&mut rng);
            for _ in 0..32 {
                prop_assert!(obstacle.height > 0);
                prop_assert!(obstacle.height < MAX_UP);
                prop_assert!(obstacle.x >= SPAWN_MIN_X);
                prop_assert!(obstacle.x < SPAWN_MIN_X + SCREEN_W - OBSTACLE_W);
                obstacle.regenerate(&mut rng);
            }
        }
    }

    #[test]
    fn test_advance_and_off_screen() {
        let mut obstacle = Obstacle { x: 2, height: 5 };
        assert!(!obstacle.off_screen());
        obstacle.advance();
        obstacle.advance();
        assert_eq!(obstacle.x, 0);
        assert!(obstacle.off_screen());
    }
}
