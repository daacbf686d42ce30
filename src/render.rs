//! Frame drawing for both machines, the end screen, the safety warnings and
//! the expiry animation. Pure consumers of machine state; every pixel goes
//! through the [`Screen`] trait.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{BASELINE_Y, GROUND_LINE_Y, HOLD_MS, OBSTACLE_W, RADIUS, SCREEN_H, SCREEN_W};
use crate::hal::{Clock, Screen};
use crate::machine::{CountdownTimer, GameMachine, GamePhase, SafetyAlert};

/// Game frame: score readout, ground line, player, obstacle.
pub fn draw_game<S: Screen>(screen: &mut S, game: &GameMachine) {
    if game.phase == GamePhase::Over {
        draw_game_over(screen, game.score);
        return;
    }
    screen.clear();
    screen.text(score_x(game.score), 1, &game.score.to_string());
    screen.line(0, GROUND_LINE_Y, SCREEN_W, GROUND_LINE_Y);
    screen.fill_circle(game.player.pos.x, game.player.pos.y, RADIUS);
    let obstacle = &game.obstacle;
    screen.fill_rect(
        obstacle.x,
        BASELINE_Y,
        obstacle.x + OBSTACLE_W,
        BASELINE_Y - obstacle.height,
    );
    screen.flush();
}

/// Right-align the score readout by magnitude.
fn score_x(score: u32) -> i32 {
    match score {
        0..=9 => 120,
        10..=99 => 115,
        100..=999 => 110,
        _ => 105,
    }
}

pub fn draw_game_over<S: Screen>(screen: &mut S, score: u32) {
    screen.clear();
    screen.text(37, 1, "Game over");
    screen.text(20, 10, &format!("Your score was: {score}"));
    screen.text(13, 20, "Press the button again");
    screen.flush();
}

/// Timer frame. The readout shifts left once minutes reach two digits.
pub fn draw_timer<S: Screen>(screen: &mut S, timer: &CountdownTimer) {
    screen.clear();
    let x = if timer.minutes < 10 { 45 } else { 40 };
    screen.text(x, 5, &format!("{}  :  {}", timer.minutes, timer.seconds));
    screen.text(24, 15, "minutes : seconds");
    screen.flush();
}

pub fn draw_warning<S: Screen>(screen: &mut S, alert: SafetyAlert) {
    screen.clear();
    match alert {
        SafetyAlert::TemperatureHigh => {
            screen.text(20, 6, "Temperature is high");
            screen.text(13, 15, "The device is not safe");
        }
        SafetyAlert::HumidityHigh => {
            screen.text(24, 6, "Humidity is high");
            screen.text(13, 15, "The device is not safe");
        }
        SafetyAlert::BothHigh => {
            screen.text(5, 3, "Temperature and Humidity");
            screen.text(43, 12, "are high");
            screen.text(13, 21, "The device is not safe");
        }
    }
    screen.flush();
}

/// Scatter random pixels over roughly a fifth of each panel axis when the
/// countdown expires, holding briefly between pixels.
pub fn play_expiry_animation<S: Screen, C: Clock>(screen: &mut S, clock: &mut C, rng: &mut Pcg32) {
    screen.clear();
    let count = (SCREEN_W / 5) * (SCREEN_H / 5);
    for _ in 0..count {
        let x = rng.random_range(0..SCREEN_W);
        let y = rng.random_range(0..SCREEN_H);
        screen.pixel(x, y);
        screen.flush();
        clock.hold_ms(HOLD_MS);
    }
}
