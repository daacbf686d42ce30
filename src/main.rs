//! Hopclock demo entry point.
//!
//! Runs the device against in-memory peripherals: a scripted pilot plays the
//! jump game for a while, then the mode switch flips to the timer for a short
//! countdown. Wire real drivers into the `hal` traits to run on hardware.

use std::time::{SystemTime, UNIX_EPOCH};

use hopclock::consts::{MAX_SECONDS, MAX_UP};
use hopclock::hal::sim::{SimLeds, SimScreen, SimSensor, SimSpeaker, WallClock};
use hopclock::machine::{GamePhase, ModeSwitch, TimerPhase};
use hopclock::runner::{Device, InputFrame};

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    log::info!("hopclock demo starting, seed {seed}");

    let mut device = Device::new(
        seed,
        SimScreen::new(),
        SimSpeaker::default(),
        SimLeds::default(),
        SimSensor::default(),
        WallClock::new(),
    );

    // Game session: the pilot jumps when the obstacle scrolls close and
    // restarts once if it crashes.
    device.run(400, |arbiter| {
        let game = &arbiter.game;
        let primary = match game.phase {
            GamePhase::Playing => {
                let gap = game.obstacle.x - game.player.pos.x;
                gap > 0 && gap <= MAX_UP + 7
            }
            GamePhase::Over => true,
            _ => false,
        };
        InputFrame {
            primary,
            mode: ModeSwitch::Game,
            ..Default::default()
        }
    });
    log::info!("game session done, score {}", device.arbiter.game.score);
    println!("{}", device.screen.ascii());

    // Timer session: dial in three seconds, start, let it run out.
    let dial = 3.0 / MAX_SECONDS as f32;
    let mut started = false;
    device.run(600, |arbiter| {
        let start = arbiter.timer.phase == TimerPhase::Init && !started;
        if start {
            started = true;
        }
        InputFrame {
            primary: start,
            mode: ModeSwitch::Timer,
            config: dial,
            ..Default::default()
        }
    });
    log::info!(
        "timer session done, phase {:?}",
        device.arbiter.timer.phase
    );
}
