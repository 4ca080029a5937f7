//! Headless demo driving the stage with a scripted pilot
//!
//! Steps the simulation at a fixed 16 ms tick with canned intent, proving
//! the core runs end to end without a renderer or input device attached.

use skyraid::prelude::*;

const TICK_MS: u32 = 16;
const TICKS: u32 = 600;

/// The canned pilot: bank left, level out, bank right, then strafe and fire
fn scripted_intent(tick: u32) -> Intent {
    let mut intent = match tick {
        30..=90 => Intent::moving(-1, 0),
        120..=180 => Intent::moving(1, 0),
        240..=400 => Intent::moving(if (tick / 40) % 2 == 0 { -1 } else { 1 }, 0),
        _ => Intent::neutral(),
    };
    if tick >= 100 && tick % 25 == 0 {
        intent = intent.with_pressed(Button::A);
    }
    intent
}

fn main() {
    env_logger::init();

    let config = StageConfig::default()
        .with_seed(7)
        .with_dive_interval_ms(1500)
        .with_max_divers(2);

    let mut stage = match Stage::new(config) {
        Ok(stage) => stage,
        Err(e) => {
            eprintln!("Stage error: {e}");
            return;
        }
    };

    for tick in 0..TICKS {
        stage.step(TICK_MS, &scripted_intent(tick));

        if tick % 100 == 0 {
            let diving = stage
                .enemies()
                .iter()
                .filter(|enemy| enemy.is_diving())
                .count();
            log::info!(
                "tick {:4}: craft {:?} at {:?}, {} enemies ({} diving), score {}",
                tick,
                stage.craft().state(),
                stage.craft().rect().topleft(),
                stage.enemies().len(),
                diving,
                stage.score()
            );
        }
    }

    println!(
        "simulated {} ticks: score {}, {} enemies left, craft {:?} at {:?}",
        stage.tick(),
        stage.score(),
        stage.enemies().len(),
        stage.craft().state(),
        stage.craft().rect().topleft()
    );
}
