//! Headless demo driver
//!
//! Runs the simulation at a synthetic 60 Hz with a scripted pilot (hold
//! fire, sweep left and right) and logs the event stream instead of
//! drawing it. Useful for eyeballing the engine with
//! `RUST_LOG=starswarm=debug cargo run`.

use starswarm::highscores::HighScores;
use starswarm::sim::{Outcome, StepInput, World, step};
use starswarm::{Config, GameEvent};

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: u64 = 60 * 120;

fn scripted_input(frame: u64) -> StepInput {
    // Sweep direction flips every two seconds.
    let sweep_left = (frame / 120) % 2 == 0;
    StepInput {
        left: sweep_left,
        right: !sweep_left,
        fire: true,
    }
}

fn main() {
    env_logger::init();

    let config = Config::default();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut world = match World::new(config, seed) {
        Ok(world) => world,
        Err(err) => {
            log::error!("bad config: {err}");
            std::process::exit(1);
        }
    };
    let mut high_scores = HighScores::new();

    let mut final_outcome = None;
    for frame in 0..MAX_FRAMES {
        let now_ms = frame as f64 * FRAME_MS;
        step(&mut world, &scripted_input(frame), now_ms);

        for event in world.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => log::info!("score {score}"),
                GameEvent::LifeChanged(lives) => log::info!("{lives} lives"),
                GameEvent::GameEnded {
                    outcome,
                    final_score,
                } => {
                    final_outcome = Some(outcome);
                    if let Some(rank) = high_scores.add_score(final_score, outcome, now_ms) {
                        log::info!("run placed #{rank} with {final_score}");
                    }
                }
                other => log::debug!("{other:?}"),
            }
        }
        if final_outcome.is_some() {
            break;
        }
    }

    match final_outcome {
        Some(Outcome::Lost) => log::info!("demo run lost with score {}", world.score()),
        Some(Outcome::Won) => log::info!("demo run won with score {}", world.score()),
        _ => log::info!(
            "demo run still going after {MAX_FRAMES} frames, score {}",
            world.score()
        ),
    }
}
