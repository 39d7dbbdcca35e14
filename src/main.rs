//! Neon Runner headless driver
//!
//! Runs the simulation against a synthetic 60 Hz clock with the autopilot
//! playing, then prints the final snapshot as JSON.
//!
//! Usage: `neon-runner [seed] [seconds]`

use neon_runner::{Autopilot, Engine};

const FRAME_NANOS: u64 = 16_666_667;
const FRAME_DT: f32 = 1.0 / 60.0;
/// Progress log interval (frames)
const REPORT_EVERY: u64 = 300;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    log::info!("Neon Runner (headless) seed {} for {}s", seed, seconds);

    let mut engine = Engine::new(seed);
    let mut observer = engine.observe();
    let mut pilot = Autopilot::new();

    let frames = seconds.saturating_mul(60);
    let mut now = FRAME_NANOS;
    engine.tick(now);

    for frame in 1..=frames {
        pilot.drive(&mut engine, FRAME_DT);
        now += FRAME_NANOS;
        engine.tick(now);

        for event in engine.take_events() {
            log::debug!("{:?}", event);
        }

        if frame % REPORT_EVERY == 0 {
            if let Some(state) = observer.poll() {
                log::info!(
                    "t={}s score={} speed={:.0} obstacles={} particles={}",
                    frame / 60,
                    state.score,
                    state.current_speed,
                    state.obstacles.len(),
                    state.particles.len()
                );
            }
        }

        if engine.snapshot().is_game_over {
            break;
        }
    }

    let state = engine.snapshot();
    match serde_json::to_string_pretty(&*state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}
