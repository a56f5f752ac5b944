//! Polyroids - native demo
//!
//! Runs the simulation headless with a scripted autopilot at the configured
//! tick rate, logging progress. Usage:
//!
//! ```text
//! polyroids [settings.json] [max_ticks]
//! ```
//!
//! Type `q` and Enter to stop early.

use std::io::BufRead;
use std::path::Path;
use std::time::{Duration, Instant};

use polyroids::Settings;
use polyroids::platform::{FixedStepClock, InputLatch, Key, StopHandle};
use polyroids::renderer::tessellate;
use polyroids::sim::{Frame, GamePhase, GameState, tick};

const DEFAULT_MAX_TICKS: u64 = 2000;
/// Ticks between status lines
const STATUS_EVERY: u64 = 100;

/// Scripted pilot: spin slowly, fire often, thrust now and then, and start a
/// new round whenever the last one ends.
fn autopilot(latch: &mut InputLatch, state: &GameState) {
    let t = state.time_ticks;

    if state.phase == GamePhase::NotPlaying {
        latch.key_down(Key::Start);
        return;
    }

    if t % 40 < 6 {
        latch.key_down(Key::Left);
    } else {
        latch.key_up(Key::Left);
    }
    if t % 60 < 3 {
        latch.key_down(Key::Thrust);
    } else {
        latch.key_up(Key::Thrust);
    }
    if t % 4 == 0 {
        latch.key_down(Key::Fire);
    }
    if t % 500 == 250 {
        latch.key_down(Key::Hyperspace);
    }
}

fn watch_stdin(stop: StopHandle) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim() == "q" => {
                    stop.request_stop();
                    break;
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

fn main() {
    env_logger::init();
    log::info!("Polyroids (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(Path::new(&path)),
        None => Settings::default(),
    };
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let mut state = GameState::from_settings(&settings);
    log::info!(
        "Field {}x{}, seed {}, detail {}",
        state.field.width,
        state.field.height,
        state.seed,
        state.detail.as_str()
    );

    let stop = StopHandle::new();
    watch_stdin(stop.clone());

    let mut clock = FixedStepClock::new(settings.tick_millis);
    let mut latch = InputLatch::new();
    let mut ticks = 0u64;
    let mut last = Instant::now();

    while ticks < max_ticks && !stop.stop_requested() {
        std::thread::sleep(Duration::from_millis(settings.tick_millis));
        let now = Instant::now();
        let due = clock.advance(now.duration_since(last).as_secs_f64() * 1000.0);
        last = now;

        for _ in 0..due {
            autopilot(&mut latch, &state);
            tick(&mut state, &latch.take());
            ticks += 1;

            if ticks % STATUS_EVERY == 0 {
                let mesh = tessellate(&Frame::capture(&state));
                log::info!(
                    "tick {}: {:?} score {} high {} lives {} wave {} rocks {}",
                    ticks,
                    state.phase,
                    state.score,
                    state.high_score,
                    state.lives,
                    state.wave,
                    state.rocks_left
                );
                log::debug!(
                    "mesh: {} line verts, {} fill verts, {} stars",
                    mesh.lines.len(),
                    mesh.fills.len(),
                    mesh.stars.len()
                );
            }
        }
    }

    if stop.stop_requested() {
        log::info!("Stopped after {} ticks", ticks);
    }
    log::info!("High score {}", state.high_score);
    for (rank, entry) in state.high_scores.entries.iter().enumerate() {
        log::info!("  {:2}. {:>6} (wave {})", rank + 1, entry.score, entry.wave);
    }
}
