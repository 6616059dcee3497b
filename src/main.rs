//! Headless cloth runner.
//!
//! Loads a session config from JSON (or uses the defaults) and simulates a
//! number of frames, logging how the cloth settles.
//!
//! Usage: `sailcloth [config.json] [frames]`
//!
//! Set `RUST_LOG=info` (or `debug`) to see progress.

use sailcloth::{Session, SessionConfig};
use std::env;
use std::process::ExitCode;

const DEFAULT_FRAMES: u64 = 600;
const REPORT_EVERY: u64 = 100;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SessionConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..frames {
        session.frame();
        if session.frame_count() % REPORT_EVERY == 0 {
            report(&session);
        }
    }

    let cloth = session.cloth();
    println!(
        "{} frames, {} particles, {} springs, residual {:.6}",
        session.frame_count(),
        cloth.particles().len(),
        cloth.springs().len(),
        cloth.spring_error()
    );
    ExitCode::SUCCESS
}

fn report(session: &Session) {
    let cloth = session.cloth();
    let lowest = cloth
        .particles()
        .iter()
        .map(|p| p.position.y)
        .fold(f32::INFINITY, f32::min);
    log::info!(
        "frame {}: residual {:.6}, lowest y {:.3}",
        session.frame_count(),
        cloth.spring_error(),
        lowest
    );
}
