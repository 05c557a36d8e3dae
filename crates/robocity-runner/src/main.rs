//! Robocity headless runner
//!
//! Restores the latest snapshot (or generates a fresh city when none is
//! readable), then drives the tick scheduler until the configured tick
//! budget runs out. Final status reports are printed as JSON.
//!
//! Usage:
//!   cargo run -p robocity-runner
//!   cargo run -p robocity-runner -- config.json

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

use robocity_core::generation::CityConfig;
use robocity_core::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunnerConfig {
    seed: u64,
    tick_interval_secs: f64,
    snapshot_interval_secs: f64,
    snapshot_path: String,
    /// None runs until the process is killed
    max_ticks: Option<u64>,
    city: CityConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_interval_secs: 5.0,
            snapshot_interval_secs: 10.0,
            snapshot_path: "robocity.save".to_string(),
            max_ticks: None,
            city: CityConfig::default(),
        }
    }
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to read config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => RunnerConfig::default(),
    };

    let engine = restore_or_generate(&config);

    let scheduler_config = SchedulerConfig {
        tick_interval: Duration::from_secs_f64(config.tick_interval_secs),
        snapshot_interval: Duration::from_secs_f64(config.snapshot_interval_secs),
        snapshot_path: Some(PathBuf::from(&config.snapshot_path)),
        max_ticks: config.max_ticks,
    };

    let mut scheduler = Scheduler::new(engine, scheduler_config);
    let executed = scheduler.run();
    let engine = scheduler.into_engine();

    log::info!("ran {} ticks ({} total)", executed, engine.tick_count());
    print_reports(&engine);
}

fn load_config(path: &str) -> Result<RunnerConfig, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// A missing or malformed snapshot is never fatal: fall back to a
/// freshly generated city and keep going.
fn restore_or_generate(config: &RunnerConfig) -> CityEngine {
    let mut engine = CityEngine::with_seed(config.seed);

    match File::open(&config.snapshot_path) {
        Ok(file) => match engine.load(BufReader::new(file)) {
            Ok(()) => {
                log::info!(
                    "restored snapshot from {} (tick {})",
                    config.snapshot_path,
                    engine.tick_count()
                );
                return engine;
            }
            Err(e) => {
                log::warn!(
                    "snapshot {} unreadable ({}), starting fresh",
                    config.snapshot_path,
                    e
                );
                engine = CityEngine::with_seed(config.seed);
            }
        },
        Err(_) => {
            log::info!("no snapshot at {}, generating a fresh city", config.snapshot_path);
        }
    }

    engine.generate(&config.city);
    engine
}

fn print_reports(engine: &CityEngine) {
    let summary = serde_json::json!({
        "tick": engine.tick_count(),
        "stats": engine.stats(),
        "zones": engine.zone_reports(),
        "robots": engine.robot_reports(),
        "projects": engine.project_reports(),
        "completed_projects": engine.queue().completed,
    });

    match serde_json::to_string_pretty(&summary) {
        Ok(text) => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            use std::io::Write;
            let _ = writeln!(out, "{}", text);
        }
        Err(e) => log::error!("report serialization failed: {}", e),
    }
}
