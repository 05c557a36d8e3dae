//! Timer-driven scheduler - runs ticks and snapshots without overlap
//!
//! One tick fully completes before the next is considered; an overrun is
//! logged instead of overlapped. Snapshots run on their own cadence,
//! interleaved between ticks, and only read state. A shared cancellation
//! token stops the loop between ticks for clean shutdown.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::engine::CityEngine;
use crate::persistence::SaveError;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Target spacing between ticks
    pub tick_interval: Duration,
    /// Spacing between snapshot writes
    pub snapshot_interval: Duration,
    /// Where snapshots go; None disables persistence entirely
    pub snapshot_path: Option<PathBuf>,
    /// Stop after this many ticks; None runs until cancelled
    pub max_ticks: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(5),
            snapshot_interval: Duration::from_secs(10),
            snapshot_path: None,
            max_ticks: None,
        }
    }
}

pub struct Scheduler {
    engine: CityEngine,
    config: SchedulerConfig,
    cancel: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(engine: CityEngine, config: SchedulerConfig) -> Self {
        Self {
            engine,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Token observed between ticks; set it to stop the loop
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn engine(&self) -> &CityEngine {
        &self.engine
    }

    pub fn into_engine(self) -> CityEngine {
        self.engine
    }

    /// Run until cancelled or the tick budget is spent; returns the
    /// number of ticks executed. A final snapshot is written on exit.
    pub fn run(&mut self) -> u64 {
        let mut executed = 0;
        let mut last_snapshot = Instant::now();

        while !self.cancel.load(Ordering::Relaxed) {
            if let Some(max) = self.config.max_ticks {
                if executed >= max {
                    break;
                }
            }

            let started = Instant::now();
            self.engine.tick();
            executed += 1;

            if self.config.snapshot_path.is_some()
                && last_snapshot.elapsed() >= self.config.snapshot_interval
            {
                self.snapshot();
                last_snapshot = Instant::now();
            }

            let elapsed = started.elapsed();
            if elapsed >= self.config.tick_interval {
                log::warn!(
                    "tick {} overran the {:?} interval (took {:?})",
                    self.engine.tick_count(),
                    self.config.tick_interval,
                    elapsed
                );
            } else {
                self.sleep_cancellable(self.config.tick_interval - elapsed);
            }
        }

        if self.config.snapshot_path.is_some() {
            self.snapshot();
        }
        executed
    }

    /// Sleep in short slices so cancellation is noticed promptly
    fn sleep_cancellable(&self, remaining: Duration) {
        let slice = Duration::from_millis(50);
        let deadline = Instant::now() + remaining;

        while !self.cancel.load(Ordering::Relaxed) {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                break;
            }
            std::thread::sleep(left.min(slice));
        }
    }

    /// Snapshot failures are logged and never abort the tick loop
    fn snapshot(&self) {
        let path = match &self.config.snapshot_path {
            Some(path) => path,
            None => return,
        };

        let result = std::fs::File::create(path)
            .map_err(SaveError::Io)
            .and_then(|file| self.engine.save(std::io::BufWriter::new(file)));

        match result {
            Ok(()) => log::debug!("snapshot written to {}", path.display()),
            Err(e) => log::error!("snapshot to {} failed: {}", path.display(), e),
        }
    }
}
