//! Robocity Core - City Construction Simulation Engine
//!
//! A tick-driven simulation of an autonomous robot workforce building out
//! a small city. Each tick runs need analysis over the city aggregates,
//! a project factory that turns needs into queued construction projects,
//! a task-assignment pass that binds idle robots to the queue, and a
//! progress engine that advances work and applies completion yields.
//! State persists through versioned bincode snapshots.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System via `hecs`:
//! - **Entities**: robots and zones
//! - **Components**: pure data (Robot, Zone)
//! - **Systems**: free functions that query and update components;
//!   singleton state (project queue, city stats) lives on the engine
//!
//! # Example
//!
//! ```rust,no_run
//! use robocity_core::prelude::*;
//! use robocity_core::generation::CityConfig;
//!
//! let mut engine = CityEngine::new();
//! engine.generate(&CityConfig::default());
//!
//! loop {
//!     engine.tick();
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod scheduler;
pub mod systems;

pub use hecs;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{CityEngine, ProjectReport, RobotReport, ZoneReport};
    pub use crate::scheduler::{Scheduler, SchedulerConfig};
}
