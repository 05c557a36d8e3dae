//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! Logic that spans entities lives in systems.

mod city;
mod projects;
mod robots;

pub use city::*;
pub use projects::*;
pub use robots::*;
