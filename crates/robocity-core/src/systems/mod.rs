//! Systems - logic that operates on components

mod analysis;
mod assignment;
mod construction;
mod factory;

pub use analysis::*;
pub use assignment::*;
pub use construction::*;
pub use factory::*;
