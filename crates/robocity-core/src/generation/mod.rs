//! City and robot pool generation

mod city;
mod names;
mod robots;

pub use city::{generate_city, CityConfig};
pub use names::generate_robot_name;
pub use robots::generate_robots;
