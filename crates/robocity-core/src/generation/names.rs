//! Robot callsign generation

use rand::Rng;

const SERIES: [&str; 12] = [
    "ATLAS", "VULCAN", "FORGE", "MASON", "GIRDER", "RIVET", "PYLON", "GANTRY", "DERRICK",
    "CRANE", "BULWARK", "KEYSTONE",
];

/// Generate a callsign like "RIVET-042"
pub fn generate_robot_name(rng: &mut impl Rng) -> String {
    let series = SERIES[rng.gen_range(0..SERIES.len())];
    format!("{}-{:03}", series, rng.gen_range(1..1000))
}
