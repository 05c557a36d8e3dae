//! Zone and starting-stat seeding

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::components::{CityStats, Zone, ZoneKind};

/// Initial city parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub robot_count: u32,
    pub residential_capacity: u32,
    pub commercial_capacity: u32,
    pub industrial_capacity: u32,
    pub government_capacity: u32,
    pub starting_population: u32,
    pub starting_housing: u32,
    pub starting_employment: u32,
    pub starting_infrastructure: u32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            robot_count: 8,
            residential_capacity: 1000,
            commercial_capacity: 600,
            industrial_capacity: 400,
            government_capacity: 200,
            starting_population: 500,
            starting_housing: 600,
            starting_employment: 450,
            starting_infrastructure: 60,
        }
    }
}

impl CityConfig {
    pub fn zone_capacity(&self, kind: ZoneKind) -> u32 {
        match kind {
            ZoneKind::Residential => self.residential_capacity,
            ZoneKind::Commercial => self.commercial_capacity,
            ZoneKind::Industrial => self.industrial_capacity,
            ZoneKind::Government => self.government_capacity,
        }
    }

    pub fn starting_stats(&self) -> CityStats {
        CityStats {
            population: self.starting_population,
            housing: self.starting_housing,
            employment: self.starting_employment,
            infrastructure: self.starting_infrastructure,
            ..Default::default()
        }
    }
}

/// Spawn the four fixed zones. Called once at generation time; the
/// progress engine is the only later writer.
pub fn generate_city(world: &mut World, config: &CityConfig) -> Vec<Entity> {
    ZoneKind::ALL
        .iter()
        .map(|&kind| world.spawn((Zone::new(kind, config.zone_capacity(kind)),)))
        .collect()
}
