//! City structure components: Zone, CityStats.

use serde::{Deserialize, Serialize};

/// City district categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Residential,
    Commercial,
    Industrial,
    Government,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 4] = [
        ZoneKind::Residential,
        ZoneKind::Commercial,
        ZoneKind::Industrial,
        ZoneKind::Government,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ZoneKind::Residential => "residential",
            ZoneKind::Commercial => "commercial",
            ZoneKind::Industrial => "industrial",
            ZoneKind::Government => "government",
        }
    }
}

/// Zone component - a city district with bounded occupancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    /// Maximum occupancy units
    pub capacity: u32,
    /// Occupied units, never exceeds `capacity`
    pub current: u32,
    /// Reserved for organic growth, not read by the construction loop
    pub growth_rate: f32,
}

impl Zone {
    pub fn new(kind: ZoneKind, capacity: u32) -> Self {
        Self {
            kind,
            capacity,
            current: 0,
            growth_rate: 1.0,
        }
    }

    /// Occupancy ratio in [0, 1]; a zero-capacity zone counts as full
    pub fn occupancy(&self) -> f32 {
        if self.capacity == 0 {
            1.0
        } else {
            self.current as f32 / self.capacity as f32
        }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.capacity
    }

    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.current)
    }

    /// Occupy units from a completed project, clamped at capacity
    pub fn apply_yield(&mut self, units: u32) {
        self.current = (self.current + units).min(self.capacity);
    }
}

/// A project targeted a zone with no remaining capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneFull(pub ZoneKind);

impl std::fmt::Display for ZoneFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} zone is at capacity", self.0.name())
    }
}

impl std::error::Error for ZoneFull {}

/// Aggregate city counters.
///
/// `population`, `housing`, `employment` and `infrastructure` accumulate
/// project yields; the three percentage fields are derived each tick and
/// clamped to [0, 100]. External callers never set these directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub population: u32,
    pub housing: u32,
    pub employment: u32,
    pub infrastructure: u32,
    pub happiness: f32,
    pub crime: f32,
    pub pollution: f32,
}

impl CityStats {
    pub fn clamp_derived(&mut self) {
        self.happiness = self.happiness.clamp(0.0, 100.0);
        self.crime = self.crime.clamp(0.0, 100.0);
        self.pollution = self.pollution.clamp(0.0, 100.0);
    }
}
