//! Need analysis - decides which project kinds the city currently needs.

use crate::components::{CityStats, ProjectKind, Zone, ZoneKind};
use hecs::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeedPriority {
    Medium,
    High,
}

/// A detected construction need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Need {
    pub kind: ProjectKind,
    pub priority: NeedPriority,
    pub zone: ZoneKind,
}

/// Inspect aggregate stats and zone occupancy and report what the city
/// needs built. Pure with respect to calls - no memory between passes.
/// Rules fire independently, so several needs can surface at once.
pub fn analyze_needs(world: &World, stats: &CityStats) -> Vec<Need> {
    let mut needs = Vec::new();
    let population = stats.population as f32;

    if population > stats.housing as f32 * 0.8 {
        needs.push(Need {
            kind: ProjectKind::Housing,
            priority: NeedPriority::High,
            zone: ZoneKind::Residential,
        });
    }

    if population > stats.employment as f32 * 1.2 {
        needs.push(Need {
            kind: ProjectKind::Commercial,
            priority: NeedPriority::Medium,
            zone: ZoneKind::Commercial,
        });
    }

    if (stats.infrastructure as f32) < population * 0.1 {
        needs.push(Need {
            kind: ProjectKind::Infrastructure,
            priority: NeedPriority::High,
            zone: ZoneKind::Industrial,
        });
    }

    if stats.population > 1000 && government_occupied(world) < 50 {
        needs.push(Need {
            kind: ProjectKind::Government,
            priority: NeedPriority::Medium,
            zone: ZoneKind::Government,
        });
    }

    needs
}

fn government_occupied(world: &World) -> u32 {
    world
        .query::<&Zone>()
        .iter()
        .find(|(_, zone)| zone.kind == ZoneKind::Government)
        .map(|(_, zone)| zone.current)
        .unwrap_or(0)
}
