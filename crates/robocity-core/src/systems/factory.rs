//! Project factory - turns detected needs into concrete project records.

use crate::components::{
    Priority, Project, ProjectId, ProjectKind, ProjectQueue, Zone, ZoneFull, ZoneKind,
};
use crate::systems::Need;
use hecs::World;
use rand::Rng;

/// Chance that a detected need spawns a project on any given tick.
/// Throttles creation against completion throughput so the queue does
/// not flood every pass.
pub const SPAWN_CHANCE: f64 = 0.3;

/// Canonical per-kind project parameters
#[derive(Debug, Clone, Copy)]
pub struct ProjectTemplate {
    pub name: &'static str,
    pub capacity: u32,
    pub housing_units: u32,
    pub population: u32,
    pub jobs: u32,
    pub cost: u32,
    pub duration: u32,
}

pub fn template_for(kind: ProjectKind) -> ProjectTemplate {
    match kind {
        ProjectKind::Housing => ProjectTemplate {
            name: "Residential Complex",
            capacity: 100,
            housing_units: 100,
            population: 80,
            jobs: 10,
            cost: 50_000,
            duration: 60,
        },
        ProjectKind::Commercial => ProjectTemplate {
            name: "Commercial Plaza",
            capacity: 80,
            housing_units: 0,
            population: 0,
            jobs: 120,
            cost: 75_000,
            duration: 50,
        },
        ProjectKind::Infrastructure => ProjectTemplate {
            name: "Industrial Works",
            capacity: 60,
            housing_units: 0,
            population: 0,
            jobs: 60,
            cost: 100_000,
            duration: 80,
        },
        ProjectKind::Government => ProjectTemplate {
            name: "Civic Center",
            capacity: 40,
            housing_units: 0,
            population: 0,
            jobs: 40,
            cost: 120_000,
            duration: 70,
        },
    }
}

/// Build a queued project for `kind` from its template. A full target
/// zone is a hard block, reported as `ZoneFull`. Emergency priority
/// halves the advisory duration.
pub fn create_project(
    world: &World,
    queue: &mut ProjectQueue,
    kind: ProjectKind,
    priority: Priority,
    current_tick: u64,
) -> Result<ProjectId, ZoneFull> {
    let zone = kind.target_zone();
    if zone_is_full(world, zone) {
        return Err(ZoneFull(zone));
    }

    let template = template_for(kind);
    let duration = match priority {
        Priority::Emergency => template.duration / 2,
        Priority::Normal => template.duration,
    };

    let id = queue.allocate_id();
    let project = Project::new(id, template.name, kind, priority, current_tick)
        .with_yields(
            template.capacity,
            template.housing_units,
            template.population,
            template.jobs,
        )
        .with_cost(template.cost)
        .with_duration(duration);
    queue.enqueue(project);
    Ok(id)
}

/// Per-tick generator: each detected need has a fixed chance of spawning
/// a project this pass.
pub fn spawn_projects(
    world: &World,
    queue: &mut ProjectQueue,
    needs: &[Need],
    current_tick: u64,
    rng: &mut impl Rng,
) -> Vec<ProjectId> {
    let mut created = Vec::new();

    for need in needs {
        if !rng.gen_bool(SPAWN_CHANCE) {
            continue;
        }
        match create_project(world, queue, need.kind, Priority::Normal, current_tick) {
            Ok(id) => {
                log::debug!("queued {} project {} for {}", need.kind.name(), id, need.zone.name());
                created.push(id);
            }
            Err(full) => log::debug!("skipped {} need: {}", need.kind.name(), full),
        }
    }

    created
}

/// Operator action: queue one emergency project each for housing,
/// commercial and infrastructure with halved duration, regardless of
/// current analyzer output.
pub fn queue_emergency_projects(
    world: &World,
    queue: &mut ProjectQueue,
    current_tick: u64,
) -> Vec<ProjectId> {
    let mut created = Vec::new();

    for kind in [ProjectKind::Housing, ProjectKind::Commercial, ProjectKind::Infrastructure] {
        match create_project(world, queue, kind, Priority::Emergency, current_tick) {
            Ok(id) => {
                log::info!("emergency {} project {} queued", kind.name(), id);
                created.push(id);
            }
            Err(full) => log::warn!("emergency {} project blocked: {}", kind.name(), full),
        }
    }

    created
}

fn zone_is_full(world: &World, kind: ZoneKind) -> bool {
    world
        .query::<&Zone>()
        .iter()
        .find(|(_, zone)| zone.kind == kind)
        .map(|(_, zone)| zone.is_full())
        .unwrap_or(false)
}
