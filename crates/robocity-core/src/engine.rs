//! Simulation engine - owns the world, the queue and the tick sequence

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::components::{
    CityStats, Priority, ProjectId, ProjectKind, ProjectQueue, ProjectStatus, Robot, RobotKind,
    RobotStatus, Zone, ZoneKind,
};
use crate::generation::{generate_city, generate_robots, CityConfig};
use crate::persistence::SaveError;
use crate::systems::{
    advance_projects, analyze_needs, assign_idle_robots, queue_emergency_projects,
    recompute_derived_stats, spawn_projects,
};

/// Seed used when none is supplied; identical seeds replay identically
const DEFAULT_SEED: u64 = 42;

/// Main simulation engine.
///
/// Holds all mutable state of the construction loop: robots and zones as
/// ECS entities, the project queue, the aggregate stats and a
/// deterministic RNG. One `tick()` runs the full cycle in strict order:
/// need analysis, project factory, task assignment, progress/completion,
/// derived-stat recompute.
pub struct CityEngine {
    /// ECS world containing robots and zones
    pub world: World,
    stats: CityStats,
    queue: ProjectQueue,
    tick: u64,
    rng: ChaCha8Rng,
}

impl CityEngine {
    /// Create an empty engine with the default seed
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create an empty engine with an explicit seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            world: World::new(),
            stats: CityStats::default(),
            queue: ProjectQueue::new(),
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed the four zones, the robot pool and the starting stats
    pub fn generate(&mut self, config: &CityConfig) {
        generate_city(&mut self.world, config);
        generate_robots(&mut self.world, config.robot_count, &mut self.rng);
        self.stats = config.starting_stats();
        recompute_derived_stats(&self.world, &mut self.stats);
    }

    /// One full simulation step
    pub fn tick(&mut self) {
        self.tick += 1;

        let needs = analyze_needs(&self.world, &self.stats);
        spawn_projects(&self.world, &mut self.queue, &needs, self.tick, &mut self.rng);
        assign_idle_robots(&mut self.world, &mut self.queue);
        advance_projects(&mut self.world, &mut self.queue, &mut self.stats);
        recompute_derived_stats(&self.world, &mut self.stats);
    }

    /// Operator action: immediately queue emergency housing, commercial
    /// and infrastructure projects
    pub fn trigger_emergency_construction(&mut self) -> Vec<ProjectId> {
        queue_emergency_projects(&self.world, &mut self.queue, self.tick)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> &CityStats {
        &self.stats
    }

    pub fn queue(&self) -> &ProjectQueue {
        &self.queue
    }

    pub fn robot_count(&self) -> usize {
        self.world.query::<&Robot>().iter().count()
    }

    pub fn idle_robot_count(&self) -> usize {
        self.world
            .query::<&Robot>()
            .iter()
            .filter(|(_, robot)| robot.is_idle())
            .count()
    }

    pub fn zone_count(&self) -> usize {
        self.world.query::<&Zone>().iter().count()
    }

    /// Read-only projection of the robot pool for display layers
    pub fn robot_reports(&self) -> Vec<RobotReport> {
        let mut reports: Vec<RobotReport> = self
            .world
            .query::<&Robot>()
            .iter()
            .map(|(_, robot)| RobotReport {
                id: robot.id,
                name: robot.name.clone(),
                kind: robot.kind,
                status: robot.status,
                location: robot.location.clone(),
                efficiency: robot.efficiency,
                specialization: robot.specialization,
                current_task: robot.current_task(),
                tasks_completed: robot.tasks_completed,
            })
            .collect();
        reports.sort_by_key(|r| r.id);
        reports
    }

    /// Read-only projection of the active queue
    pub fn project_reports(&self) -> Vec<ProjectReport> {
        self.queue
            .projects
            .iter()
            .map(|project| ProjectReport {
                id: project.id,
                name: project.name.clone(),
                kind: project.kind,
                zone: project.zone,
                priority: project.priority,
                status: project.status(),
                progress: project.progress(),
                assigned_robot: project.assigned_robot(),
            })
            .collect()
    }

    /// Read-only projection of zone occupancy
    pub fn zone_reports(&self) -> Vec<ZoneReport> {
        let mut reports: Vec<ZoneReport> = self
            .world
            .query::<&Zone>()
            .iter()
            .map(|(_, zone)| ZoneReport {
                kind: zone.kind,
                capacity: zone.capacity,
                current: zone.current,
                occupancy: zone.occupancy(),
            })
            .collect();
        reports.sort_by_key(|r| r.kind.name());
        reports
    }

    /// Save the full subsystem state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        crate::persistence::save_city(writer, &self.world, self.tick, &self.stats, &self.queue)
    }

    /// Load state from a reader, replacing the current world. The RNG is
    /// reseeded rather than restored; progress is monotonic so replay
    /// divergence only affects future stochastic throttling.
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = crate::persistence::load_city(reader)?;
        self.world = loaded.world;
        self.stats = loaded.stats;
        self.queue = loaded.queue;
        self.tick = loaded.tick;
        Ok(())
    }
}

impl Default for CityEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Display projection of one robot
#[derive(Debug, Clone, Serialize)]
pub struct RobotReport {
    pub id: u32,
    pub name: String,
    pub kind: RobotKind,
    pub status: RobotStatus,
    pub location: String,
    pub efficiency: f32,
    pub specialization: ProjectKind,
    pub current_task: Option<ProjectId>,
    pub tasks_completed: u32,
}

/// Display projection of one queued or running project
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub id: ProjectId,
    pub name: String,
    pub kind: ProjectKind,
    pub zone: ZoneKind,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub progress: f32,
    pub assigned_robot: Option<u32>,
}

/// Display projection of one zone
#[derive(Debug, Clone, Serialize)]
pub struct ZoneReport {
    pub kind: ZoneKind,
    pub capacity: u32,
    pub current: u32,
    pub occupancy: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = CityEngine::new();
        assert_eq!(engine.robot_count(), 0);
        assert_eq!(engine.zone_count(), 0);
        assert_eq!(engine.tick_count(), 0);
    }

    #[test]
    fn test_engine_generation() {
        let mut engine = CityEngine::new();
        let config = CityConfig {
            robot_count: 5,
            ..Default::default()
        };
        engine.generate(&config);

        assert_eq!(engine.robot_count(), 5);
        assert_eq!(engine.zone_count(), 4);
        assert_eq!(engine.stats().population, 500);
        // Derived stats populated at generation time
        assert!(engine.stats().happiness > 0.0);
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut engine = CityEngine::with_seed(1);
        engine.generate(&CityConfig::default());

        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.tick_count(), 10);
    }

    #[test]
    fn test_emergency_trigger_queues_three() {
        let mut engine = CityEngine::with_seed(1);
        engine.generate(&CityConfig::default());

        let created = engine.trigger_emergency_construction();
        assert_eq!(created.len(), 3);
        assert_eq!(engine.queue().queued_count(), 3);
    }

    #[test]
    fn test_reports_are_pure_data() {
        let mut engine = CityEngine::with_seed(1);
        engine.generate(&CityConfig::default());
        engine.trigger_emergency_construction();
        engine.tick();

        let robots = engine.robot_reports();
        assert_eq!(robots.len(), 8);
        // Sorted by id
        for pair in robots.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }

        let zones = engine.zone_reports();
        assert_eq!(zones.len(), 4);

        // Projections never mutate engine state
        let before = engine.stats().clone();
        let _ = engine.project_reports();
        assert_eq!(engine.stats(), &before);
    }
}
