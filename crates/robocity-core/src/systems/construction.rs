//! Construction progress engine - advances in-progress projects each
//! tick, applies completion yields, and recomputes the derived stats.

use crate::components::{
    CityStats, ProjectId, ProjectKind, ProjectQueue, Robot, RobotId, Zone, ZoneKind,
};
use hecs::World;

/// Base progress units per tick before multipliers
pub const BASE_RATE: f32 = 2.0;
/// Pooled efficiency used when no robot matches the project kind
const FALLBACK_EFFICIENCY: f32 = 0.5;
/// Upper bound on the pooled efficiency factor
const MAX_EFFICIENCY_FACTOR: f32 = 2.0;

/// Mean efficiency of robots specialized for `kind`, capped at 2.0
pub fn efficiency_factor(world: &World, kind: ProjectKind) -> f32 {
    let mut sum = 0.0;
    let mut count = 0u32;

    for (_, robot) in world.query::<&Robot>().iter() {
        if robot.specialization == kind {
            sum += robot.efficiency;
            count += 1;
        }
    }

    if count == 0 {
        FALLBACK_EFFICIENCY
    } else {
        (sum / count as f32).min(MAX_EFFICIENCY_FACTOR)
    }
}

/// Occupancy ratio of the zone of the given kind, if it exists
pub fn zone_occupancy(world: &World, kind: ZoneKind) -> Option<f32> {
    world
        .query::<&Zone>()
        .iter()
        .find(|(_, zone)| zone.kind == kind)
        .map(|(_, zone)| zone.occupancy())
}

/// Crowded zones build slower: max(0.5, 1 - occupancy / 2)
pub fn zone_bonus(world: &World, kind: ZoneKind) -> f32 {
    match zone_occupancy(world, kind) {
        Some(occupancy) => (1.0 - occupancy * 0.5).max(0.5),
        None => 1.0,
    }
}

struct Completion {
    id: ProjectId,
    kind: ProjectKind,
    zone: ZoneKind,
    capacity: u32,
    housing_units: u32,
    population: u32,
    jobs: u32,
    robot: Option<RobotId>,
}

/// Advance every in-progress project one tick and apply completions:
/// zone occupancy, city stat yields, robot release. Completed projects
/// leave the active queue. Returns the ids completed this tick.
pub fn advance_projects(
    world: &mut World,
    queue: &mut ProjectQueue,
    stats: &mut CityStats,
) -> Vec<ProjectId> {
    let mut completions: Vec<Completion> = Vec::new();

    for project in queue.projects.iter_mut() {
        if !project.is_in_progress() {
            continue;
        }

        let delta = BASE_RATE
            * efficiency_factor(world, project.kind)
            * zone_bonus(world, project.zone);

        if project.advance(delta) {
            let robot = project.complete();
            completions.push(Completion {
                id: project.id,
                kind: project.kind,
                zone: project.zone,
                capacity: project.capacity,
                housing_units: project.housing_units,
                population: project.population,
                jobs: project.jobs,
                robot,
            });
        }
    }

    for done in &completions {
        for (_, zone) in world.query::<&mut Zone>().iter() {
            if zone.kind == done.zone {
                zone.apply_yield(done.capacity);
            }
        }

        stats.housing += done.housing_units;
        stats.population += done.population;
        stats.employment += done.jobs;
        if done.kind == ProjectKind::Infrastructure {
            stats.infrastructure += done.capacity;
        }

        if let Some(robot_id) = done.robot {
            for (_, robot) in world.query::<&mut Robot>().iter() {
                if robot.id == robot_id {
                    robot.release();
                }
            }
        }

        log::info!("project {} completed in the {} zone", done.id, done.zone.name());
    }

    queue.remove_completed();
    completions.iter().map(|c| c.id).collect()
}

/// Recompute happiness, crime and pollution from the aggregates.
/// Fixed linear blends, clamped to [0, 100]. An empty city reads as
/// fully housed and employed.
pub fn recompute_derived_stats(world: &World, stats: &mut CityStats) {
    let industrial = zone_occupancy(world, ZoneKind::Industrial).unwrap_or(0.0);
    let government = zone_occupancy(world, ZoneKind::Government).unwrap_or(0.0);

    let (housing_ratio, employment_ratio) = if stats.population == 0 {
        (1.0, 1.0)
    } else {
        let population = stats.population as f32;
        (
            (stats.housing as f32 / population).min(1.0),
            (stats.employment as f32 / population).min(1.0),
        )
    };

    stats.happiness =
        40.0 * housing_ratio + 40.0 * employment_ratio + 20.0 * (1.0 - industrial);
    stats.crime = 60.0 * (1.0 - employment_ratio) * (1.0 - 0.5 * government);
    stats.pollution = 70.0 * industrial + (stats.population as f32 / 100.0).min(30.0);
    stats.clamp_derived();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Priority, Project, RobotKind};
    use crate::systems::assign_idle_robots;

    fn housing_site(id: ProjectId) -> Project {
        Project::new(id, "Residential Complex", ProjectKind::Housing, Priority::Normal, 0)
            .with_yields(100, 100, 80, 10)
    }

    #[test]
    fn test_efficiency_factor_fallback_and_mean() {
        let mut world = World::new();
        assert_eq!(efficiency_factor(&world, ProjectKind::Housing), 0.5);

        world.spawn((Robot::new(1, "ATLAS-001", RobotKind::Construction, ProjectKind::Housing, 0.6),));
        world.spawn((Robot::new(2, "RIVET-002", RobotKind::Construction, ProjectKind::Housing, 1.0),));
        world.spawn((Robot::new(3, "MASON-003", RobotKind::Planning, ProjectKind::Commercial, 0.9),));

        // Mean over the two housing specialists only
        assert!((efficiency_factor(&world, ProjectKind::Housing) - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_zone_bonus_degrades_with_crowding() {
        let mut world = World::new();
        let mut zone = Zone::new(ZoneKind::Residential, 1000);
        zone.apply_yield(500);
        world.spawn((zone,));

        // Half full: 1 - 0.25 = 0.75
        assert!((zone_bonus(&world, ZoneKind::Residential) - 0.75).abs() < 0.001);

        for (_, zone) in world.query::<&mut Zone>().iter() {
            zone.apply_yield(500);
        }
        // Full zone floors at 0.5
        assert!((zone_bonus(&world, ZoneKind::Residential) - 0.5).abs() < 0.001);

        // Missing zone is neutral
        assert!((zone_bonus(&world, ZoneKind::Government) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_single_tick_delta() {
        let mut world = World::new();
        world.spawn((Zone::new(ZoneKind::Residential, 1000),));
        world.spawn((Robot::new(1, "ATLAS-001", RobotKind::Construction, ProjectKind::Housing, 0.8),));

        let mut queue = ProjectQueue::new();
        queue.enqueue(housing_site(1));
        assign_idle_robots(&mut world, &mut queue);

        let mut stats = CityStats::default();
        advance_projects(&mut world, &mut queue, &mut stats);

        // 2.0 * 0.8 * 1.0 = 1.6
        assert!((queue.get(1).unwrap().progress() - 1.6).abs() < 0.001);
    }

    #[test]
    fn test_completion_applies_yields_once_and_releases_robot() {
        let mut world = World::new();
        world.spawn((Zone::new(ZoneKind::Residential, 1000),));
        world.spawn((Robot::new(1, "ATLAS-001", RobotKind::Construction, ProjectKind::Housing, 1.0),));

        let mut queue = ProjectQueue::new();
        queue.enqueue(housing_site(1));
        assign_idle_robots(&mut world, &mut queue);

        let mut stats = CityStats::default();
        let mut completed = Vec::new();
        for _ in 0..60 {
            completed.extend(advance_projects(&mut world, &mut queue, &mut stats));
        }

        assert_eq!(completed, vec![1]);
        assert_eq!(stats.housing, 100);
        assert_eq!(stats.population, 80);
        assert_eq!(stats.employment, 10);
        assert_eq!(queue.completed, 1);
        assert!(queue.projects.is_empty());

        for (_, zone) in world.query::<&Zone>().iter() {
            assert_eq!(zone.current, 100);
        }
        for (_, robot) in world.query::<&Robot>().iter() {
            assert!(robot.is_idle());
            assert_eq!(robot.tasks_completed, 1);
        }

        // Further ticks must not re-apply anything
        for _ in 0..10 {
            advance_projects(&mut world, &mut queue, &mut stats);
        }
        assert_eq!(stats.housing, 100);
        assert_eq!(stats.population, 80);
    }

    #[test]
    fn test_infrastructure_completion_grows_infrastructure_stat() {
        let mut world = World::new();
        world.spawn((Zone::new(ZoneKind::Industrial, 400),));
        world.spawn((Robot::new(1, "PYLON-001", RobotKind::Construction, ProjectKind::Infrastructure, 1.0),));

        let mut queue = ProjectQueue::new();
        queue.enqueue(
            Project::new(1, "Industrial Works", ProjectKind::Infrastructure, Priority::Normal, 0)
                .with_yields(60, 0, 0, 60),
        );
        assign_idle_robots(&mut world, &mut queue);

        let mut stats = CityStats::default();
        for _ in 0..60 {
            advance_projects(&mut world, &mut queue, &mut stats);
        }

        assert_eq!(stats.infrastructure, 60);
        assert_eq!(stats.employment, 60);
    }

    #[test]
    fn test_derived_stats_stay_in_range() {
        let mut world = World::new();
        let mut industrial = Zone::new(ZoneKind::Industrial, 100);
        industrial.apply_yield(100);
        world.spawn((industrial,));

        let mut stats = CityStats {
            population: 50_000,
            housing: 0,
            employment: 0,
            ..Default::default()
        };
        recompute_derived_stats(&world, &mut stats);

        assert!((0.0..=100.0).contains(&stats.happiness));
        assert!((0.0..=100.0).contains(&stats.crime));
        assert!((0.0..=100.0).contains(&stats.pollution));
    }

    #[test]
    fn test_empty_city_is_content() {
        let world = World::new();
        let mut stats = CityStats::default();
        recompute_derived_stats(&world, &mut stats);

        assert_eq!(stats.crime, 0.0);
        assert!(stats.happiness > 90.0);
    }
}
