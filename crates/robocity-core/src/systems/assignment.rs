//! Task assignment - binds idle robots to queued projects.
//!
//! This loop exclusively owns the Robot <-> Project binding; no other
//! system assigns or clears it. Matching is first-fit in robot id order
//! against a priority-sorted queue, and in-progress work is never
//! preempted.

use crate::components::{ProjectQueue, Robot, RobotId};
use hecs::World;

/// Match idle robots against the queue, emergency projects first.
/// Returns the number of bindings made this pass. Finding nothing to
/// assign is a no-op, not an error.
pub fn assign_idle_robots(world: &mut World, queue: &mut ProjectQueue) -> u32 {
    queue.sort_by_priority();

    // Candidates in id order so the pass is deterministic
    let mut idle: Vec<(RobotId, hecs::Entity)> = world
        .query::<&Robot>()
        .iter()
        .filter(|(_, robot)| robot.is_idle())
        .map(|(entity, robot)| (robot.id, entity))
        .collect();
    idle.sort_by_key(|(id, _)| *id);

    let mut assigned = 0;
    for (_, entity) in idle {
        if let Ok(mut robot) = world.get::<&mut Robot>(entity) {
            let candidate = queue
                .projects
                .iter_mut()
                .find(|p| p.is_queued() && robot.can_work_on(p.kind));

            if let Some(project) = candidate {
                if project.assign(robot.id) {
                    robot.assign(project.id);
                    log::info!(
                        "robot {} ({}) took project {} ({})",
                        robot.id,
                        robot.name,
                        project.id,
                        project.name
                    );
                    assigned += 1;
                }
            }
        }
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Priority, Project, ProjectKind, RobotKind};

    fn housing_project(id: u64, priority: Priority) -> Project {
        Project::new(id, "Residential Complex", ProjectKind::Housing, priority, 0)
    }

    #[test]
    fn test_binds_robot_and_project_both_ways() {
        let mut world = World::new();
        world.spawn((Robot::new(1, "ATLAS-001", RobotKind::Construction, ProjectKind::Housing, 0.9),));

        let mut queue = ProjectQueue::new();
        queue.enqueue(housing_project(10, Priority::Normal));

        assert_eq!(assign_idle_robots(&mut world, &mut queue), 1);

        let project = queue.get(10).unwrap();
        assert!(project.is_in_progress());
        assert_eq!(project.assigned_robot(), Some(1));

        for (_, robot) in world.query::<&Robot>().iter() {
            assert_eq!(robot.current_task(), Some(10));
        }
    }

    #[test]
    fn test_specialization_mismatch_is_a_noop() {
        let mut world = World::new();
        world.spawn((Robot::new(1, "MASON-001", RobotKind::Planning, ProjectKind::Commercial, 0.8),));

        let mut queue = ProjectQueue::new();
        queue.enqueue(housing_project(10, Priority::Normal));

        assert_eq!(assign_idle_robots(&mut world, &mut queue), 0);
        assert!(queue.get(10).unwrap().is_queued());
    }

    #[test]
    fn test_emergency_projects_assigned_first() {
        let mut world = World::new();
        world.spawn((Robot::new(1, "ATLAS-001", RobotKind::Construction, ProjectKind::Housing, 0.9),));

        let mut queue = ProjectQueue::new();
        queue.enqueue(housing_project(10, Priority::Normal));
        queue.enqueue(housing_project(11, Priority::Emergency));

        assign_idle_robots(&mut world, &mut queue);

        assert!(queue.get(11).unwrap().is_in_progress());
        assert!(queue.get(10).unwrap().is_queued());
    }

    #[test]
    fn test_busy_robot_is_never_preempted() {
        let mut world = World::new();
        let mut robot = Robot::new(1, "ATLAS-001", RobotKind::Construction, ProjectKind::Housing, 0.9);
        robot.assign(99);
        world.spawn((robot,));

        let mut queue = ProjectQueue::new();
        queue.enqueue(housing_project(11, Priority::Emergency));

        assert_eq!(assign_idle_robots(&mut world, &mut queue), 0);
        assert!(queue.get(11).unwrap().is_queued());

        for (_, robot) in world.query::<&Robot>().iter() {
            assert_eq!(robot.current_task(), Some(99));
        }
    }

    #[test]
    fn test_one_task_per_robot() {
        let mut world = World::new();
        world.spawn((Robot::new(1, "ATLAS-001", RobotKind::Construction, ProjectKind::Housing, 0.9),));

        let mut queue = ProjectQueue::new();
        queue.enqueue(housing_project(10, Priority::Normal));
        queue.enqueue(housing_project(11, Priority::Normal));

        assert_eq!(assign_idle_robots(&mut world, &mut queue), 1);
        assert!(queue.get(10).unwrap().is_in_progress());
        assert!(queue.get(11).unwrap().is_queued());
    }
}
