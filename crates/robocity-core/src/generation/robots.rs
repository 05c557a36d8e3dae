//! Robot pool seeding

use hecs::{Entity, World};
use rand::Rng;

use super::names::generate_robot_name;
use crate::components::{ProjectKind, Robot, RobotKind};

/// Seed the worker pool. Ids are assigned sequentially from 1 and the
/// pool persists for the process lifetime; task binding is the only
/// later mutation.
pub fn generate_robots(world: &mut World, count: u32, rng: &mut impl Rng) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(count as usize);

    for i in 0..count {
        let kind = robot_kind(rng);
        let specialization = robot_specialization(rng);
        let efficiency = rng.gen_range(0.5..=1.0);
        let name = generate_robot_name(rng);
        let location = specialization.target_zone().name().to_string();

        let robot = Robot::new(i + 1, name, kind, specialization, efficiency)
            .with_location(location);
        spawned.push(world.spawn((robot,)));
    }

    spawned
}

/// Distribution: construction 40%, planning 20%, maintenance 20%, security 20%
fn robot_kind(rng: &mut impl Rng) -> RobotKind {
    match rng.gen_range(0..10) {
        0..=3 => RobotKind::Construction,
        4..=5 => RobotKind::Planning,
        6..=7 => RobotKind::Maintenance,
        _ => RobotKind::Security,
    }
}

/// Even spread; generalists still carry a tag for efficiency pooling
fn robot_specialization(rng: &mut impl Rng) -> ProjectKind {
    match rng.gen_range(0..4) {
        0 => ProjectKind::Housing,
        1 => ProjectKind::Commercial,
        2 => ProjectKind::Infrastructure,
        _ => ProjectKind::Government,
    }
}
