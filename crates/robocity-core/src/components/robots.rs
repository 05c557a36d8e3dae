//! Robot worker components.

use serde::{Deserialize, Serialize};

use super::projects::{ProjectId, ProjectKind};

pub type RobotId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotKind {
    Construction,
    Planning,
    Maintenance,
    Security,
}

impl RobotKind {
    /// Construction units are generalists and take any project kind
    pub fn is_generalist(&self) -> bool {
        matches!(self, RobotKind::Construction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotStatus {
    Active,
    Inactive,
}

/// A worker unit. Holds at most one task at a time; the assignment loop
/// is the only writer of the task binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    pub id: RobotId,
    pub name: String,
    pub kind: RobotKind,
    pub status: RobotStatus,
    /// Zone or landmark the robot is stationed at
    pub location: String,
    /// Work-rate multiplier, roughly 0.5 to 1.0
    pub efficiency: f32,
    /// Project kind this robot is tuned for
    pub specialization: ProjectKind,
    current_task: Option<ProjectId>,
    pub tasks_completed: u32,
}

impl Robot {
    pub fn new(
        id: RobotId,
        name: impl Into<String>,
        kind: RobotKind,
        specialization: ProjectKind,
        efficiency: f32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            status: RobotStatus::Active,
            location: String::new(),
            efficiency,
            specialization,
            current_task: None,
            tasks_completed: 0,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn current_task(&self) -> Option<ProjectId> {
        self.current_task
    }

    pub fn is_idle(&self) -> bool {
        self.current_task.is_none() && self.status == RobotStatus::Active
    }

    /// True when this robot may take on a project of `kind`
    pub fn can_work_on(&self, kind: ProjectKind) -> bool {
        self.kind.is_generalist() || self.specialization == kind
    }

    pub fn assign(&mut self, project: ProjectId) {
        debug_assert!(self.current_task.is_none());
        self.current_task = Some(project);
    }

    /// Clear the task binding and credit the finished task
    pub fn release(&mut self) {
        if self.current_task.take().is_some() {
            self.tasks_completed += 1;
        }
    }
}
