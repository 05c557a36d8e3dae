//! Project components and the active project queue.

use serde::{Deserialize, Serialize};

use super::city::ZoneKind;
use super::robots::RobotId;

pub type ProjectId = u64;

/// Project categories; each maps to the zone it builds into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectKind {
    Housing,
    Commercial,
    Infrastructure,
    Government,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 4] = [
        ProjectKind::Housing,
        ProjectKind::Commercial,
        ProjectKind::Infrastructure,
        ProjectKind::Government,
    ];

    /// Zone a project of this kind builds into
    pub fn target_zone(&self) -> ZoneKind {
        match self {
            ProjectKind::Housing => ZoneKind::Residential,
            ProjectKind::Commercial => ZoneKind::Commercial,
            ProjectKind::Infrastructure => ZoneKind::Industrial,
            ProjectKind::Government => ZoneKind::Government,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectKind::Housing => "housing",
            ProjectKind::Commercial => "commercial",
            ProjectKind::Infrastructure => "infrastructure",
            ProjectKind::Government => "government",
        }
    }
}

/// Emergency projects sort ahead of normal ones in the assignment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Normal,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Queued,
    InProgress,
    Completed,
}

/// A unit of construction work.
///
/// Status, progress and the robot binding only change through methods so
/// the state machine (Queued -> InProgress -> Completed) holds: a project
/// is in progress exactly when a robot is bound to it, progress never
/// decreases, and completion is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub kind: ProjectKind,
    pub zone: ZoneKind,
    pub priority: Priority,
    status: ProjectStatus,
    progress: f32,
    /// Occupancy units added to the target zone on completion
    pub capacity: u32,
    pub housing_units: u32,
    pub population: u32,
    pub jobs: u32,
    pub cost: u32,
    /// Nominal tick budget, advisory only - completion is progress-driven
    pub duration: u32,
    assigned_robot: Option<RobotId>,
    /// Tick the project was created on
    pub created_at: u64,
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        kind: ProjectKind,
        priority: Priority,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            zone: kind.target_zone(),
            priority,
            status: ProjectStatus::Queued,
            progress: 0.0,
            capacity: 0,
            housing_units: 0,
            population: 0,
            jobs: 0,
            cost: 0,
            duration: 0,
            assigned_robot: None,
            created_at,
        }
    }

    pub fn with_yields(mut self, capacity: u32, housing_units: u32, population: u32, jobs: u32) -> Self {
        self.capacity = capacity;
        self.housing_units = housing_units;
        self.population = population;
        self.jobs = jobs;
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Progress toward completion, 0 to 100
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn assigned_robot(&self) -> Option<RobotId> {
        self.assigned_robot
    }

    pub fn is_queued(&self) -> bool {
        self.status == ProjectStatus::Queued
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == ProjectStatus::InProgress
    }

    pub fn is_complete(&self) -> bool {
        self.status == ProjectStatus::Completed
    }

    /// Queued -> InProgress; returns false (and does nothing) in any other state
    pub fn assign(&mut self, robot: RobotId) -> bool {
        if self.status != ProjectStatus::Queued {
            return false;
        }
        self.status = ProjectStatus::InProgress;
        self.assigned_robot = Some(robot);
        true
    }

    /// Accumulate progress; returns true once the project has reached 100.
    /// Only in-progress projects advance, and progress never decreases.
    pub fn advance(&mut self, delta: f32) -> bool {
        if self.status != ProjectStatus::InProgress || delta <= 0.0 {
            return false;
        }
        self.progress = (self.progress + delta).min(100.0);
        self.progress >= 100.0
    }

    /// InProgress -> Completed (terminal). Clears and returns the robot
    /// binding so the caller can release the worker.
    pub fn complete(&mut self) -> Option<RobotId> {
        if self.status != ProjectStatus::InProgress {
            return None;
        }
        self.status = ProjectStatus::Completed;
        self.progress = 100.0;
        self.assigned_robot.take()
    }
}

/// Active project queue (singleton, stored on the engine)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectQueue {
    pub projects: Vec<Project>,
    next_id: ProjectId,
    /// Lifetime count of completed projects
    pub completed: u64,
}

impl ProjectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> ProjectId {
        self.next_id += 1;
        self.next_id
    }

    pub fn enqueue(&mut self, project: Project) {
        self.projects.push(project);
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn queued_count(&self) -> usize {
        self.projects.iter().filter(|p| p.is_queued()).count()
    }

    pub fn in_progress_count(&self) -> usize {
        self.projects.iter().filter(|p| p.is_in_progress()).count()
    }

    /// Emergency first; stable within a priority class
    pub fn sort_by_priority(&mut self) {
        self.projects.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Drop completed projects, keeping the lifetime counter
    pub fn remove_completed(&mut self) {
        let before = self.projects.len();
        self.projects.retain(|p| !p.is_complete());
        self.completed += (before - self.projects.len()) as u64;
    }
}
