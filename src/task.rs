use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One atomic piece of a task needing a worker assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: Uuid,
    /// Resource requirement expression, e.g. "linux" or "linux && x86_64".
    pub requirement: String,
}

impl WorkItem {
    pub fn new(requirement: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            requirement,
        }
    }

    /// Rotation key for this item. Items with the same requirement
    /// expression draw from the same worker pool and share one rotation
    /// cursor.
    pub fn label(&self) -> &str {
        &self.requirement
    }
}

/// A concrete worker eligible to run one work item. Identified by a
/// unique, comparable name. Candidate sets are supplied by the scheduler
/// per item and per attempt - workers come and go between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCandidate {
    pub name: String,
}

impl WorkerCandidate {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// The schedulable unit submitted by the external scheduler, one per
/// scheduling attempt. Read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub work_items: Vec<WorkItem>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(name: String, work_items: Vec<WorkItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            work_items,
            created_at: Utc::now(),
        }
    }
}
