//! Pluggable assignment policies.
//!
//! `LoadBalancer` is the contract the external scheduler drives: one `map`
//! call per scheduling attempt, returning a complete mapping or `None`.
//! `RoundRobinBalancer` spreads repeated work across capacity per label and
//! delegates to a wrapped fallback policy whenever it cannot complete a
//! task; `FirstFit` is the greedy baseline it typically wraps.

pub mod first_fit;
pub mod ordering;
pub mod rotation;
pub mod round_robin;

pub use first_fit::FirstFit;
pub use rotation::RotationTable;
pub use round_robin::RoundRobinBalancer;

use std::collections::HashSet;

use crate::task::Task;
use crate::worksheet::{Mapping, Worksheet};

/// An assignment policy.
///
/// `map` either places every work item of the task and returns the
/// completed mapping, or returns `None` and the scheduler re-invokes on a
/// later cycle. A policy must never return a partially populated mapping.
pub trait LoadBalancer: Send + Sync {
    fn map(&self, task: &Task, worksheet: &Worksheet<'_>) -> Option<Mapping>;
}

/// Whether round robin applies to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundRobinEligibility {
    Eligible,
    /// The owning workload explicitly opted out.
    OptedOut,
    /// The task is not a recognized schedulable workload.
    NotApplicable,
}

/// Resolves the opt-out capability for a task, typically from task-owner
/// metadata. Absence of any such metadata means eligible.
pub trait EligibilitySource: Send + Sync {
    fn eligibility(&self, task: &Task) -> RoundRobinEligibility;
}

/// Treats every task as round-robin eligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEligible;

impl EligibilitySource for AlwaysEligible {
    fn eligibility(&self, _task: &Task) -> RoundRobinEligibility {
        RoundRobinEligibility::Eligible
    }
}

/// Opt-out lookup backed by a fixed set of task names. Names not in the
/// set are eligible. How names get into the set is the operator's concern.
#[derive(Debug, Clone, Default)]
pub struct OptOutList {
    names: HashSet<String>,
}

impl OptOutList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, name: String) -> Self {
        self.names.insert(name);
        self
    }
}

impl EligibilitySource for OptOutList {
    fn eligibility(&self, task: &Task) -> RoundRobinEligibility {
        if self.names.contains(&task.name) {
            RoundRobinEligibility::OptedOut
        } else {
            RoundRobinEligibility::Eligible
        }
    }
}
