//! Round-robin assignment with fallback delegation.
//!
//! The policy walks a task's work items in order, rotating each label
//! through its eligible workers alphabetically. Any failure along the way
//! abandons the whole attempt and hands the unmodified original task to
//! the fallback policy - the scheduler never sees a partially assigned
//! task.

use std::sync::Arc;

use crate::balancer::ordering::sorted_by_name;
use crate::balancer::rotation::RotationTable;
use crate::balancer::{EligibilitySource, LoadBalancer, RoundRobinEligibility};
use crate::error::{AssignError, Result};
use crate::task::{Task, WorkerCandidate};
use crate::worksheet::{Mapping, Worksheet};

/// Round-robin load balancer.
///
/// Wraps a fallback policy that takes over whenever round robin cannot
/// complete a task's mapping: the task opted out, a work item has no
/// eligible workers, a binding fails partial validation, or the rotation
/// state turns out inconsistent mid-pass.
pub struct RoundRobinBalancer {
    fallback: Arc<dyn LoadBalancer>,
    eligibility: Arc<dyn EligibilitySource>,
    rotation: RotationTable,
}

impl RoundRobinBalancer {
    /// Wrap an existing balancer as the fallback for every task round
    /// robin cannot place.
    pub fn new(fallback: Arc<dyn LoadBalancer>, eligibility: Arc<dyn EligibilitySource>) -> Self {
        Self {
            fallback,
            eligibility,
            rotation: RotationTable::new(),
        }
    }

    /// The configured fallback policy.
    pub fn fallback(&self) -> &dyn LoadBalancer {
        self.fallback.as_ref()
    }

    fn assign_round_robin(&self, task: &Task, worksheet: &Worksheet<'_>) -> Result<Mapping> {
        let mut mapping = Mapping::new();

        for item in &task.work_items {
            let label = item.label();

            // Eligible workers are recomputed per item; the pool is not static.
            let candidates = sorted_by_name(worksheet.eligible_workers(item));

            if candidates.is_empty() {
                return Err(AssignError::NoEligibleWorkers(label.to_string()));
            }

            let assigned = self
                .rotation
                .advance(label, |last| next_in_cycle(&candidates, last, label))?;

            let worker = candidates
                .iter()
                .find(|c| c.name == assigned)
                .cloned()
                .ok_or_else(|| AssignError::InternalInconsistency(label.to_string()))?;

            // The rotation entry written above is not rolled back if the
            // binding fails validation: the next attempt rotates onward
            // from the failed choice.
            mapping.bind(item, worker);
            if !worksheet.is_partially_valid(&mapping) {
                return Err(AssignError::InvalidPartialMapping {
                    label: label.to_string(),
                    worker: assigned,
                });
            }

            tracing::debug!(%label, worker = %assigned, "work item bound");
        }

        Ok(mapping)
    }
}

impl LoadBalancer for RoundRobinBalancer {
    fn map(&self, task: &Task, worksheet: &Worksheet<'_>) -> Option<Mapping> {
        let eligibility = self.eligibility.eligibility(task);
        if eligibility != RoundRobinEligibility::Eligible {
            tracing::debug!(task = %task.name, ?eligibility, "skipping round robin - using fallback");
            return self.fallback.map(task, worksheet);
        }

        match self.assign_round_robin(task, worksheet) {
            Ok(mapping) => Some(mapping),
            Err(err) => {
                tracing::warn!(task = %task.name, %err, "round robin failed - using fallback");
                self.fallback.map(task, worksheet)
            }
        }
    }
}

/// Pick the worker after `last` in the sorted candidate cycle.
///
/// Cold start (no prior entry, or the recorded worker has left the pool)
/// restarts at the alphabetically first candidate. `candidates` must be
/// non-empty and sorted.
fn next_in_cycle(
    candidates: &[WorkerCandidate],
    last: Option<&str>,
    label: &str,
) -> Result<String> {
    let Some(last) = last else {
        tracing::debug!(%label, "first assignment for label");
        return Ok(candidates[0].name.clone());
    };

    if !candidates.iter().any(|c| c.name == last) {
        tracing::debug!(%label, last, "recorded worker gone - restarting rotation");
        return Ok(candidates[0].name.clone());
    }

    let pos = candidates
        .iter()
        .position(|c| c.name == last)
        .ok_or_else(|| AssignError::InternalInconsistency(label.to_string()))?;

    Ok(candidates[(pos + 1) % candidates.len()].name.clone())
}
