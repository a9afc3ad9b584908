//! Per-attempt assignment worksheet.
//!
//! A `Worksheet` bundles what the external scheduler supplies for one
//! scheduling attempt: the candidate supplier and the partial-mapping
//! validator. The `Mapping` accumulates bindings and reaches the scheduler
//! only once every work item of the task is bound.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::{WorkItem, WorkerCandidate};

/// Supplies the eligible workers for a work item. The set may differ
/// between items and between attempts.
pub trait CandidateSupplier: Send + Sync {
    fn eligible_workers(&self, item: &WorkItem) -> Vec<WorkerCandidate>;
}

/// The scheduler's resource-constraint model. Consulted after every single
/// binding added to a mapping (no double-booking, resource fit, etc. - the
/// rules live on the scheduler side).
pub trait MappingValidator: Send + Sync {
    fn is_partially_valid(&self, mapping: &Mapping) -> bool;
}

/// One work item bound to one worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub item: Uuid,
    pub label: String,
    pub worker: WorkerCandidate,
}

/// The accumulating result of one assignment attempt.
///
/// All-or-nothing per task: either every work item ends up bound, or the
/// mapping is discarded whole. Policies must never hand a partially
/// populated mapping back to the scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mapping {
    bindings: Vec<Binding>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, item: &WorkItem, worker: WorkerCandidate) {
        self.bindings.push(Binding {
            item: item.id,
            label: item.label().to_string(),
            worker,
        });
    }

    /// Drop the most recent binding. Used by policies that backtrack.
    pub fn unbind_last(&mut self) -> Option<Binding> {
        self.bindings.pop()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// The worker bound to the given item, if any.
    pub fn worker_for(&self, item_id: &Uuid) -> Option<&WorkerCandidate> {
        self.bindings
            .iter()
            .find(|b| b.item == *item_id)
            .map(|b| &b.worker)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Everything the scheduler supplies for one `map` call. Transient - owned
/// by the invocation and not retained by any policy.
pub struct Worksheet<'a> {
    supplier: &'a dyn CandidateSupplier,
    validator: &'a dyn MappingValidator,
}

impl<'a> Worksheet<'a> {
    pub fn new(supplier: &'a dyn CandidateSupplier, validator: &'a dyn MappingValidator) -> Self {
        Self {
            supplier,
            validator,
        }
    }

    pub fn eligible_workers(&self, item: &WorkItem) -> Vec<WorkerCandidate> {
        self.supplier.eligible_workers(item)
    }

    pub fn is_partially_valid(&self, mapping: &Mapping) -> bool {
        self.validator.is_partially_valid(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_bind_and_lookup() {
        let item = WorkItem::new("linux".to_string());
        let mut mapping = Mapping::new();
        assert!(mapping.is_empty());

        mapping.bind(&item, WorkerCandidate::new("agent-a".to_string()));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.worker_for(&item.id).unwrap().name, "agent-a");

        let other = Uuid::new_v4();
        assert!(mapping.worker_for(&other).is_none());
    }

    #[test]
    fn mapping_unbind_last_pops_in_order() {
        let first = WorkItem::new("linux".to_string());
        let second = WorkItem::new("windows".to_string());
        let mut mapping = Mapping::new();

        mapping.bind(&first, WorkerCandidate::new("agent-a".to_string()));
        mapping.bind(&second, WorkerCandidate::new("agent-b".to_string()));

        let popped = mapping.unbind_last().unwrap();
        assert_eq!(popped.item, second.id);
        assert_eq!(mapping.len(), 1);
        assert!(mapping.worker_for(&first.id).is_some());
    }

    #[test]
    fn binding_records_item_label() {
        let item = WorkItem::new("macos".to_string());
        let mut mapping = Mapping::new();
        mapping.bind(&item, WorkerCandidate::new("agent-c".to_string()));
        assert_eq!(mapping.bindings()[0].label, "macos");
    }
}
