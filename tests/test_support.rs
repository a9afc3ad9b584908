//! Shared fixtures for balancer integration tests.
//!
//! Provides in-memory stand-ins for the collaborators the external
//! scheduler normally supplies: a static candidate pool, validators, and
//! recording fallback policies.

// Not every test crate uses every fixture.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use rr_balancer::balancer::LoadBalancer;
use rr_balancer::task::{Task, WorkItem, WorkerCandidate};
use rr_balancer::worksheet::{CandidateSupplier, Mapping, MappingValidator, Worksheet};

/// Candidate supplier backed by a label -> worker-names table. Pools can
/// be swapped between attempts to simulate workers joining and leaving.
#[derive(Default)]
pub struct StaticPool {
    pools: Mutex<HashMap<String, Vec<String>>>,
}

impl StaticPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(self, label: &str, workers: &[&str]) -> Self {
        self.set_pool(label, workers);
        self
    }

    pub fn set_pool(&self, label: &str, workers: &[&str]) {
        self.pools.lock().unwrap().insert(
            label.to_string(),
            workers.iter().map(|w| w.to_string()).collect(),
        );
    }
}

impl CandidateSupplier for StaticPool {
    fn eligible_workers(&self, item: &WorkItem) -> Vec<WorkerCandidate> {
        self.pools
            .lock()
            .unwrap()
            .get(item.label())
            .map(|names| {
                names
                    .iter()
                    .map(|n| WorkerCandidate::new(n.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Validator that accepts every partial mapping.
pub struct AcceptAll;

impl MappingValidator for AcceptAll {
    fn is_partially_valid(&self, _mapping: &Mapping) -> bool {
        true
    }
}

/// Validator that rejects any mapping binding the named worker.
pub struct RejectWorker(pub &'static str);

impl MappingValidator for RejectWorker {
    fn is_partially_valid(&self, mapping: &Mapping) -> bool {
        mapping.bindings().iter().all(|b| b.worker.name != self.0)
    }
}

/// Fallback that counts invocations, remembers the task it saw, and binds
/// every work item to a sentinel worker.
#[derive(Default)]
pub struct RecordingFallback {
    pub calls: AtomicUsize,
    pub last_task: Mutex<Option<(Uuid, usize)>>,
}

impl RecordingFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LoadBalancer for RecordingFallback {
    fn map(&self, task: &Task, _worksheet: &Worksheet<'_>) -> Option<Mapping> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_task.lock().unwrap() = Some((task.id, task.work_items.len()));

        let mut mapping = Mapping::new();
        for item in &task.work_items {
            mapping.bind(item, WorkerCandidate::new("fallback-worker".to_string()));
        }
        Some(mapping)
    }
}

/// Fallback that always declines.
pub struct DeclineAll;

impl LoadBalancer for DeclineAll {
    fn map(&self, _task: &Task, _worksheet: &Worksheet<'_>) -> Option<Mapping> {
        None
    }
}

/// A task with one work item for the given label.
pub fn single_item_task(label: &str) -> Task {
    Task::new(
        format!("task-{label}"),
        vec![WorkItem::new(label.to_string())],
    )
}

/// Worker names in binding order.
pub fn assigned_names(mapping: &Mapping) -> Vec<String> {
    mapping
        .bindings()
        .iter()
        .map(|b| b.worker.name.clone())
        .collect()
}
