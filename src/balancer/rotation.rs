//! Per-label rotation state.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;

/// Remembers, per label, the worker that most recently received work.
///
/// Process-wide shared state: one instance lives in the balancer for the
/// process lifetime and nothing is persisted across restarts. Entries are
/// never removed; a recorded worker that has since left the pool is
/// detected at lookup time by the assignment pass.
///
/// Label cardinality is small, so a single mutex guards the whole table.
#[derive(Debug, Default)]
pub struct RotationTable {
    last: Mutex<HashMap<String, String>>,
}

impl RotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last worker assigned for this label, or `None` if the label has
    /// never been assigned.
    pub fn get(&self, label: &str) -> Option<String> {
        self.last
            .lock()
            .expect("rotation table mutex poisoned")
            .get(label)
            .cloned()
    }

    /// Record the most recent assignment for this label, overwriting any
    /// prior entry.
    pub fn set(&self, label: &str, worker: String) {
        self.last
            .lock()
            .expect("rotation table mutex poisoned")
            .insert(label.to_string(), worker);
    }

    /// Atomically pick and record the next worker for a label.
    ///
    /// `pick` receives the current entry and returns the worker name to
    /// record. The lock is held across pick and store, so two concurrent
    /// attempts for the same label cannot both observe the same "last"
    /// value and advance to the same successor. On `Err` the entry is left
    /// untouched.
    pub fn advance<F>(&self, label: &str, pick: F) -> Result<String>
    where
        F: FnOnce(Option<&str>) -> Result<String>,
    {
        let mut last = self.last.lock().expect("rotation table mutex poisoned");
        let next = pick(last.get(label).map(String::as_str))?;
        last.insert(label.to_string(), next.clone());
        Ok(next)
    }
}
