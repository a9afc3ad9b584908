//! Walkthrough: wrap a baseline policy with the round-robin balancer and
//! watch repeated attempts for one label rotate through the pool.
//!
//! Run with: cargo run --example assign
//! Set RUST_LOG=debug to see the rotation events.

use std::collections::HashMap;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use rr_balancer::balancer::{AlwaysEligible, FirstFit, LoadBalancer, RoundRobinBalancer};
use rr_balancer::task::{Task, WorkItem, WorkerCandidate};
use rr_balancer::worksheet::{CandidateSupplier, Mapping, MappingValidator, Worksheet};

/// Fixed worker fleet, keyed by label.
struct Fleet {
    pools: HashMap<String, Vec<String>>,
}

impl CandidateSupplier for Fleet {
    fn eligible_workers(&self, item: &WorkItem) -> Vec<WorkerCandidate> {
        self.pools
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

/// A scheduler constraint model that accepts everything.
struct NoConstraints;

impl MappingValidator for NoConstraints {
    fn is_partially_valid(&self, _mapping: &Mapping) -> bool {
        true
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fleet = Fleet {
        pools: HashMap::from([(
            "linux".to_string(),
            vec![
                "agent-b".to_string(),
                "agent-a".to_string(),
                "agent-c".to_string(),
            ],
        )]),
    };
    let validator = NoConstraints;
    let worksheet = Worksheet::new(&fleet, &validator);

    let balancer = RoundRobinBalancer::new(Arc::new(FirstFit), Arc::new(AlwaysEligible));

    for attempt in 1..=4 {
        let task = Task::new(
            "nightly-build".to_string(),
            vec![WorkItem::new("linux".to_string())],
        );
        match balancer.map(&task, &worksheet) {
            Some(mapping) => {
                println!("attempt {attempt}: {}", serde_json::to_string(&mapping)?);
            }
            None => println!("attempt {attempt}: no mapping"),
        }
    }

    Ok(())
}
