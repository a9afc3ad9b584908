use crate::balancer::ordering::sorted_by_name;
use crate::balancer::LoadBalancer;
use crate::task::Task;
use crate::worksheet::{Mapping, Worksheet};

/// Greedy baseline policy: each work item goes to the first candidate, in
/// name order, that keeps the mapping valid.
///
/// Stateless, so repeated attempts for the same label pile onto the same
/// worker. Useful standalone and as the fallback behind `RoundRobinBalancer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl LoadBalancer for FirstFit {
    fn map(&self, task: &Task, worksheet: &Worksheet<'_>) -> Option<Mapping> {
        let mut mapping = Mapping::new();

        for item in &task.work_items {
            let candidates = sorted_by_name(worksheet.eligible_workers(item));
            let before = mapping.len();

            for candidate in candidates {
                mapping.bind(item, candidate);
                if worksheet.is_partially_valid(&mapping) {
                    break;
                }
                mapping.unbind_last();
            }

            if mapping.len() == before {
                tracing::debug!(label = item.label(), "first fit found no valid candidate");
                return None;
            }
        }

        Some(mapping)
    }
}
