use crate::task::WorkerCandidate;

/// Sort candidates by worker name, ascending.
///
/// Round robin needs a reproducible notion of "next" that does not depend
/// on the arrival order of the candidate set, which changes between
/// attempts as workers join and leave. Name order gives every label a
/// fixed cycle.
pub fn sorted_by_name(mut candidates: Vec<WorkerCandidate>) -> Vec<WorkerCandidate> {
    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    candidates
}
