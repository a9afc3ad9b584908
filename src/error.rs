use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssignError {
    #[error("No eligible workers for label '{0}'")]
    NoEligibleWorkers(String),

    #[error("Couldn't find last worker position for label '{0}'")]
    InternalInconsistency(String),

    #[error("Mapping '{label}' to '{worker}' is not partially valid")]
    InvalidPartialMapping { label: String, worker: String },
}

pub type Result<T> = std::result::Result<T, AssignError>;
