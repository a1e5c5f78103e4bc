use thiserror::Error;

use crate::core::Pid;

pub type Result<T> = std::result::Result<T, SimError>;

/// Errors caused by caller input. Broken scheduler invariants panic instead.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read workload: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("process {pid} has a service time of zero")]
    ZeroServiceTime { pid: Pid },

    #[error("process id {pid} appears more than once")]
    DuplicatePid { pid: Pid },

    #[error("unknown scheduling algorithm `{0}` (expected 1/sjf, 2/rr or 3/mlfq)")]
    InvalidAlgorithm(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
