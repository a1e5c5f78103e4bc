use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Policy chosen for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    PreemptiveSjf,
    RoundRobin,
    Mlfq,
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "sjf" => Ok(Self::PreemptiveSjf),
            "2" | "rr" | "round-robin" => Ok(Self::RoundRobin),
            "3" | "mlfq" => Ok(Self::Mlfq),
            _ => Err(SimError::InvalidAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::PreemptiveSjf => write!(f, "preemptive SJF"),
            Algorithm::RoundRobin => write!(f, "round robin"),
            Algorithm::Mlfq => write!(f, "MLFQ"),
        }
    }
}
