//! Discrete-time CPU scheduling simulator.
//!
//! A [`Sim`] replays a workload of [`Job`]s one tick at a time under a
//! [`Scheduler`] policy (preemptive SJF, round robin or MLFQ), with random
//! I/O drawn from a seeded generator, and produces a [`Report`].

pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::{Result, SimError};
pub use scheduler::Scheduler;
pub use sim::{Algorithm, Job, Report, Sim, SimConfig, simulate};
