pub mod algorithm;
pub mod config;
pub mod driver;
pub mod job;
pub mod report;
pub mod workload;

pub use algorithm::Algorithm;
pub use config::SimConfig;
pub use driver::{Sim, simulate};
pub use job::Job;
pub use report::{ProcessReport, Report};
pub use workload::{load_workload, parse_workload};
