use std::str::FromStr;

use crate::core::state::{Pid, Ticks};

/// One process of the workload, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub service_time: Ticks,
    pub priority: i32,
}

impl Job {
    pub fn new(pid: Pid, arrival_time: Ticks, service_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time,
            service_time,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Parses `pid:arrival:service:priority`.
impl FromStr for Job {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim().split(':').map(str::trim).collect();
        let &[pid, arrival, service, priority] = fields.as_slice() else {
            return Err(format!(
                "expected pid:arrival:service:priority, found {} field(s)",
                fields.len()
            ));
        };

        fn field<T: FromStr>(name: &str, raw: &str) -> Result<T, String> {
            raw.parse()
                .map_err(|_| format!("invalid {name} `{raw}`"))
        }

        Ok(Job {
            pid: field("pid", pid)?,
            arrival_time: field("arrival time", arrival)?,
            service_time: field("service time", service)?,
            priority: field("priority", priority)?,
        })
    }
}
