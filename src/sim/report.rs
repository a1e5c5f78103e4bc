use std::fmt;

use crate::core::{Pid, SchedCtx, SchedStats, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub service_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub ready_time: Ticks,
    pub io_time: Ticks,
    pub running_time: Ticks,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
}

/// Per-process and run-wide statistics of a simulation.
#[derive(Debug, Clone)]
pub struct Report {
    /// Sorted by pid
    pub processes: Vec<ProcessReport>,
    pub total_ticks: Ticks,
    pub process_count: usize,
    pub shortest_turnaround: Option<Ticks>,
    pub longest_turnaround: Option<Ticks>,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    pub avg_waiting: f64,
    pub avg_io: f64,
}

impl Report {
    pub fn new(ctx: &SchedCtx, stats: &SchedStats) -> Self {
        let mut processes: Vec<ProcessReport> = ctx
            .tasks
            .iter()
            .map(|task| ProcessReport {
                pid: task.pid,
                arrival_time: task.arrival_time,
                service_time: task.service_time,
                start_time: task.start_time,
                completion_time: task.completion_time,
                ready_time: task.ready_time,
                io_time: task.io_time,
                running_time: task.running_time,
                turnaround_time: task.turnaround_time(),
                waiting_time: task.waiting_time(),
                response_time: task.response_time(),
            })
            .collect();
        processes.sort_by_key(|p| p.pid);

        Self {
            process_count: processes.len(),
            processes,
            total_ticks: ctx.now,
            shortest_turnaround: stats.shortest_turnaround,
            longest_turnaround: stats.longest_turnaround,
            avg_turnaround: stats.avg_turnaround(),
            avg_response: stats.avg_response(),
            avg_waiting: stats.avg_waiting(),
            avg_io: stats.avg_io(),
        }
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessReport> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

fn or_dash(value: Option<Ticks>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>10} {:>10} {:>10}",
            "pid", "ready", "io", "turnaround"
        )?;
        for p in &self.processes {
            writeln!(
                f,
                "{:>6} {:>10} {:>10} {:>10}",
                p.pid,
                p.ready_time,
                p.io_time,
                or_dash(p.turnaround_time)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total simulation time: {} ticks", self.total_ticks)?;
        writeln!(f, "Processes: {}", self.process_count)?;
        writeln!(
            f,
            "Shortest turnaround time: {} ticks",
            or_dash(self.shortest_turnaround)
        )?;
        writeln!(
            f,
            "Longest turnaround time: {} ticks",
            or_dash(self.longest_turnaround)
        )?;
        writeln!(f, "Average turnaround time: {:.2} ticks", self.avg_turnaround)?;
        writeln!(f, "Average response time: {:.2} ticks", self.avg_response)?;
        writeln!(f, "Average waiting time: {:.2} ticks", self.avg_waiting)?;
        write!(f, "Average I/O time: {:.2} ticks", self.avg_io)
    }
}
