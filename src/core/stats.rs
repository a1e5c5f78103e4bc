use average::{Estimate, Mean};

use super::state::{Task, Ticks};

/// Run-wide totals, folded in as each process completes.
#[derive(Debug, Clone)]
pub struct SchedStats {
    pub completed: usize,
    pub shortest_turnaround: Option<Ticks>,
    pub longest_turnaround: Option<Ticks>,
    turnaround: Mean,
    response: Mean,
    waiting: Mean,
    io: Mean,
}

impl SchedStats {
    pub fn new() -> Self {
        Self {
            completed: 0,
            shortest_turnaround: None,
            longest_turnaround: None,
            turnaround: Mean::new(),
            response: Mean::new(),
            waiting: Mean::new(),
            io: Mean::new(),
        }
    }

    pub fn record(&mut self, task: &Task) {
        let (Some(turnaround), Some(response), Some(waiting)) = (
            task.turnaround_time(),
            task.response_time(),
            task.waiting_time(),
        ) else {
            panic!("Task {} folded into statistics before completing", task.id);
        };

        self.completed += 1;

        self.shortest_turnaround = Some(
            self.shortest_turnaround
                .map_or(turnaround, |t| t.min(turnaround)),
        );
        self.longest_turnaround = Some(
            self.longest_turnaround
                .map_or(turnaround, |t| t.max(turnaround)),
        );

        self.turnaround.add(turnaround as f64);
        self.response.add(response as f64);
        self.waiting.add(waiting as f64);
        self.io.add(task.io_time as f64);
    }

    pub fn avg_turnaround(&self) -> f64 {
        self.turnaround.estimate()
    }

    pub fn avg_response(&self) -> f64 {
        self.response.estimate()
    }

    pub fn avg_waiting(&self) -> f64 {
        self.waiting.estimate()
    }

    pub fn avg_io(&self) -> f64 {
        self.io.estimate()
    }
}

impl Default for SchedStats {
    fn default() -> Self {
        Self::new()
    }
}
