use crate::core::{TaskId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Admitted {
        task: TaskId,
    },
    IoCompleted {
        task: TaskId,
    },
    // Taken off the CPU by an arrival, an I/O return or an MLFQ boost
    Preempted {
        task: TaskId,
    },
    Dispatched {
        task: TaskId,
    },
    SliceExpired {
        task: TaskId,
    },
    IoRequested {
        task: TaskId,
    },
    Completed {
        task: TaskId,
        at: Ticks,
    },
    // Nothing to run this tick
    Idle,
}
