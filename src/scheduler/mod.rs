pub mod mlfq;
pub mod rr;
pub mod sjf;

use crate::core::state::{SchedCtx, TaskId};
use crate::sim::SimConfig;
pub use mlfq::MlfqScheduler;
pub use rr::RoundRobinScheduler;
pub use sjf::SjfScheduler;

pub type EnqueueFlags = u64;

/// First admission at the task's arrival tick.
pub const ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
/// Back from the I/O queue.
pub const ENQ_IO_DONE: EnqueueFlags = 1 << 1;
/// Forced off the CPU before its natural stop.
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 2;
/// Used up its time slice or allotment.
pub const ENQ_EXPIRED: EnqueueFlags = 1 << 3;

/// A selection policy. The tick loop in [`crate::core::SchedCore`] drives
/// every policy through these hooks only.
pub trait Scheduler {
    fn init(ctx: &mut SchedCtx, config: &SimConfig) -> Self;

    /// Places a runnable, unqueued task on one of the policy's queues.
    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, flags: EnqueueFlags);

    /// Called when arrivals or I/O returns happened this tick while `current`
    /// runs. Returning true sends `current` back through `enqueue`.
    fn should_preempt(&self, ctx: &SchedCtx, current: TaskId) -> bool;

    /// Removes and returns the next task to run, if any.
    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<TaskId>;

    /// Called after `task` ran a tick without completing or blocking.
    /// Returning true re-enqueues it with [`ENQ_EXPIRED`].
    fn slice_exhausted(&self, ctx: &SchedCtx, task: TaskId, slice_expired: bool) -> bool;

    /// End-of-tick hook. Returning true displaces the running task.
    fn tick(&mut self, _ctx: &mut SchedCtx) -> bool {
        false
    }
}
