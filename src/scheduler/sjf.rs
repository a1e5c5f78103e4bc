use super::{EnqueueFlags, SchedCtx, Scheduler, TaskId};
use crate::core::QueueId;
use crate::sim::SimConfig;

/// Preemptive shortest-remaining-time-first over a single ready queue.
pub struct SjfScheduler {
    ready: QueueId,
}

impl Scheduler for SjfScheduler {
    fn init(ctx: &mut SchedCtx, _config: &SimConfig) -> Self {
        Self {
            ready: ctx.create_queue(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, _flags: EnqueueFlags) {
        ctx.queue_push(self.ready, task);
    }

    // Any new work forces a fresh comparison against the whole ready queue
    fn should_preempt(&self, _ctx: &SchedCtx, _current: TaskId) -> bool {
        true
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<TaskId> {
        let pos = ctx.queue(self.ready).position_min_by_key(|task| {
            let task = ctx.task(task);
            (task.remaining_time, task.pid)
        })?;
        ctx.queue_remove(self.ready, pos)
    }

    fn slice_exhausted(&self, _ctx: &SchedCtx, _task: TaskId, _slice_expired: bool) -> bool {
        false
    }
}
