use super::{EnqueueFlags, SchedCtx, Scheduler, TaskId};
use crate::core::QueueId;
use crate::sim::SimConfig;

pub struct RoundRobinScheduler {
    ready: QueueId,
}

impl Scheduler for RoundRobinScheduler {
    fn init(ctx: &mut SchedCtx, _config: &SimConfig) -> Self {
        Self {
            ready: ctx.create_queue(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, _flags: EnqueueFlags) {
        ctx.queue_push(self.ready, task);
    }

    fn should_preempt(&self, _ctx: &SchedCtx, _current: TaskId) -> bool {
        false
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<TaskId> {
        ctx.queue_pop(self.ready)
    }

    fn slice_exhausted(&self, _ctx: &SchedCtx, _task: TaskId, slice_expired: bool) -> bool {
        slice_expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ENQ_ARRIVAL, ENQ_EXPIRED};

    #[test]
    fn expired_task_goes_to_the_tail() {
        let mut ctx = SchedCtx::new();
        let mut rr = RoundRobinScheduler::init(&mut ctx, &SimConfig::default());
        let a = ctx.create_task(1, 0, 9, 0);
        let b = ctx.create_task(2, 0, 1, 0);
        rr.enqueue(&mut ctx, a, ENQ_ARRIVAL);
        rr.enqueue(&mut ctx, b, ENQ_ARRIVAL);

        assert_eq!(rr.dispatch(&mut ctx), Some(a));
        assert!(rr.slice_exhausted(&ctx, a, true));
        assert!(!rr.slice_exhausted(&ctx, a, false));
        rr.enqueue(&mut ctx, a, ENQ_EXPIRED);

        assert_eq!(rr.dispatch(&mut ctx), Some(b));
        assert_eq!(rr.dispatch(&mut ctx), Some(a));
        assert_eq!(rr.dispatch(&mut ctx), None);
    }

    #[test]
    fn never_preempts_on_events() {
        let mut ctx = SchedCtx::new();
        let rr = RoundRobinScheduler::init(&mut ctx, &SimConfig::default());
        let a = ctx.create_task(1, 0, 9, 0);
        assert!(!rr.should_preempt(&ctx, a));
    }
}
