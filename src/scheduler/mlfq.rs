use log::debug;

use super::{ENQ_ARRIVAL, ENQ_EXPIRED, ENQ_IO_DONE, EnqueueFlags, SchedCtx, Scheduler, TaskId};
use crate::core::{QueueId, Ticks};
use crate::sim::SimConfig;

/// Multi-level feedback queue.
///
/// Level 0 is the highest priority. New and I/O-returning tasks start at
/// level 0, a task that burns its slice or allotment drops one level, and
/// every `boost_time` ticks everything below level 0 is lifted back up.
pub struct MlfqScheduler {
    levels: Vec<QueueId>,
    allotment: Ticks,
    boost_time: Ticks,
    boost_timer: Ticks,
}

impl MlfqScheduler {
    fn lowest_level(&self) -> usize {
        self.levels.len() - 1
    }

    fn clamp_level(&self, level: usize) -> usize {
        level.min(self.lowest_level())
    }

    pub fn boost_timer(&self) -> Ticks {
        self.boost_timer
    }

    // Moves every task below level 0 to level 0, in pid order
    fn boost(&mut self, ctx: &mut SchedCtx) {
        let mut lifted: Vec<TaskId> = self.levels[1..]
            .iter()
            .flat_map(|&level| ctx.queue_drain(level))
            .collect();
        lifted.sort_by_key(|&task| ctx.task(task).pid);

        debug!("t={} boost lifts {} task(s) to level 0", ctx.now, lifted.len());
        for task in lifted {
            let state = ctx.task_mut(task);
            state.priority_level = 0;
            state.allotment_used = 0;
            ctx.queue_push(self.levels[0], task);
        }
        self.boost_timer = 0;
    }
}

impl Scheduler for MlfqScheduler {
    fn init(ctx: &mut SchedCtx, config: &SimConfig) -> Self {
        Self {
            levels: (0..config.num_levels).map(|_| ctx.create_queue()).collect(),
            allotment: config.allotment,
            boost_time: config.boost_time,
            boost_timer: 0,
        }
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, flags: EnqueueFlags) {
        let level = if flags & ENQ_EXPIRED != 0 {
            self.clamp_level(ctx.task(task).priority_level + 1)
        } else if flags & (ENQ_ARRIVAL | ENQ_IO_DONE) != 0 {
            0
        } else {
            self.clamp_level(ctx.task(task).priority_level)
        };

        let state = ctx.task_mut(task);
        if state.priority_level != level || flags & ENQ_EXPIRED != 0 {
            state.allotment_used = 0;
        }
        state.priority_level = level;
        ctx.queue_push(self.levels[level], task);
    }

    // Only work on a strictly higher level displaces the running task
    fn should_preempt(&self, ctx: &SchedCtx, current: TaskId) -> bool {
        let level = self.clamp_level(ctx.task(current).priority_level);
        self.levels[..level]
            .iter()
            .any(|&queue| !ctx.queue(queue).is_empty())
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<TaskId> {
        if self.boost_timer >= self.boost_time {
            self.boost(ctx);
        }

        self.levels
            .iter()
            .find_map(|&queue| ctx.queue_pop(queue))
    }

    fn slice_exhausted(&self, ctx: &SchedCtx, task: TaskId, slice_expired: bool) -> bool {
        slice_expired || ctx.task(task).allotment_used >= self.allotment
    }

    fn tick(&mut self, _ctx: &mut SchedCtx) -> bool {
        self.boost_timer += 1;
        self.boost_timer >= self.boost_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ENQ_PREEMPT;

    fn mlfq(ctx: &mut SchedCtx) -> MlfqScheduler {
        MlfqScheduler::init(ctx, &SimConfig::default())
    }

    #[test]
    fn expiry_demotes_and_clamps() {
        let mut ctx = SchedCtx::new();
        let mut sched = mlfq(&mut ctx);
        let task = ctx.create_task(1, 0, 50, 0);

        sched.enqueue(&mut ctx, task, ENQ_ARRIVAL);
        for expected in [1, 2, 2] {
            assert_eq!(sched.dispatch(&mut ctx), Some(task));
            ctx.task_mut(task).allotment_used = 4;
            sched.enqueue(&mut ctx, task, ENQ_EXPIRED);
            assert_eq!(ctx.task(task).priority_level, expected);
            assert_eq!(ctx.task(task).allotment_used, 0);
            assert!(ctx.queue(sched.levels[expected]).contains(task));
        }
    }

    #[test]
    fn preempted_task_keeps_level_and_allotment() {
        let mut ctx = SchedCtx::new();
        let mut sched = mlfq(&mut ctx);
        let task = ctx.create_task(1, 0, 50, 0);
        {
            let t = ctx.task_mut(task);
            t.priority_level = 1;
            t.allotment_used = 2;
        }

        sched.enqueue(&mut ctx, task, ENQ_PREEMPT);
        assert_eq!(ctx.task(task).priority_level, 1);
        assert_eq!(ctx.task(task).allotment_used, 2);
        assert!(ctx.queue(sched.levels[1]).contains(task));
    }

    #[test]
    fn spent_allotment_ends_the_slice_early() {
        let mut ctx = SchedCtx::new();
        let sched = mlfq(&mut ctx);
        let task = ctx.create_task(1, 0, 50, 0);
        ctx.set_running(task);

        ctx.task_mut(task).allotment_used = 3;
        assert!(!sched.slice_exhausted(&ctx, task, false));
        assert!(sched.slice_exhausted(&ctx, task, true));

        ctx.task_mut(task).allotment_used = 4;
        assert!(sched.slice_exhausted(&ctx, task, false));
    }

    #[test]
    fn io_return_goes_to_top_level() {
        let mut ctx = SchedCtx::new();
        let mut sched = mlfq(&mut ctx);
        let task = ctx.create_task(1, 0, 50, 0);
        ctx.task_mut(task).priority_level = 2;

        sched.enqueue(&mut ctx, task, ENQ_IO_DONE);
        assert_eq!(ctx.task(task).priority_level, 0);
        assert!(ctx.queue(sched.levels[0]).contains(task));
    }

    #[test]
    fn preempts_only_for_higher_levels() {
        let mut ctx = SchedCtx::new();
        let mut sched = mlfq(&mut ctx);
        let running = ctx.create_task(1, 0, 50, 0);
        let other = ctx.create_task(2, 0, 50, 0);
        ctx.task_mut(running).priority_level = 1;
        ctx.set_running(running);

        ctx.task_mut(other).priority_level = 1;
        sched.enqueue(&mut ctx, other, ENQ_PREEMPT);
        assert!(!sched.should_preempt(&ctx, running));

        assert_eq!(sched.dispatch(&mut ctx), Some(other));
        sched.enqueue(&mut ctx, other, ENQ_ARRIVAL);
        assert!(sched.should_preempt(&ctx, running));
    }

    #[test]
    fn boost_lifts_lower_levels_in_pid_order() {
        let mut ctx = SchedCtx::new();
        let mut sched = mlfq(&mut ctx);
        let top = ctx.create_task(9, 0, 50, 0);
        sched.enqueue(&mut ctx, top, ENQ_ARRIVAL);
        for (pid, level) in [(7, 2), (3, 1), (5, 2)] {
            let task = ctx.create_task(pid, 0, 50, 0);
            let t = ctx.task_mut(task);
            t.priority_level = level;
            t.allotment_used = 1;
            sched.enqueue(&mut ctx, task, ENQ_PREEMPT);
        }

        for _ in 0..99 {
            assert!(!sched.tick(&mut ctx));
        }
        assert!(sched.tick(&mut ctx));
        assert_eq!(sched.boost_timer(), 100);

        assert_eq!(sched.dispatch(&mut ctx), Some(top));
        assert_eq!(sched.boost_timer(), 0);

        let level0: Vec<_> = ctx
            .queue(sched.levels[0])
            .iter()
            .map(|task| ctx.task(task).pid)
            .collect();
        assert_eq!(level0, vec![3, 5, 7]);
        assert!(sched.levels[1..].iter().all(|&q| ctx.queue(q).is_empty()));
        assert!(
            ctx.tasks
                .iter()
                .all(|t| t.priority_level == 0 && (t.pid == 9 || t.allotment_used == 0))
        );
    }
}
