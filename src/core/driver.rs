use log::{debug, trace};

use super::{
    event::SchedEvent,
    io::IoDevice,
    observer::{Census, Observer},
    state::{Pid, SchedCtx, TaskId, Ticks},
    stats::SchedStats,
};
use crate::scheduler::{ENQ_ARRIVAL, ENQ_EXPIRED, ENQ_IO_DONE, ENQ_PREEMPT, Scheduler};
use crate::sim::SimConfig;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    pub stats: SchedStats,
    io: IoDevice,
    observer: Observer,
    time_slice: Ticks,
    slice_left: Ticks,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(config: &SimConfig, workload_size: usize) -> Self {
        let io = IoDevice::new(
            config.seed,
            config.io_request_chance,
            config.io_complete_chance,
        );
        Self::with_io(config, workload_size, io)
    }

    pub fn with_io(config: &SimConfig, workload_size: usize, io: IoDevice) -> Self {
        let mut ctx = SchedCtx::new();
        let scheduler = S::init(&mut ctx, config);
        Self {
            ctx,
            scheduler,
            stats: SchedStats::new(),
            io,
            observer: Observer::new(workload_size),
            time_slice: config.time_slice,
            slice_left: config.time_slice,
        }
    }

    /// Registers an arriving process and hands it to the policy.
    pub fn admit(
        &mut self,
        pid: Pid,
        arrival_time: Ticks,
        service_time: Ticks,
        priority: i32,
    ) -> TaskId {
        let task = self.ctx.create_task(pid, arrival_time, service_time, priority);
        self.scheduler.enqueue(&mut self.ctx, task, ENQ_ARRIVAL);
        task
    }

    /// Advances the simulation by one tick. `new_arrivals` is the number of
    /// tasks admitted for the current tick before this call.
    pub fn tick(&mut self, new_arrivals: usize) -> Vec<SchedEvent> {
        let mut events = Vec::new();

        let io_done = self.io.resolve(&mut self.ctx);
        for &task in &io_done {
            debug!("t={} task {task} finished I/O", self.ctx.now);
            self.scheduler.enqueue(&mut self.ctx, task, ENQ_IO_DONE);
            events.push(SchedEvent::IoCompleted { task });
        }

        if new_arrivals + io_done.len() > 0 {
            self.try_preempt(&mut events);
        }

        if self.ctx.current.is_none() {
            self.try_schedule(&mut events);
        }

        self.ctx.age_ready();

        let entering_io = self.run_current(&mut events);

        if self.scheduler.tick(&mut self.ctx) {
            if let Some(task) = self.ctx.take_current() {
                debug!("t={} task {task} displaced for boost", self.ctx.now);
                self.scheduler.enqueue(&mut self.ctx, task, ENQ_PREEMPT);
                events.push(SchedEvent::Preempted { task });
            }
        }

        // Aging first so the task does not collect I/O time for a tick it ran
        self.ctx.age_io();
        if let Some(task) = entering_io {
            let io_queue = self.ctx.io_queue();
            self.ctx.queue_push(io_queue, task);
            events.push(SchedEvent::IoRequested { task });
        }

        self.observer.observe(&self.ctx);
        events
    }

    fn try_preempt(&mut self, events: &mut Vec<SchedEvent>) {
        let Some(current) = self.ctx.current else {
            return;
        };
        if !self.scheduler.should_preempt(&self.ctx, current) {
            return;
        }

        self.ctx.take_current();
        debug!("t={} task {current} preempted", self.ctx.now);
        self.scheduler.enqueue(&mut self.ctx, current, ENQ_PREEMPT);
        events.push(SchedEvent::Preempted { task: current });
    }

    fn try_schedule(&mut self, events: &mut Vec<SchedEvent>) {
        if let Some(task) = self.scheduler.dispatch(&mut self.ctx) {
            self.ctx.set_running(task);
            self.slice_left = self.time_slice;
            debug!(
                "t={} dispatch task {task} (pid {})",
                self.ctx.now,
                self.ctx.task(task).pid
            );
            events.push(SchedEvent::Dispatched { task });
        }
    }

    // Runs the current task for one tick. Returns the task if it must join
    // the I/O queue at the end of the tick.
    fn run_current(&mut self, events: &mut Vec<SchedEvent>) -> Option<TaskId> {
        self.ctx.advance_time(1);

        let Some(current) = self.ctx.current else {
            events.push(SchedEvent::Idle);
            return None;
        };

        {
            let task = self.ctx.task_mut(current);
            assert!(
                task.remaining_time > 0,
                "Task {current} ran with no remaining time"
            );
            task.remaining_time -= 1;
            task.running_time += 1;
            task.allotment_used += 1;
        }
        self.slice_left = self.slice_left.saturating_sub(1);

        if self.ctx.task(current).remaining_time == 0 {
            self.ctx.take_current();
            self.ctx.mark_completed(current);
            self.stats.record(self.ctx.task(current));
            let at = self.ctx.now;
            debug!("t={at} task {current} completed");
            events.push(SchedEvent::Completed { task: current, at });
            return None;
        }

        if self.io.request() {
            self.ctx.take_current();
            debug!("t={} task {current} requested I/O", self.ctx.now);
            return Some(current);
        }

        let slice_expired = self.slice_left == 0;
        if self
            .scheduler
            .slice_exhausted(&self.ctx, current, slice_expired)
        {
            self.ctx.take_current();
            trace!("t={} task {current} used up its slice", self.ctx.now);
            self.scheduler.enqueue(&mut self.ctx, current, ENQ_EXPIRED);
            events.push(SchedEvent::SliceExpired { task: current });
        }

        None
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn completed(&self) -> usize {
        self.stats.completed
    }

    pub fn census(&self) -> Census {
        self.observer.last()
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
