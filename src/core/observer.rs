use super::state::{SchedCtx, TaskState};

/// Where every process of the workload is after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub unarrived: usize,
    pub ready: usize,
    pub running: usize,
    pub blocked: usize,
    pub completed: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.unarrived + self.ready + self.running + self.blocked + self.completed
    }
}

#[derive(Debug)]
pub struct Observer {
    step: u64,
    workload_size: usize,
    last: Census,
}

impl Observer {
    pub fn new(workload_size: usize) -> Self {
        Self {
            step: 0,
            workload_size,
            last: Census {
                unarrived: workload_size,
                ..Census::default()
            },
        }
    }

    pub fn observe(&mut self, ctx: &SchedCtx) -> Census {
        self.step += 1;

        if let Some(task_id) = ctx.current {
            let task = ctx.task(task_id);
            assert_eq!(
                task.state,
                TaskState::Running,
                "current task {task_id} must be Running"
            );
            assert!(
                !ctx.task_in_any_queue(task_id),
                "Running task {task_id} must not appear in any queue"
            );
        }

        let mut queued = 0;
        for (queue_id, queue) in &ctx.queues {
            for task_id in queue.iter() {
                queued += 1;
                assert_eq!(
                    ctx.task_to_queue.get(&task_id),
                    Some(&queue_id),
                    "Task {task_id} sits in queue {queue_id:?} without matching membership"
                );
                let expected = if queue_id == ctx.io_queue() {
                    TaskState::Blocked
                } else {
                    TaskState::Ready
                };
                assert_eq!(
                    ctx.task(task_id).state,
                    expected,
                    "Task {task_id} in queue {queue_id:?} has the wrong state"
                );
            }
        }
        assert_eq!(
            queued,
            ctx.task_to_queue.len(),
            "Membership table disagrees with queue contents"
        );

        let mut census = Census {
            unarrived: self.workload_size.saturating_sub(ctx.tasks.len()),
            ..Census::default()
        };
        for task in &ctx.tasks {
            match task.state {
                TaskState::Ready => census.ready += 1,
                TaskState::Running => census.running += 1,
                TaskState::Blocked => census.blocked += 1,
                TaskState::Completed => {
                    debug_assert_eq!(task.remaining_time, 0);
                    census.completed += 1;
                }
            }
        }
        assert_eq!(
            census.total(),
            self.workload_size,
            "Process lost or duplicated at step {}: {census:?}",
            self.step
        );
        // Every runnable task is either queued or on the CPU
        assert_eq!(
            census.ready + census.blocked,
            queued,
            "Runnable task missing from every queue at step {}",
            self.step
        );

        self.last = census;
        census
    }

    pub fn last(&self) -> Census {
        self.last
    }

    pub fn steps(&self) -> u64 {
        self.step
    }
}
