use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use super::queue::TaskQueue;

// Index into Task Vec
pub type TaskId = usize;
pub type Pid = u64;
pub type Ticks = u64;
new_key_type! {
    pub struct QueueId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Ready,
    Running,
    // Waiting on I/O
    Blocked,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub pid: Pid,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub service_time: Ticks,
    /// Carried from the workload; no policy reads it.
    pub priority: i32,
    pub remaining_time: Ticks,
    pub priority_level: usize,
    pub allotment_used: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub ready_time: Ticks,
    pub io_time: Ticks,
    pub running_time: Ticks,
}

impl Task {
    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time.map(|start| start - self.arrival_time)
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion_time.map(|completion| completion - self.arrival_time)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time()
            .map(|turnaround| turnaround - self.service_time)
    }
}

/// Everything the tick loop and the policies share: the clock, the task
/// roster, every queue and the current-process slot.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    pub queues: SlotMap<QueueId, TaskQueue>,
    pub task_to_queue: FxHashMap<TaskId, QueueId>,
    pub io_queue_id: QueueId,
    pub current: Option<TaskId>,
}

impl SchedCtx {
    pub fn new() -> Self {
        let mut queues = SlotMap::with_key();
        let io_queue_id = queues.insert(TaskQueue::new());

        Self {
            now: 0,
            tasks: Vec::new(),
            queues,
            task_to_queue: FxHashMap::default(),
            io_queue_id,
            current: None,
        }
    }

    /// Registers an arriving process in the roster. The task is not queued yet.
    pub fn create_task(
        &mut self,
        pid: Pid,
        arrival_time: Ticks,
        service_time: Ticks,
        priority: i32,
    ) -> TaskId {
        assert!(service_time > 0, "Process {pid} has no service time");
        let id = self.tasks.len();

        self.tasks.push(Task {
            id,
            pid,
            state: TaskState::Ready,
            arrival_time,
            service_time,
            priority,
            remaining_time: service_time,
            priority_level: 0,
            allotment_used: 0,
            start_time: None,
            completion_time: None,
            ready_time: 0,
            io_time: 0,
            running_time: 0,
        });

        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn create_queue(&mut self) -> QueueId {
        self.queues.insert(TaskQueue::new())
    }

    pub fn io_queue(&self) -> QueueId {
        self.io_queue_id
    }

    pub fn queue(&self, queue_id: QueueId) -> &TaskQueue {
        self.queues.get(queue_id).expect("Unknown queue")
    }

    pub fn queue_push(&mut self, queue_id: QueueId, task_id: TaskId) {
        assert!(
            !self.task_to_queue.contains_key(&task_id),
            "Task {task_id} already present in some queue"
        );
        assert_ne!(
            self.current,
            Some(task_id),
            "Running task {task_id} must leave the CPU before it is queued"
        );

        let blocked = queue_id == self.io_queue_id;
        let task = self.task_mut(task_id);
        assert_ne!(
            task.state,
            TaskState::Completed,
            "Completed task {task_id} cannot be queued"
        );
        task.state = if blocked {
            TaskState::Blocked
        } else {
            TaskState::Ready
        };

        self.queues
            .get_mut(queue_id)
            .expect("Unknown queue")
            .enqueue(task_id);
        self.task_to_queue.insert(task_id, queue_id);
    }

    pub fn queue_pop(&mut self, queue_id: QueueId) -> Option<TaskId> {
        let task = self.queues.get_mut(queue_id)?.dequeue()?;
        let removed = self.task_to_queue.remove(&task);
        debug_assert_eq!(removed, Some(queue_id), "Task {task} missing queue membership");
        Some(task)
    }

    /// Takes the entry at `pos` out of the middle of a queue.
    pub fn queue_remove(&mut self, queue_id: QueueId, pos: usize) -> Option<TaskId> {
        let task = self.queues.get_mut(queue_id)?.remove(pos)?;
        let removed = self.task_to_queue.remove(&task);
        debug_assert_eq!(removed, Some(queue_id), "Task {task} missing queue membership");
        Some(task)
    }

    /// Empties a queue, returning its members head first.
    pub fn queue_drain(&mut self, queue_id: QueueId) -> Vec<TaskId> {
        let tasks: Vec<TaskId> = match self.queues.get_mut(queue_id) {
            Some(queue) => queue.drain().collect(),
            None => return Vec::new(),
        };
        for task in &tasks {
            self.task_to_queue.remove(task);
        }
        tasks
    }

    pub fn task_in_any_queue(&self, task_id: TaskId) -> bool {
        self.task_to_queue.contains_key(&task_id)
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn set_running(&mut self, task_id: TaskId) {
        assert!(
            !self.task_to_queue.contains_key(&task_id),
            "Running task {task_id} must not be enqueued"
        );
        assert!(
            self.current.is_none(),
            "CPU already running task {:?}",
            self.current
        );

        self.current = Some(task_id);
        let now = self.now;
        let task = self.task_mut(task_id);
        task.state = TaskState::Running;
        task.start_time.get_or_insert(now);
    }

    /// Clears the current-process slot. The task is left runnable but unqueued.
    pub fn take_current(&mut self) -> Option<TaskId> {
        let task_id = self.current.take()?;
        self.task_mut(task_id).state = TaskState::Ready;
        Some(task_id)
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        debug_assert!(
            !self.task_to_queue.contains_key(&task_id),
            "Completing task {task_id} that is still enqueued"
        );
        debug_assert_eq!(self.current, None, "Completing task {task_id} while on CPU");

        let now = self.now;
        let task = self.task_mut(task_id);
        assert_eq!(
            task.remaining_time, 0,
            "Task {task_id} completed with work left"
        );
        task.state = TaskState::Completed;
        task.completion_time = Some(now);
    }

    /// One tick of waiting for everything sitting on a ready queue.
    pub fn age_ready(&mut self) {
        let io_queue_id = self.io_queue_id;
        for (queue_id, queue) in &self.queues {
            if queue_id == io_queue_id {
                continue;
            }
            for task in queue.iter() {
                self.tasks[task].ready_time += 1;
            }
        }
    }

    /// One tick of I/O for everything sitting on the I/O queue.
    pub fn age_io(&mut self) {
        for task in self.queues[self.io_queue_id].iter() {
            self.tasks[task].io_time += 1;
        }
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_track_membership() {
        let mut ctx = SchedCtx::new();
        let ready = ctx.create_queue();
        let a = ctx.create_task(7, 0, 3, 0);

        ctx.queue_push(ready, a);
        assert!(ctx.task_in_any_queue(a));
        assert_eq!(ctx.task(a).state, TaskState::Ready);

        assert_eq!(ctx.queue_pop(ready), Some(a));
        assert!(!ctx.task_in_any_queue(a));

        let io = ctx.io_queue();
        ctx.queue_push(io, a);
        assert_eq!(ctx.task(a).state, TaskState::Blocked);
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn double_enqueue_is_fatal() {
        let mut ctx = SchedCtx::new();
        let ready = ctx.create_queue();
        let a = ctx.create_task(1, 0, 3, 0);
        ctx.queue_push(ready, a);
        ctx.queue_push(ctx.io_queue(), a);
    }

    #[test]
    #[should_panic(expected = "must leave the CPU")]
    fn running_task_cannot_be_queued() {
        let mut ctx = SchedCtx::new();
        let ready = ctx.create_queue();
        let a = ctx.create_task(1, 0, 3, 0);
        ctx.set_running(a);
        ctx.queue_push(ready, a);
    }

    #[test]
    fn start_time_is_recorded_once() {
        let mut ctx = SchedCtx::new();
        let a = ctx.create_task(1, 2, 3, 0);

        ctx.now = 4;
        ctx.set_running(a);
        ctx.take_current();
        ctx.now = 9;
        ctx.set_running(a);

        assert_eq!(ctx.task(a).start_time, Some(4));
        assert_eq!(ctx.task(a).response_time(), Some(2));
    }

    #[test]
    fn aging_skips_the_io_queue() {
        let mut ctx = SchedCtx::new();
        let ready = ctx.create_queue();
        let a = ctx.create_task(1, 0, 3, 0);
        let b = ctx.create_task(2, 0, 3, 0);
        ctx.queue_push(ready, a);
        ctx.queue_push(ctx.io_queue(), b);

        ctx.age_ready();
        ctx.age_io();
        ctx.age_io();

        assert_eq!((ctx.task(a).ready_time, ctx.task(a).io_time), (1, 0));
        assert_eq!((ctx.task(b).ready_time, ctx.task(b).io_time), (0, 2));
    }
}
