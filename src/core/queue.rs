use std::collections::VecDeque;

use super::state::TaskId;

/// Insertion-ordered FIFO of task ids.
///
/// The queue never reorders on its own; policies decide who leaves first.
#[derive(Debug, Default, Clone)]
pub struct TaskQueue {
    tasks: VecDeque<TaskId>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, task: TaskId) {
        self.tasks.push_back(task);
    }

    pub fn dequeue(&mut self) -> Option<TaskId> {
        self.tasks.pop_front()
    }

    pub fn peek(&self) -> Option<TaskId> {
        self.tasks.front().copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, task: TaskId) -> bool {
        self.tasks.contains(&task)
    }

    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().copied()
    }

    /// Removes the entry at `pos`, keeping the relative order of the rest.
    pub fn remove(&mut self, pos: usize) -> Option<TaskId> {
        self.tasks.remove(pos)
    }

    /// Position of the first entry with the smallest key.
    pub fn position_min_by_key<K: Ord>(&self, mut key: impl FnMut(TaskId) -> K) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .min_by_key(|&(_, &task)| key(task))
            .map(|(pos, _)| pos)
    }

    /// Empties the queue, yielding entries head first.
    pub fn drain(&mut self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.drain(..)
    }
}
