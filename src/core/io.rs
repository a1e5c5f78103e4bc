use rand::prelude::*;

use super::state::{SchedCtx, TaskId};

/// Source of I/O events. Owns the seeded generator so independent runs never
/// share random state.
///
/// Draw order is fixed: one draw per I/O-queue member (head first) in
/// [`IoDevice::resolve`], then at most one draw per tick for the running
/// task in [`IoDevice::request`].
#[derive(Debug)]
pub struct IoDevice {
    rng: StdRng,
    // 1-in-N odds; 0 disables the event
    request_chance: u32,
    complete_chance: u32,
}

impl IoDevice {
    pub fn new(seed: u64, request_chance: u32, complete_chance: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), request_chance, complete_chance)
    }

    pub fn with_rng(rng: StdRng, request_chance: u32, complete_chance: u32) -> Self {
        Self {
            rng,
            request_chance,
            complete_chance,
        }
    }

    /// Does the running task issue an I/O request this tick?
    pub fn request(&mut self) -> bool {
        roll(&mut self.rng, self.request_chance)
    }

    fn complete(&mut self) -> bool {
        roll(&mut self.rng, self.complete_chance)
    }

    /// Splits the I/O queue into finished and still-waiting tasks.
    ///
    /// Waiting tasks go back in their original order. Finished tasks are
    /// returned sorted by pid and are no longer in any queue.
    pub fn resolve(&mut self, ctx: &mut SchedCtx) -> Vec<TaskId> {
        let io_queue = ctx.io_queue();
        if ctx.queue(io_queue).is_empty() {
            return Vec::new();
        }

        let (mut done, waiting): (Vec<TaskId>, Vec<TaskId>) = ctx
            .queue_drain(io_queue)
            .into_iter()
            .partition(|_| self.complete());

        for task in waiting {
            ctx.queue_push(io_queue, task);
        }

        done.sort_by_key(|&task| ctx.task(task).pid);
        done
    }
}

fn roll(rng: &mut StdRng, chance: u32) -> bool {
    chance != 0 && rng.random_ratio(1, chance)
}
