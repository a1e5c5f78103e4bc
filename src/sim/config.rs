use crate::core::Ticks;
use crate::error::{Result, SimError};

pub const TIME_SLICE: Ticks = 4;
pub const NUM_PRIORITY_LEVELS: usize = 3;
pub const MLFQ_BOOST_TIME: Ticks = 100;
pub const CHANCE_OF_IO_REQUEST: u32 = 10;
pub const CHANCE_OF_IO_COMPLETE: u32 = 4;
pub const DEFAULT_SEED: u64 = 1;

/// Knobs for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Ticks a task may run before a round-robin or MLFQ requeue
    pub time_slice: Ticks,
    /// Number of MLFQ priority levels
    pub num_levels: usize,
    /// Ticks between MLFQ boosts
    pub boost_time: Ticks,
    /// Running time an MLFQ task may spend at one level
    pub allotment: Ticks,
    /// 1-in-N chance per tick that the running task requests I/O (0: never)
    pub io_request_chance: u32,
    /// 1-in-N chance per tick that a waiting task's I/O finishes (0: never)
    pub io_complete_chance: u32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_slice: TIME_SLICE,
            num_levels: NUM_PRIORITY_LEVELS,
            boost_time: MLFQ_BOOST_TIME,
            allotment: TIME_SLICE,
            io_request_chance: CHANCE_OF_IO_REQUEST,
            io_complete_chance: CHANCE_OF_IO_COMPLETE,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Default knobs with I/O switched off.
    pub fn without_io() -> Self {
        Self::default().with_io_chances(0, 0)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_time_slice(mut self, time_slice: Ticks) -> Self {
        self.time_slice = time_slice;
        self
    }

    pub fn with_levels(mut self, num_levels: usize) -> Self {
        self.num_levels = num_levels;
        self
    }

    pub fn with_boost_time(mut self, boost_time: Ticks) -> Self {
        self.boost_time = boost_time;
        self
    }

    pub fn with_allotment(mut self, allotment: Ticks) -> Self {
        self.allotment = allotment;
        self
    }

    pub fn with_io_chances(mut self, request: u32, complete: u32) -> Self {
        self.io_request_chance = request;
        self.io_complete_chance = complete;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_slice == 0 {
            return Err(SimError::InvalidConfig("time slice must be positive"));
        }
        if self.num_levels == 0 {
            return Err(SimError::InvalidConfig("MLFQ needs at least one level"));
        }
        if self.boost_time == 0 {
            return Err(SimError::InvalidConfig("boost period must be positive"));
        }
        if self.allotment == 0 {
            return Err(SimError::InvalidConfig("allotment must be positive"));
        }
        Ok(())
    }
}
