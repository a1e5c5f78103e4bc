pub mod driver;
pub mod event;
pub mod io;
pub mod observer;
pub mod queue;
pub mod state;
pub mod stats;

pub use driver::SchedCore;
pub use event::SchedEvent;
pub use io::IoDevice;
pub use observer::{Census, Observer};
pub use queue::TaskQueue;
pub use state::{Pid, QueueId, SchedCtx, Task, TaskId, TaskState, Ticks};
pub use stats::SchedStats;
