//! Batched request dispatch.
mod batch;
mod progress;


pub use batch::{BatchScheduler, ScheduledRun};
pub use progress::ProgressLine;
