//! Core library for the `loadstorm` CLI.
//!
//! `loadstorm` sends a fixed number of HTTP requests to one endpoint in
//! batches of at most `concurrency` requests, then reports nearest-rank
//! latency percentiles, throughput, a link-speed measurement and a short
//! description of the host. The building blocks are exposed so the scheduler
//! can be driven with other [`http::RequestExecutor`] implementations.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod scheduler;
pub mod system;

mod entry;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;

pub use entry::run;
