//! Request outcomes and latency aggregation.
mod percentiles;
mod types;


pub use percentiles::{REPORT_RANKS, mean_us, percentiles, summarize};
pub use types::{
    Aggregation, LatencySummary, Percentiles, RequestOutcome, ResultsCollection,
};

pub(crate) use types::duration_ms;
