use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timed result of one request attempt. Failures are outcomes too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestOutcome {
    pub elapsed_ms: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success: bool,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl RequestOutcome {
    #[must_use]
    pub fn completed(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        elapsed: Duration,
        status: u16,
    ) -> Self {
        Self {
            elapsed_ms: duration_ms(elapsed),
            started_at,
            finished_at,
            success: true,
            status: Some(status),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        elapsed: Duration,
        error: String,
    ) -> Self {
        Self {
            elapsed_ms: duration_ms(elapsed),
            started_at,
            finished_at,
            success: false,
            status: None,
            error: Some(error),
        }
    }
}

/// Append-only bag of outcomes. Insertion order carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct ResultsCollection {
    outcomes: Vec<RequestOutcome>,
}

impl ResultsCollection {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, outcome: RequestOutcome) {
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequestOutcome> {
        self.outcomes.iter()
    }

    #[must_use]
    pub fn latencies_ms(&self) -> Vec<u64> {
        self.outcomes
            .iter()
            .map(|outcome| outcome.elapsed_ms)
            .collect()
    }

    #[must_use]
    pub fn successful(&self) -> u64 {
        let count = self
            .outcomes
            .iter()
            .filter(|outcome| outcome.success)
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }
}

impl<'outcome> IntoIterator for &'outcome ResultsCollection {
    type Item = &'outcome RequestOutcome;
    type IntoIter = std::slice::Iter<'outcome, RequestOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// Rank (e.g. 90) to latency in milliseconds.
pub type Percentiles = BTreeMap<u64, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatencySummary {
    pub count: u64,
    pub successful: u64,
    pub failed: u64,
    /// Mean latency in microseconds.
    pub mean_us: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub percentiles: Percentiles,
}

impl LatencySummary {
    #[must_use]
    pub fn percentile(&self, rank: u64) -> Option<u64> {
        self.percentiles.get(&rank).copied()
    }
}

/// Result of aggregating a run; `NoData` stands in for an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Aggregation {
    Summary(LatencySummary),
    NoData,
}

impl Aggregation {
    #[must_use]
    pub const fn summary(&self) -> Option<&LatencySummary> {
        match self {
            Aggregation::Summary(summary) => Some(summary),
            Aggregation::NoData => None,
        }
    }
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
