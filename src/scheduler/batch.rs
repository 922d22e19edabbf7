use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::debug;

use crate::args::PositiveUsize;
use crate::config::LoadTestConfig;
use crate::error::{AppError, AppResult, RunError};
use crate::http::{RequestExecutor, RequestSpec};
use crate::metrics::{RequestOutcome, ResultsCollection};

use super::progress::ProgressLine;

/// Upper bound for the up-front results allocation.
const MAX_PREALLOCATED_OUTCOMES: u64 = 1 << 20;

/// A finished run: one outcome per request plus the run's time bounds.
#[derive(Debug)]
pub struct ScheduledRun {
    pub outcomes: ResultsCollection,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// Dispatches requests in batches of at most `concurrency`, waiting for a
/// whole batch to finish before the next one starts.
///
/// Outcomes are appended only while a batch is being joined, so the results
/// collection has a single writer and needs no lock.
pub struct BatchScheduler<E> {
    executor: Arc<E>,
    progress: ProgressLine,
}

impl<E> BatchScheduler<E>
where
    E: RequestExecutor + 'static,
{
    #[must_use]
    pub const fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            progress: ProgressLine::disabled(),
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, progress: ProgressLine) -> Self {
        self.progress = progress;
        self
    }

    /// Runs `config.requests` requests against the configured target.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured headers are invalid, or when a
    /// request task panics or is cancelled. Transport failures are not
    /// errors; they are recorded as unsuccessful outcomes.
    pub async fn run(&self, config: &LoadTestConfig) -> AppResult<ScheduledRun> {
        let request = Arc::new(RequestSpec::from_config(config)?);
        self.dispatch(request, config.requests.get(), config.concurrency)
            .await
    }

    /// Issues exactly `total` executions of `request`, never more than
    /// `concurrency` at once. `total == 0` yields an empty run.
    ///
    /// # Errors
    ///
    /// Returns an error when a request task panics or is cancelled.
    pub async fn dispatch(
        &self,
        request: Arc<RequestSpec>,
        total: u64,
        concurrency: PositiveUsize,
    ) -> AppResult<ScheduledRun> {
        let started_at = Utc::now();
        let run_start = Instant::now();
        let capacity = usize::try_from(total.min(MAX_PREALLOCATED_OUTCOMES)).unwrap_or(0);
        let mut outcomes = ResultsCollection::with_capacity(capacity);
        let mut in_flight: JoinSet<RequestOutcome> = JoinSet::new();

        for _ in 0..total {
            let executor = Arc::clone(&self.executor);
            let request = Arc::clone(&request);
            in_flight.spawn(async move { executor.execute(&request).await });

            if in_flight.len() >= concurrency.get() {
                self.join_batch(&mut in_flight, &mut outcomes, total)
                    .await?;
            }
        }
        self.join_batch(&mut in_flight, &mut outcomes, total)
            .await?;

        let collected = u64::try_from(outcomes.len()).unwrap_or(u64::MAX);
        if collected != total {
            return Err(AppError::run(RunError::OutcomeCountMismatch {
                expected: total,
                collected,
            }));
        }

        let elapsed = run_start.elapsed();
        let finished_at = Utc::now();
        self.progress.finish();
        debug!("Collected {} outcomes in {:?}", collected, elapsed);

        Ok(ScheduledRun {
            outcomes,
            started_at,
            finished_at,
            elapsed,
        })
    }

    /// Batch barrier: waits for every in-flight request, appending each
    /// outcome as it lands.
    async fn join_batch(
        &self,
        in_flight: &mut JoinSet<RequestOutcome>,
        outcomes: &mut ResultsCollection,
        total: u64,
    ) -> AppResult<()> {
        if in_flight.is_empty() {
            return Ok(());
        }
        debug!("Waiting for batch of {} requests", in_flight.len());
        while let Some(joined) = in_flight.join_next().await {
            let outcome =
                joined.map_err(|err| AppError::run(RunError::RequestTaskFailed { source: err }))?;
            outcomes.push(outcome);
            let completed = u64::try_from(outcomes.len()).unwrap_or(u64::MAX);
            self.progress.update(completed, total);
        }
        Ok(())
    }
}
