use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::LoadTestConfig;
use crate::http::ProbeReport;
use crate::metrics::{Aggregation, duration_ms};
use crate::scheduler::ScheduledRun;
use crate::system::EnvironmentDetails;

/// Everything printed at the end of a run. Built once, rendered once.
#[derive(Debug, Clone, Serialize)]
pub struct LoadTestReport {
    pub url: String,
    pub method: &'static str,
    pub requests: u64,
    pub concurrency: usize,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed_ms: u64,
    /// Completed outcomes per second, in hundredths.
    pub throughput_rps_x100: u64,
    pub latency: Aggregation,
    pub internet_speed: String,
    pub probe: ProbeReport,
    pub environment: EnvironmentDetails,
}

impl LoadTestReport {
    #[must_use]
    pub fn build(
        config: &LoadTestConfig,
        run: &ScheduledRun,
        latency: Aggregation,
        probe: ProbeReport,
        environment: EnvironmentDetails,
    ) -> Self {
        let completed = u64::try_from(run.outcomes.len()).unwrap_or(u64::MAX);
        let elapsed_ms = duration_ms(run.elapsed);
        Self {
            url: config.url.to_string(),
            method: config.method.as_str(),
            requests: config.requests.get(),
            concurrency: config.concurrency.get(),
            started_at: run.started_at.with_timezone(&Local),
            finished_at: run.finished_at.with_timezone(&Local),
            elapsed_ms,
            throughput_rps_x100: throughput_x100(completed, elapsed_ms),
            latency,
            internet_speed: probe.to_string(),
            probe,
            environment,
        }
    }
}

pub(crate) fn throughput_x100(completed: u64, elapsed_ms: u64) -> u64 {
    let scaled = u128::from(completed)
        .saturating_mul(100_000)
        .checked_div(u128::from(elapsed_ms.max(1)))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
