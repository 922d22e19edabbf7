use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tokio::time::Instant;

use crate::config::ProbeConfig;
use crate::error::HttpError;

use super::client::build_client;
use super::executor::{describe_error, drain_response_body};

const BYTES_PER_MEBIBYTE: u128 = 1_048_576;
const MICROS_PER_SEC: u128 = 1_000_000;
const HUNDREDTHS: u128 = 100;

/// Bytes downloaded by the probe and how long it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkSpeed {
    pub bytes: u64,
    pub elapsed: Duration,
}

impl LinkSpeed {
    /// Throughput in hundredths of a megabit-per-second figure, computed as
    /// bytes / seconds / 1 048 576.
    #[must_use]
    pub fn mbps_x100(&self) -> u64 {
        let micros = self.elapsed.as_micros().max(1);
        let scaled = u128::from(self.bytes)
            .saturating_mul(MICROS_PER_SEC)
            .saturating_mul(HUNDREDTHS)
            .checked_div(micros.saturating_mul(BYTES_PER_MEBIBYTE))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for LinkSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.mbps_x100();
        write!(
            f,
            "{}.{:02}",
            value.checked_div(100).unwrap_or(0),
            value.checked_rem(100).unwrap_or(0)
        )
    }
}

/// What the link-speed probe produced. Failures never abort the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeReport {
    Measured(LinkSpeed),
    Failed { reason: String },
    Skipped,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeReport::Measured(speed) => write!(f, "Download Speed: {} Mbps", speed),
            ProbeReport::Failed { reason } => write!(f, "Error during speed test: {}", reason),
            ProbeReport::Skipped => f.write_str("skipped"),
        }
    }
}

/// Runs the probe described by `config`, folding every failure into the report.
pub async fn run_speed_test(config: &ProbeConfig) -> ProbeReport {
    if !config.enabled {
        return ProbeReport::Skipped;
    }

    let client = match build_client(Some(config.timeout), None) {
        Ok(client) => client,
        Err(err) => {
            return ProbeReport::Failed {
                reason: err.to_string(),
            };
        }
    };

    match measure_download_speed(&client, &config.url).await {
        Ok(speed) => {
            tracing::debug!("Speed test downloaded {} bytes in {:?}", speed.bytes, speed.elapsed);
            ProbeReport::Measured(speed)
        }
        Err(err) => {
            tracing::warn!("Speed test failed: {}", err);
            ProbeReport::Failed {
                reason: probe_reason(&err),
            }
        }
    }
}

/// Downloads `url` once and times the full body transfer.
///
/// # Errors
///
/// Returns an error when the request fails, the server answers with a
/// non-success status, or the body cannot be read.
pub async fn measure_download_speed(client: &Client, url: &str) -> Result<LinkSpeed, HttpError> {
    let start = Instant::now();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| HttpError::ProbeRequestFailed { source: err })?;
    let status = response.status();
    if !status.is_success() {
        return Err(HttpError::ProbeStatus {
            status: status.as_u16(),
        });
    }
    let bytes = drain_response_body(response)
        .await
        .map_err(|err| HttpError::ProbeBodyFailed { source: err })?;

    Ok(LinkSpeed {
        bytes,
        elapsed: start.elapsed(),
    })
}

fn probe_reason(err: &HttpError) -> String {
    match err {
        HttpError::ProbeRequestFailed { source } | HttpError::ProbeBodyFailed { source } => {
            describe_error(source)
        }
        HttpError::ProbeStatus { .. }
        | HttpError::BuildClientFailed { .. }
        | HttpError::InvalidHeaderName { .. }
        | HttpError::InvalidHeaderValue { .. } => err.to_string(),
    }
}
