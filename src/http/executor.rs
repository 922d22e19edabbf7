use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::{LoadTestConfig, RequestBody};
use crate::error::AppResult;
use crate::metrics::RequestOutcome;

use super::client::build_client;
use super::request::RequestSpec;

/// Sends one request and reports how it went. Implementations never fail:
/// transport errors come back as an unsuccessful [`RequestOutcome`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: &RequestSpec) -> RequestOutcome;
}

/// [`RequestExecutor`] backed by a pooled `reqwest` client.
///
/// Any exchange the transport completes is a success, whatever the status
/// code; the status is kept on the outcome for information only.
#[derive(Debug)]
pub struct HttpExecutor {
    client: Client,
    detailed_log: bool,
    /// Completion counter for the detailed log lines.
    completed: AtomicU64,
}

impl HttpExecutor {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: &LoadTestConfig) -> AppResult<Self> {
        let client = build_client(config.request_timeout, config.connect_timeout)?;
        Ok(Self::with_client(client, config.detailed_log))
    }

    #[must_use]
    pub const fn with_client(client: Client, detailed_log: bool) -> Self {
        Self {
            client,
            detailed_log,
            completed: AtomicU64::new(0),
        }
    }

    async fn send(&self, request: &RequestSpec) -> Result<u16, reqwest::Error> {
        let mut request_builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        request_builder = match &request.body {
            Some(RequestBody::Json(value)) => request_builder.json(value),
            Some(RequestBody::Raw(text)) => request_builder.body(text.clone()),
            None => request_builder,
        };

        let response = request_builder.send().await?;
        let status = response.status().as_u16();
        drain_response_body(response).await?;
        Ok(status)
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: &RequestSpec) -> RequestOutcome {
        let started_at = Utc::now();
        let start = Instant::now();
        let result = self.send(request).await;
        let elapsed = start.elapsed();
        let finished_at = Utc::now();

        let outcome = match result {
            Ok(status) => RequestOutcome::completed(started_at, finished_at, elapsed, status),
            Err(err) => {
                let description = describe_error(&err);
                warn!(
                    "Error: {}, Time Taken: {} ms",
                    description,
                    elapsed.as_millis()
                );
                RequestOutcome::failed(started_at, finished_at, elapsed, description)
            }
        };

        if self.detailed_log {
            let index = self
                .completed
                .fetch_add(1, Ordering::Relaxed)
                .saturating_add(1);
            info!("Request {}: {} ms", index, outcome.elapsed_ms);
        }
        outcome
    }
}

pub(super) async fn drain_response_body(
    response: reqwest::Response,
) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

/// `reqwest` keeps the useful part (refused, dns, tls) in the source chain.
pub(crate) fn describe_error(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}
