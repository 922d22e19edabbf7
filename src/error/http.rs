use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid header name '{name}': {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{name}': {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Speed test request failed: {source}")]
    ProbeRequestFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Speed test download failed: {source}")]
    ProbeBodyFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Speed test returned HTTP {status}.")]
    ProbeStatus { status: u16 },
}
