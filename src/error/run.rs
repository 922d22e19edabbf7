use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Request task did not complete: {source}")]
    RequestTaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("Expected {expected} outcomes but collected {collected}.")]
    OutcomeCountMismatch { expected: u64, collected: u64 },
}
