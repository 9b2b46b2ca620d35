use std::fmt;

use async_trait::async_trait;

use super::types::{Law, NormContent, NormSummary};

/// Errors that can occur while fetching from the law library backend.
/// The navigation core treats all variants uniformly (log, report once,
/// abandon the pending transition); the split exists for logging and tests.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The backend returned a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// The contract over the external data provider. Three read-only operations,
/// each an asynchronous request/response with no retry built in; the
/// navigation core is the sole consumer.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Returns the name of the fetcher (for logging).
    fn name(&self) -> &str;

    /// Returns all laws, unordered. The caller is responsible for sorting.
    async fn list_laws(&self) -> Result<Vec<Law>, FetchError>;

    /// Returns the norms belonging to the given law, in provider-defined
    /// order. The caller must not reorder these.
    async fn list_norms(&self, law_id: u32) -> Result<Vec<NormSummary>, FetchError>;

    /// Returns the full content record for one norm.
    async fn norm_content(&self, norm_id: u32) -> Result<NormContent, FetchError>;
}
