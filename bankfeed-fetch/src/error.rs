//! Fetch error types.

use serde_json::Value;
use thiserror::Error;

/// Error type for upstream fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: connection, timeout, or an undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider reported an application-level error that is not
    /// retryable. Carries the endpoint path and the offending body.
    #[error("provider error at {path}: {body}")]
    Api {
        /// Endpoint path the request was sent to.
        path: String,
        /// Decoded response body, including the provider's `error_code`.
        body: Value,
    },

    /// The polling ceiling was exhausted while the provider was still
    /// computing. Carries the last transient response, if any.
    #[error("{path} not ready after polling; last response: {last:?}")]
    NotReady {
        /// Endpoint path that was being polled.
        path: String,
        /// Body of the last "still computing" response.
        last: Option<Value>,
    },

    /// The declared pagination total was never reached within the call cap.
    #[error("pagination stalled at {path}: expected {expected} records, accumulated {got}")]
    Pagination {
        /// Endpoint path being paginated.
        path: String,
        /// Record count the provider declared.
        expected: u64,
        /// Record count actually accumulated.
        got: u64,
    },

    /// A response was missing a field the pipeline needs to continue.
    #[error("response from {path} missing field `{field}`")]
    MissingField {
        /// Endpoint path the response came from.
        path: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
