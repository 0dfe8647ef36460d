//! Readiness classification and polling for asynchronous report endpoints.
//!
//! Several products compute their reports asynchronously: the first calls
//! against the data endpoint return a "still computing" error code until
//! the provider finishes. The poll loop here retries exactly those codes,
//! up to a fixed per-product ceiling with a fixed sleep, and aborts on
//! anything else so a misconfiguration is never masked by silent retries.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, instrument};

use crate::client::ApiClient;
use crate::error::FetchError;

// ============================================================================
// Transient Error Codes
// ============================================================================

/// Error code the provider returns while a product is still computing.
pub const PRODUCT_NOT_READY: &str = "PRODUCT_NOT_READY";

/// Error code returned before an income verification exists.
pub const INCOME_VERIFICATION_NOT_FOUND: &str = "INCOME_VERIFICATION_NOT_FOUND";

/// Default pause between poll attempts.
const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// Poll Policy
// ============================================================================

/// Per-product polling policy: retry ceiling, fixed sleep, and the error
/// codes that count as "still computing".
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Maximum number of poll attempts (total calls, not retries).
    pub max_attempts: u32,
    /// Fixed pause between transient attempts.
    pub delay: Duration,
    /// Error codes that are safe to retry.
    pub transient_codes: Vec<&'static str>,
}

impl PollPolicy {
    /// Creates a policy with the given ceiling, a one second sleep, and
    /// [`PRODUCT_NOT_READY`] as the only transient code.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: DEFAULT_POLL_DELAY,
            transient_codes: vec![PRODUCT_NOT_READY],
        }
    }

    /// Overrides the sleep between attempts (tests use zero).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Adds an additional transient error code.
    pub fn with_transient_code(mut self, code: &'static str) -> Self {
        self.transient_codes.push(code);
        self
    }

    fn is_transient(&self, code: &str) -> bool {
        self.transient_codes.iter().any(|transient| *transient == code)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classification of one lenient response during readiness polling.
///
/// The three-way split is the retry decision: retrying depends on
/// distinguishing success from transient from permanent, so the outcomes
/// stay tagged instead of collapsing into one error type.
#[derive(Debug)]
pub enum PollStep {
    /// Product data is ready; carries the response body.
    Ready(Value),
    /// Provider is still computing; safe to retry after the policy sleep.
    NotReady {
        /// The transient error code that matched.
        code: String,
        /// Full response body.
        body: Value,
    },
    /// Unrecognized error or status; polling must stop.
    Failed(Value),
}

/// Classifies one `(status, body)` pair against a policy.
pub fn classify(status: StatusCode, body: Value, policy: &PollPolicy) -> PollStep {
    let code = body
        .get("error_code")
        .and_then(Value::as_str)
        .map(str::to_owned);
    match code {
        None if status.is_success() => PollStep::Ready(body),
        Some(code) if policy.is_transient(&code) => PollStep::NotReady { code, body },
        _ => PollStep::Failed(body),
    }
}

// ============================================================================
// Poll Loop
// ============================================================================

/// Polls `path` with lenient calls until the provider signals readiness.
///
/// Returns the first ready body. An unrecognized error code or status
/// aborts immediately with [`FetchError::Api`]; transport failures abort
/// the same way. Ceiling exhaustion returns [`FetchError::NotReady`]
/// carrying the last transient body so abort-policy products can surface
/// it, while skip-policy products match on the variant and move on.
#[instrument(skip(client, payload, policy), fields(max_attempts = policy.max_attempts))]
pub async fn poll_until_ready(
    client: &ApiClient,
    path: &str,
    payload: &Value,
    policy: &PollPolicy,
) -> Result<Value, FetchError> {
    let mut last = None;

    for attempt in 1..=policy.max_attempts {
        let (status, body) = client.post_allow_error(path, payload.clone()).await?;
        match classify(status, body, policy) {
            PollStep::Ready(body) => {
                debug!(attempt, "product ready");
                return Ok(body);
            }
            PollStep::NotReady { code, body } => {
                debug!(attempt, code = %code, "product not ready yet");
                last = Some(body);
                if attempt < policy.max_attempts {
                    sleep(policy.delay).await;
                }
            }
            PollStep::Failed(body) => {
                return Err(FetchError::Api {
                    path: path.to_string(),
                    body,
                });
            }
        }
    }

    Err(FetchError::NotReady {
        path: path.to_string(),
        last,
    })
}

// ============================================================================
// Tests
// ============================================================================
