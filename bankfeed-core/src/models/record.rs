//! Record types flowing between fetchers and the event store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Raw Record
// ============================================================================

/// One `(source, payload)` pair produced by a product fetcher.
///
/// The source is a stable dotted label (e.g. `plaid.auth`) that downstream
/// consumers key on; the payload is the provider response, stored opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Source label identifying which product or sub-resource produced this.
    pub source: String,
    /// Full provider response body.
    pub payload: Value,
}

impl RawRecord {
    /// Creates a record from a source label and payload.
    pub fn new(source: impl Into<String>, payload: Value) -> Self {
        Self {
            source: source.into(),
            payload,
        }
    }
}

// ============================================================================
// Archived Event
// ============================================================================

/// One persisted raw provider response, the pipeline's sole durable output.
///
/// Events are immutable and append-only; `id` and `received_at` are
/// assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedEvent {
    /// Store-assigned auto-increment id.
    pub id: i64,
    /// Source label the payload was archived under.
    pub source: String,
    /// Insert timestamp assigned by the store.
    pub received_at: DateTime<Utc>,
    /// Full provider response body.
    pub payload: Value,
}

// ============================================================================
// Tests
// ============================================================================
