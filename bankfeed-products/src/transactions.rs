//! Transactions product: readiness polling, then offset pagination.
//!
//! The provider computes transaction history asynchronously after an item
//! is linked, so the first `/transactions/get` calls poll for readiness.
//! Once ready, pages of 100 are fetched until the declared total is met
//! and the records merged into a single payload.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{poll_until_ready, ApiClient, FetchError, PollPolicy, ProductFetcher};

use crate::dates::trailing_window;
use crate::link::link_sandbox_item;
use crate::pagination::{collect_pages, PageSpec, PAGE_SIZE};

/// Source label for archived transaction payloads.
pub const TRANSACTIONS_SOURCE: &str = "plaid.transactions";

const TRANSACTIONS_PATH: &str = "/transactions/get";

const PAGES: PageSpec = PageSpec {
    records: "transactions",
    total: "total_transactions",
    carry: &["item"],
};

/// Pulls the transactions product.
#[derive(Debug, Clone)]
pub struct TransactionsFetcher {
    policy: PollPolicy,
    window_days: i64,
}

impl TransactionsFetcher {
    /// Creates a fetcher with the default 12-attempt policy and a 30-day
    /// date window.
    pub fn new() -> Self {
        Self {
            policy: PollPolicy::new(12),
            window_days: 30,
        }
    }

    /// Overrides the polling policy.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for TransactionsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductFetcher for TransactionsFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Transactions
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let access_token = link_sandbox_item(client, &["transactions"], None).await?;
        let (start_date, end_date) = trailing_window(self.window_days);

        let payload = json!({
            "access_token": access_token,
            "start_date": start_date,
            "end_date": end_date,
            "options": { "count": PAGE_SIZE, "offset": 0 },
        });
        let first = poll_until_ready(client, TRANSACTIONS_PATH, &payload, &self.policy).await?;
        let merged = collect_pages(client, TRANSACTIONS_PATH, &payload, first, &PAGES).await?;

        Ok(vec![RawRecord::new(TRANSACTIONS_SOURCE, merged)])
    }
}

// ============================================================================
// Tests
// ============================================================================
