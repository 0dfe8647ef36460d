//! Investments product: holdings plus paginated investment transactions.
//!
//! Investment history gets a wider window than bank transactions (90 days
//! by default). Readiness is established by polling the transactions
//! endpoint; holdings are fetched with a strict call afterwards, once the
//! product is known to be computed.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{poll_until_ready, ApiClient, FetchError, PollPolicy, ProductFetcher};

use crate::dates::trailing_window;
use crate::link::link_sandbox_item;
use crate::pagination::{collect_pages, PageSpec, PAGE_SIZE};

/// Source label for archived investment holdings.
pub const INVESTMENT_HOLDINGS_SOURCE: &str = "plaid.investments.holdings";

/// Source label for archived investment transactions.
pub const INVESTMENT_TRANSACTIONS_SOURCE: &str = "plaid.investments.transactions";

const TRANSACTIONS_PATH: &str = "/investments/transactions/get";
const HOLDINGS_PATH: &str = "/investments/holdings/get";

const PAGES: PageSpec = PageSpec {
    records: "investment_transactions",
    total: "total_investment_transactions",
    carry: &["item", "securities"],
};

/// Pulls the investments product.
#[derive(Debug, Clone)]
pub struct InvestmentsFetcher {
    policy: PollPolicy,
    window_days: i64,
}

impl InvestmentsFetcher {
    /// Creates a fetcher with the default 15-attempt policy and a 90-day
    /// date window.
    pub fn new() -> Self {
        Self {
            policy: PollPolicy::new(15),
            window_days: 90,
        }
    }

    /// Overrides the polling policy.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for InvestmentsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductFetcher for InvestmentsFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Investments
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let access_token = link_sandbox_item(client, &["investments"], None).await?;
        let (start_date, end_date) = trailing_window(self.window_days);

        let payload = json!({
            "access_token": access_token,
            "start_date": start_date,
            "end_date": end_date,
            "options": { "count": PAGE_SIZE, "offset": 0 },
        });
        let first = poll_until_ready(client, TRANSACTIONS_PATH, &payload, &self.policy).await?;
        let transactions = collect_pages(client, TRANSACTIONS_PATH, &payload, first, &PAGES).await?;

        let holdings = client
            .post(HOLDINGS_PATH, json!({ "access_token": access_token }))
            .await?;

        Ok(vec![
            RawRecord::new(INVESTMENT_HOLDINGS_SOURCE, holdings),
            RawRecord::new(INVESTMENT_TRANSACTIONS_SOURCE, transactions),
        ])
    }
}

// ============================================================================
// Tests
// ============================================================================
