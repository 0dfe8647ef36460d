//! Recurring payments product.
//!
//! The recurring endpoint takes explicit account ids, so the fetcher
//! links the transactions product, lists accounts first, and then polls
//! `/transactions/recurring/get` until the streams are computed.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::instrument;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{poll_until_ready, ApiClient, FetchError, PollPolicy, ProductFetcher};

use crate::link::link_sandbox_item;

/// Source label for archived recurring payment streams.
pub const RECURRING_SOURCE: &str = "plaid.recurring";

const ACCOUNTS_PATH: &str = "/accounts/get";
const RECURRING_PATH: &str = "/transactions/recurring/get";

/// Pulls the recurring payments product.
#[derive(Debug, Clone)]
pub struct RecurringFetcher {
    policy: PollPolicy,
}

impl RecurringFetcher {
    /// Creates a fetcher with the default 15-attempt policy.
    pub fn new() -> Self {
        Self {
            policy: PollPolicy::new(15),
        }
    }

    /// Overrides the polling policy.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for RecurringFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductFetcher for RecurringFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Recurring
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let access_token = link_sandbox_item(client, &["transactions"], None).await?;

        let accounts = client
            .post(ACCOUNTS_PATH, json!({ "access_token": access_token }))
            .await?;
        let account_ids: Vec<String> = accounts
            .get("accounts")
            .and_then(Value::as_array)
            .map(|accounts| {
                accounts
                    .iter()
                    .filter_map(|account| {
                        account
                            .get("account_id")
                            .and_then(Value::as_str)
                            .map(str::to_owned)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let streams = poll_until_ready(
            client,
            RECURRING_PATH,
            &json!({
                "access_token": access_token,
                "account_ids": account_ids,
            }),
            &self.policy,
        )
        .await?;

        Ok(vec![RawRecord::new(RECURRING_SOURCE, streams)])
    }
}

// ============================================================================
// Tests
// ============================================================================
