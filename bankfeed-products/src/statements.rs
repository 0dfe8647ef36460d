//! Statements product.
//!
//! Statements are unusual in that the date range is declared up front,
//! embedded in the link request options, and the listing itself is a
//! single strict call.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{ApiClient, FetchError, ProductFetcher};

use crate::dates::trailing_window;
use crate::link::link_sandbox_item;

/// Source label for archived statement listings.
pub const STATEMENTS_SOURCE: &str = "plaid.statements";

const LIST_PATH: &str = "/statements/list";

/// Pulls the statements product.
#[derive(Debug, Clone)]
pub struct StatementsFetcher {
    months_back: i64,
}

impl StatementsFetcher {
    /// Creates a fetcher covering the trailing twelve months.
    pub fn new() -> Self {
        Self { months_back: 12 }
    }
}

impl Default for StatementsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductFetcher for StatementsFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Statements
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let (start_date, end_date) = trailing_window(30 * self.months_back);
        let options = json!({
            "statements": { "start_date": start_date, "end_date": end_date },
        });

        let access_token =
            link_sandbox_item(client, &["transactions", "statements"], Some(options)).await?;
        let listing = client
            .post(LIST_PATH, json!({ "access_token": access_token }))
            .await?;

        Ok(vec![RawRecord::new(STATEMENTS_SOURCE, listing)])
    }
}

// ============================================================================
// Tests
// ============================================================================
