//! Liabilities product: a single strict call, no polling.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{ApiClient, FetchError, ProductFetcher};

use crate::link::link_sandbox_item;

/// Source label for archived liability payloads.
pub const LIABILITIES_SOURCE: &str = "plaid.liabilities";

/// Pulls the liabilities product.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiabilitiesFetcher;

impl LiabilitiesFetcher {
    /// Creates the fetcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProductFetcher for LiabilitiesFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Liabilities
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let access_token = link_sandbox_item(client, &["liabilities"], None).await?;
        let payload = client
            .post("/liabilities/get", json!({ "access_token": access_token }))
            .await?;
        Ok(vec![RawRecord::new(LIABILITIES_SOURCE, payload)])
    }
}

// ============================================================================
// Tests
// ============================================================================
