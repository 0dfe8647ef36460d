//! Identity product: a single strict call, no polling.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{ApiClient, FetchError, ProductFetcher};

use crate::link::link_sandbox_item;

/// Source label for archived identity payloads.
pub const IDENTITY_SOURCE: &str = "plaid.identity";

/// Pulls the identity product.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFetcher;

impl IdentityFetcher {
    /// Creates the fetcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProductFetcher for IdentityFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Identity
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let access_token = link_sandbox_item(client, &["identity"], None).await?;
        let payload = client
            .post("/identity/get", json!({ "access_token": access_token }))
            .await?;
        Ok(vec![RawRecord::new(IDENTITY_SOURCE, payload)])
    }
}

// ============================================================================
// Tests
// ============================================================================
