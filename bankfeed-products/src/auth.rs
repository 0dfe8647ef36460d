//! Auth product: accounts plus routing/account numbers.
//!
//! No polling; both payloads are available as soon as the item is linked.
//! This is the one product that archives two events from one fetch.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{ApiClient, FetchError, ProductFetcher};

use crate::link::link_sandbox_item;

/// Source label for archived account listings.
pub const ACCOUNTS_SOURCE: &str = "plaid.accounts";

/// Source label for archived auth payloads.
pub const AUTH_SOURCE: &str = "plaid.auth";

/// Pulls the auth product.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthFetcher;

impl AuthFetcher {
    /// Creates the fetcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProductFetcher for AuthFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Auth
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let access_token = link_sandbox_item(client, &["auth"], None).await?;

        let accounts = client
            .post("/accounts/get", json!({ "access_token": access_token }))
            .await?;
        let auth = client
            .post("/auth/get", json!({ "access_token": access_token }))
            .await?;

        Ok(vec![
            RawRecord::new(ACCOUNTS_SOURCE, accounts),
            RawRecord::new(AUTH_SOURCE, auth),
        ])
    }
}

// ============================================================================
// Tests
// ============================================================================
