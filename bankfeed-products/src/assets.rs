//! Assets product: asynchronous asset report generation.
//!
//! Unlike the other polled products, assets has an explicit report
//! creation step: `/asset_report/create` returns a report token, and
//! `/asset_report/get` is polled with that token until the provider has
//! finished building the report.

use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{poll_until_ready, ApiClient, FetchError, PollPolicy, ProductFetcher};

use crate::link::{link_sandbox_item, string_field};

/// Source label for archived asset reports.
pub const ASSETS_SOURCE: &str = "plaid.assets";

const CREATE_PATH: &str = "/asset_report/create";
const GET_PATH: &str = "/asset_report/get";

/// Pulls the assets product.
#[derive(Debug, Clone)]
pub struct AssetsFetcher {
    policy: PollPolicy,
    days_requested: u32,
}

impl AssetsFetcher {
    /// Creates a fetcher with the default 10-attempt policy and a 30-day
    /// report window.
    pub fn new() -> Self {
        Self {
            policy: PollPolicy::new(10),
            days_requested: 30,
        }
    }

    /// Overrides the polling policy.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for AssetsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductFetcher for AssetsFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::Assets
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let access_token = link_sandbox_item(client, &["assets"], None).await?;

        let created = client
            .post(
                CREATE_PATH,
                json!({
                    "access_tokens": [access_token],
                    "days_requested": self.days_requested,
                    "options": { "client_report_id": Uuid::new_v4().simple().to_string() },
                }),
            )
            .await?;
        let report_token = string_field(&created, CREATE_PATH, "asset_report_token")?;

        let report = poll_until_ready(
            client,
            GET_PATH,
            &json!({
                "asset_report_token": report_token,
                "include_insights": true,
            }),
            &self.policy,
        )
        .await?;

        Ok(vec![RawRecord::new(ASSETS_SOURCE, report)])
    }
}

// ============================================================================
// Tests
// ============================================================================
