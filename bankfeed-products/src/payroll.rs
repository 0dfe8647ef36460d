//! Payroll income product.
//!
//! Income verification replaces link/exchange with a user-creation stage:
//! `/user/create` issues a user token, and `/credit/payroll_income/get`
//! is polled against it. Before a verification exists the provider
//! answers `INCOME_VERIFICATION_NOT_FOUND`, so that code is transient
//! here alongside the usual `PRODUCT_NOT_READY`.
//!
//! This is the one product with a skip exhaustion policy: if the income
//! report never materializes, the fetcher returns an empty record list so
//! an `all` batch run continues with the remaining products instead of
//! aborting.

use async_trait::async_trait;
use serde_json::json;
use tracing::{instrument, warn};
use uuid::Uuid;

use bankfeed_core::{ProductKind, RawRecord};
use bankfeed_fetch::{
    poll_until_ready, ApiClient, FetchError, PollPolicy, ProductFetcher,
    INCOME_VERIFICATION_NOT_FOUND,
};

use crate::link::string_field;

/// Source label for archived payroll income reports.
pub const PAYROLL_INCOME_SOURCE: &str = "plaid.income.payroll";

/// Source label for archived employment verifications.
pub const EMPLOYMENT_SOURCE: &str = "plaid.income.employment";

const USER_CREATE_PATH: &str = "/user/create";
const PAYROLL_PATH: &str = "/credit/payroll_income/get";
const EMPLOYMENT_PATH: &str = "/credit/employment/get";

/// Pulls the payroll income product.
#[derive(Debug, Clone)]
pub struct PayrollIncomeFetcher {
    policy: PollPolicy,
}

impl PayrollIncomeFetcher {
    /// Creates a fetcher with the default 15-attempt policy and both
    /// income transient codes.
    pub fn new() -> Self {
        Self {
            policy: PollPolicy::new(15).with_transient_code(INCOME_VERIFICATION_NOT_FOUND),
        }
    }

    /// Overrides the polling policy.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for PayrollIncomeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductFetcher for PayrollIncomeFetcher {
    fn kind(&self) -> ProductKind {
        ProductKind::PayrollIncome
    }

    #[instrument(skip(self, client))]
    async fn fetch(&self, client: &ApiClient) -> Result<Vec<RawRecord>, FetchError> {
        let user = client
            .post(
                USER_CREATE_PATH,
                json!({ "client_user_id": Uuid::new_v4().simple().to_string() }),
            )
            .await?;
        let user_token = string_field(&user, USER_CREATE_PATH, "user_token")?;
        let payload = json!({ "user_token": user_token });

        match poll_until_ready(client, PAYROLL_PATH, &payload, &self.policy).await {
            Ok(income) => {
                let employment = client.post(EMPLOYMENT_PATH, payload).await?;
                Ok(vec![
                    RawRecord::new(PAYROLL_INCOME_SOURCE, income),
                    RawRecord::new(EMPLOYMENT_SOURCE, employment),
                ])
            }
            Err(FetchError::NotReady { path, .. }) => {
                warn!(path = %path, "payroll income never became ready, skipping product");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
