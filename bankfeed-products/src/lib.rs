// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Bankfeed Products
//!
//! One fetcher per financial data product, plus the registry and the
//! batch pipeline runner.
//!
//! Every fetcher follows the same skeleton: create a sandbox public token
//! scoped to the product, exchange it for an access token, call the
//! product's data endpoint (polling for readiness where the provider
//! computes asynchronously), and return `(source, payload)` records for
//! archival. The asymmetries live in the table below and must hold
//! exactly; source labels are a compatibility contract.
//!
//! | Product | Polling ceiling | On exhaustion | Sources |
//! |---|---|---|---|
//! | assets | 10 | abort | `plaid.assets` |
//! | auth | none | - | `plaid.accounts`, `plaid.auth` |
//! | transactions | 12 | abort | `plaid.transactions` |
//! | recurring | 15 | abort | `plaid.recurring` |
//! | statements | none | - | `plaid.statements` |
//! | identity | none | - | `plaid.identity` |
//! | liabilities | none | - | `plaid.liabilities` |
//! | investments | 15 | abort | `plaid.investments.holdings`, `plaid.investments.transactions` |
//! | income_payroll | 15 | skip (empty result) | `plaid.income.payroll`, `plaid.income.employment` |
//!
//! Transactions and investment transactions paginate after readiness;
//! payroll income replaces link/exchange with a user-creation stage.

mod dates;
pub mod link;
mod pagination;

pub mod assets;
pub mod auth;
pub mod identity;
pub mod investments;
pub mod liabilities;
pub mod payroll;
pub mod recurring;
pub mod registry;
pub mod runner;
pub mod statements;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_support;

pub use assets::{AssetsFetcher, ASSETS_SOURCE};
pub use auth::{AuthFetcher, ACCOUNTS_SOURCE, AUTH_SOURCE};
pub use identity::{IdentityFetcher, IDENTITY_SOURCE};
pub use investments::{
    InvestmentsFetcher, INVESTMENT_HOLDINGS_SOURCE, INVESTMENT_TRANSACTIONS_SOURCE,
};
pub use liabilities::{LiabilitiesFetcher, LIABILITIES_SOURCE};
pub use payroll::{PayrollIncomeFetcher, EMPLOYMENT_SOURCE, PAYROLL_INCOME_SOURCE};
pub use recurring::{RecurringFetcher, RECURRING_SOURCE};
pub use registry::ProductRegistry;
pub use runner::{PipelineRunner, ProductSelector, RunnerError, StoredEvent};
pub use statements::{StatementsFetcher, STATEMENTS_SOURCE};
pub use transactions::{TransactionsFetcher, TRANSACTIONS_SOURCE};
