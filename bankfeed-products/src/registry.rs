//! Static product registry.
//!
//! A simple table from product name to fetcher, initialized once and
//! iterated in declaration order by `all` batch runs.

use std::str::FromStr;
use std::sync::OnceLock;

use bankfeed_core::ProductKind;
use bankfeed_fetch::ProductFetcher;

use crate::assets::AssetsFetcher;
use crate::auth::AuthFetcher;
use crate::identity::IdentityFetcher;
use crate::investments::InvestmentsFetcher;
use crate::liabilities::LiabilitiesFetcher;
use crate::payroll::PayrollIncomeFetcher;
use crate::recurring::RecurringFetcher;
use crate::statements::StatementsFetcher;
use crate::transactions::TransactionsFetcher;

/// Static storage for the registered fetchers.
static FETCHERS: OnceLock<Vec<Box<dyn ProductFetcher>>> = OnceLock::new();

/// Builds every registered fetcher, in batch-run order.
fn init_fetchers() -> Vec<Box<dyn ProductFetcher>> {
    vec![
        Box::new(AssetsFetcher::new()),
        Box::new(AuthFetcher::new()),
        Box::new(TransactionsFetcher::new()),
        Box::new(RecurringFetcher::new()),
        Box::new(StatementsFetcher::new()),
        Box::new(IdentityFetcher::new()),
        Box::new(LiabilitiesFetcher::new()),
        Box::new(InvestmentsFetcher::new()),
        Box::new(PayrollIncomeFetcher::new()),
    ]
}

/// Global registry of product fetchers.
///
/// Initialized lazily on first access; the order of [`ProductRegistry::all`]
/// is the order an `all` run executes in.
pub struct ProductRegistry;

impl ProductRegistry {
    /// Returns all fetchers in registration order.
    pub fn all() -> &'static [Box<dyn ProductFetcher>] {
        FETCHERS.get_or_init(init_fetchers)
    }

    /// Gets the fetcher for a product kind.
    pub fn get(kind: ProductKind) -> Option<&'static dyn ProductFetcher> {
        Self::all()
            .iter()
            .find(|fetcher| fetcher.kind() == kind)
            .map(AsRef::as_ref)
    }

    /// Looks up a fetcher by CLI selector name.
    pub fn get_by_name(name: &str) -> Option<&'static dyn ProductFetcher> {
        ProductKind::from_str(name).ok().and_then(Self::get)
    }

    /// Returns the CLI names of every registered product, in order.
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|fetcher| fetcher.name()).collect()
    }

    /// Returns the number of registered products.
    pub fn count() -> usize {
        Self::all().len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_nine_products() {
        assert_eq!(ProductRegistry::count(), 9);
        for kind in ProductKind::all() {
            assert!(
                ProductRegistry::get(*kind).is_some(),
                "missing fetcher for {kind:?}"
            );
        }
    }

    #[test]
    fn test_registration_order_is_batch_order() {
        let kinds: Vec<ProductKind> = ProductRegistry::all().iter().map(|f| f.kind()).collect();
        assert_eq!(kinds, ProductKind::all());
    }

    #[test]
    fn test_lookup_by_name() {
        let fetcher = ProductRegistry::get_by_name("income_payroll").unwrap();
        assert_eq!(fetcher.kind(), ProductKind::PayrollIncome);
        assert!(ProductRegistry::get_by_name("credit_score").is_none());
    }
}
