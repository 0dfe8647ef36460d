//! Product-related types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Product Kind
// ============================================================================

/// Financial data products the pipeline can pull.
///
/// Each product has its own upstream endpoints and readiness semantics;
/// the variants here are declared in batch-run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Asset reports (asynchronous report generation).
    Assets,
    /// Account and routing data.
    Auth,
    /// Account transactions over a trailing window.
    Transactions,
    /// Recurring payment streams.
    Recurring,
    /// Bank statement listings.
    Statements,
    /// Account holder identity data.
    Identity,
    /// Loan and credit liabilities.
    Liabilities,
    /// Investment holdings and transactions.
    Investments,
    /// Payroll income verification.
    PayrollIncome,
}

impl ProductKind {
    /// Returns the CLI selector name for this product.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::Auth => "auth",
            Self::Transactions => "transactions",
            Self::Recurring => "recurring",
            Self::Statements => "statements",
            Self::Identity => "identity",
            Self::Liabilities => "liabilities",
            Self::Investments => "investments",
            Self::PayrollIncome => "income_payroll",
        }
    }

    /// Returns the display name for this product.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Auth => "Auth",
            Self::Transactions => "Transactions",
            Self::Recurring => "Recurring payments",
            Self::Statements => "Statements",
            Self::Identity => "Identity",
            Self::Liabilities => "Liabilities",
            Self::Investments => "Investments",
            Self::PayrollIncome => "Payroll income",
        }
    }

    /// Returns all product kinds in batch-run order.
    pub fn all() -> &'static [ProductKind] {
        &[
            Self::Assets,
            Self::Auth,
            Self::Transactions,
            Self::Recurring,
            Self::Statements,
            Self::Identity,
            Self::Liabilities,
            Self::Investments,
            Self::PayrollIncome,
        ]
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cli_name())
    }
}

/// Error returned when a selector does not name a known product.
#[derive(Debug, Clone, Error)]
#[error("unknown product: {0}")]
pub struct UnknownProductError(pub String);

impl FromStr for ProductKind {
    type Err = UnknownProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|kind| kind.cli_name() == s)
            .copied()
            .ok_or_else(|| UnknownProductError(s.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
