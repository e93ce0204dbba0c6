//! Branch configuration contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use valuta_shared::types::{BranchId, CurrencyCode};

/// Administrator-set opening position for one (branch, currency) pair.
///
/// This is the "period-zero" anchor the mutation calculator falls back to
/// when no transaction history precedes a requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBalance {
    /// Opening stock in foreign-currency units.
    pub foreign: Decimal,
    /// Local-currency valuation of the opening stock.
    pub local: Decimal,
}

impl OpeningBalance {
    /// Creates an opening balance.
    #[must_use]
    pub const fn new(foreign: Decimal, local: Decimal) -> Self {
        Self { foreign, local }
    }

    /// Returns true if both sides are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.foreign.is_zero() && self.local.is_zero()
    }
}

/// Read access to branch configuration.
pub trait BranchConfig: Send + Sync {
    /// Returns true if the branch exists.
    fn exists(&self, branch: BranchId) -> bool;

    /// Returns the branch's configured code, if any.
    fn branch_code(&self, branch: BranchId) -> Option<String>;

    /// Returns the configured opening balance for one currency.
    fn opening_balance(&self, branch: BranchId, currency: &CurrencyCode) -> Option<OpeningBalance>;

    /// Returns every configured opening balance for a branch.
    fn opening_balances(&self, branch: BranchId) -> Vec<(CurrencyCode, OpeningBalance)>;
}
