//! In-memory branch configuration.

use std::collections::HashMap;
use std::sync::RwLock;

use valuta_shared::types::{BranchId, CurrencyCode};

use super::types::{BranchConfig, OpeningBalance};

#[derive(Debug, Default)]
struct BranchEntry {
    code: String,
    balances: HashMap<CurrencyCode, OpeningBalance>,
}

/// In-memory [`BranchConfig`] backend for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryBranchConfig {
    branches: RwLock<HashMap<BranchId, BranchEntry>>,
}

impl MemoryBranchConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a branch with its code.
    pub fn add_branch(&self, branch: BranchId, code: &str) {
        let mut branches = self.branches.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        branches.entry(branch).or_default().code = code.to_string();
    }

    /// Sets the opening balance for one (branch, currency) pair.
    pub fn set_opening_balance(
        &self,
        branch: BranchId,
        currency: CurrencyCode,
        balance: OpeningBalance,
    ) {
        let mut branches = self.branches.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        branches
            .entry(branch)
            .or_default()
            .balances
            .insert(currency, balance);
    }
}

impl BranchConfig for MemoryBranchConfig {
    fn exists(&self, branch: BranchId) -> bool {
        let branches = self.branches.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        branches.contains_key(&branch)
    }

    fn branch_code(&self, branch: BranchId) -> Option<String> {
        let branches = self.branches.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        branches.get(&branch).map(|b| b.code.clone())
    }

    fn opening_balance(&self, branch: BranchId, currency: &CurrencyCode) -> Option<OpeningBalance> {
        let branches = self.branches.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        branches
            .get(&branch)
            .and_then(|b| b.balances.get(currency).copied())
    }

    fn opening_balances(&self, branch: BranchId) -> Vec<(CurrencyCode, OpeningBalance)> {
        let branches = self.branches.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        branches
            .get(&branch)
            .map(|b| {
                let mut balances: Vec<_> = b
                    .balances
                    .iter()
                    .map(|(code, balance)| (code.clone(), *balance))
                    .collect();
                balances.sort_by(|a, b| a.0.cmp(&b.0));
                balances
            })
            .unwrap_or_default()
    }
}
