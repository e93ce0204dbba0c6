//! In-memory transaction store.

use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};
use valuta_shared::types::{BranchScope, TransactionId, UserId};

use super::store::TransactionStore;
use super::types::{DeletionInfo, Transaction};

/// In-memory [`TransactionStore`] backend for tests and embedded use.
///
/// Query results are sorted by `(transaction_instant, id)` so repeated reads
/// are deterministic.
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryTransactionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns one transaction by id, deleted or not.
    #[must_use]
    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        let transactions = self
            .transactions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        transactions.iter().find(|t| t.id == id).cloned()
    }

    /// Returns the number of stored transactions, including deleted ones.
    #[must_use]
    pub fn len(&self) -> usize {
        let transactions = self
            .transactions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        transactions.len()
    }

    /// Returns true if the store holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Test hook: replaces a stored transaction wholesale.
    ///
    /// Real backends never mutate transactions; this exists so tests can
    /// prove that locked snapshots ignore later mutations.
    pub fn replace(&self, transaction: Transaction) {
        let mut transactions = self
            .transactions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(slot) = transactions.iter_mut().find(|t| t.id == transaction.id) {
            *slot = transaction;
        }
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn insert(&self, transaction: Transaction) {
        let mut transactions = self
            .transactions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        transactions.push(transaction);
    }

    fn find_in_range(
        &self,
        scope: BranchScope,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    ) -> Vec<Transaction> {
        let transactions = self
            .transactions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut found: Vec<Transaction> = transactions
            .iter()
            .filter(|t| {
                !t.is_deleted()
                    && scope.contains(t.branch_id)
                    && t.transaction_instant >= start
                    && t.transaction_instant < end_exclusive
            })
            .cloned()
            .collect();
        found.sort_by_key(|t| (t.transaction_instant, t.id));
        found
    }

    fn count_by_accounting_date(&self, date: NaiveDate) -> u64 {
        let transactions = self
            .transactions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        transactions.iter().filter(|t| t.accounting_date == date).count() as u64
    }

    fn soft_delete(&self, id: TransactionId, actor: UserId, at: DateTime<Utc>) -> bool {
        let mut transactions = self
            .transactions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match transactions.iter_mut().find(|t| t.id == id) {
            Some(transaction) => {
                if transaction.deletion.is_none() {
                    transaction.deletion = Some(DeletionInfo {
                        deleted_by: actor,
                        deleted_at: at,
                    });
                }
                true
            }
            None => false,
        }
    }
}
