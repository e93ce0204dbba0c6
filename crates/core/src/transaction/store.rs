//! Transaction store contract.

use chrono::{DateTime, NaiveDate, Utc};
use valuta_shared::types::{BranchScope, TransactionId, UserId};

use super::types::Transaction;

/// Append-style storage for transactions.
///
/// The core never depends on a concrete storage technology; relational,
/// embedded and in-memory backends all implement this narrow query surface.
pub trait TransactionStore: Send + Sync {
    /// Appends a transaction.
    fn insert(&self, transaction: Transaction);

    /// Returns non-deleted transactions whose `transaction_instant` falls in
    /// `[start, end_exclusive)` within the given branch scope.
    ///
    /// No ordering is guaranteed; callers sort when order matters.
    fn find_in_range(
        &self,
        scope: BranchScope,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    ) -> Vec<Transaction>;

    /// Counts transactions carrying the given accounting date, system-wide.
    ///
    /// Soft-deleted transactions stay in the count so their sequence numbers
    /// are never reissued.
    fn count_by_accounting_date(&self, date: NaiveDate) -> u64;

    /// Marks a transaction deleted, recording the acting user and time.
    ///
    /// Returns false when no such transaction exists. Repeated calls keep
    /// the original deletion metadata.
    fn soft_delete(&self, id: TransactionId, actor: UserId, at: DateTime<Utc>) -> bool;
}
