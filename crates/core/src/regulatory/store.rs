//! Reporting period store contract.

use valuta_shared::types::BranchScope;

use super::types::{LockedPeriod, ReportingPeriodKey};

/// Storage for locked reporting periods.
///
/// Only locked periods are persisted; the absence of a row is the draft
/// state. Backends must write the snapshot and the customer id set as one
/// atomic unit: a reader can observe the period unlocked or fully locked,
/// never in between.
pub trait ReportingPeriodStore: Send + Sync {
    /// Returns the locked period for a key, if the period has been locked.
    fn get(&self, key: &ReportingPeriodKey) -> Option<LockedPeriod>;

    /// Returns every locked quarter of a (scope, year), in quarter order.
    fn locked_in_year(&self, scope: BranchScope, year: i32) -> Vec<(u8, LockedPeriod)>;

    /// Atomically persists a locked period unless the key is already
    /// locked.
    ///
    /// Returns true when this call won the lock, false when some other
    /// lock got there first. This is the check-then-act step of the lock
    /// operation, so it must be a single compare-and-set against the
    /// backend, not a read followed by a write.
    fn try_lock(&self, key: ReportingPeriodKey, period: LockedPeriod) -> bool;
}
