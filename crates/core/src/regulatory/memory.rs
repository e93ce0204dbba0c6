//! In-memory reporting period store.

use std::collections::HashMap;
use std::sync::Mutex;

use valuta_shared::types::BranchScope;

use super::store::ReportingPeriodStore;
use super::types::{LockedPeriod, ReportingPeriodKey};

/// In-memory [`ReportingPeriodStore`] backend for tests and embedded use.
///
/// A single mutex guards the whole map, which makes `try_lock` trivially
/// atomic: the existence check and the insert happen under one guard.
#[derive(Debug, Default)]
pub struct MemoryReportingPeriodStore {
    periods: Mutex<HashMap<ReportingPeriodKey, LockedPeriod>>,
}

impl MemoryReportingPeriodStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of locked periods.
    #[must_use]
    pub fn len(&self) -> usize {
        let periods = self
            .periods
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        periods.len()
    }

    /// Returns true if nothing has been locked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportingPeriodStore for MemoryReportingPeriodStore {
    fn get(&self, key: &ReportingPeriodKey) -> Option<LockedPeriod> {
        let periods = self
            .periods
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        periods.get(key).cloned()
    }

    fn locked_in_year(&self, scope: BranchScope, year: i32) -> Vec<(u8, LockedPeriod)> {
        let periods = self
            .periods
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut found: Vec<(u8, LockedPeriod)> = periods
            .iter()
            .filter(|(key, _)| key.scope == scope && key.year == year)
            .map(|(key, period)| (key.quarter, period.clone()))
            .collect();
        found.sort_by_key(|(quarter, _)| *quarter);
        found
    }

    fn try_lock(&self, key: ReportingPeriodKey, period: LockedPeriod) -> bool {
        let mut periods = self
            .periods
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match periods.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(period);
                true
            }
        }
    }
}
