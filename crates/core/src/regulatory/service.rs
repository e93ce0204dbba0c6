//! Draft generation, period locking and status queries.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use valuta_shared::types::{BranchScope, CustomerId, UserId};

use super::error::RegulatoryError;
use super::store::ReportingPeriodStore;
use super::types::{
    LockedPeriod, PeriodState, PeriodStatus, QuarterLockInfo, QuarterReport, ReportRow,
    ReportSummary, ReportingPeriodKey,
};
use crate::calendar::AccountingCalendar;
use crate::customer::CustomerDirectory;
use crate::transaction::store::TransactionStore;

/// Runs the quarterly report-once state machine.
pub struct RegulatoryService<'a> {
    transactions: &'a dyn TransactionStore,
    customers: &'a dyn CustomerDirectory,
    periods: &'a dyn ReportingPeriodStore,
    calendar: AccountingCalendar,
    operator_id: String,
}

impl<'a> RegulatoryService<'a> {
    /// Creates a service over the given collaborators.
    #[must_use]
    pub fn new(
        transactions: &'a dyn TransactionStore,
        customers: &'a dyn CustomerDirectory,
        periods: &'a dyn ReportingPeriodStore,
        calendar: AccountingCalendar,
        operator_id: impl Into<String>,
    ) -> Self {
        Self {
            transactions,
            customers,
            periods,
            calendar,
            operator_id: operator_id.into(),
        }
    }

    /// Returns the lifecycle state of one reporting period.
    ///
    /// # Errors
    ///
    /// Returns [`RegulatoryError::Calendar`] for a malformed period.
    pub fn period_state(
        &self,
        scope: BranchScope,
        year: i32,
        quarter: u8,
    ) -> Result<PeriodState, RegulatoryError> {
        AccountingCalendar::quarter_range_of(year, quarter)?;
        let key = ReportingPeriodKey { scope, year, quarter };
        Ok(self
            .periods
            .get(&key)
            .map_or(PeriodState::Draft, PeriodState::Locked))
    }

    /// Returns the quarterly report for a period.
    ///
    /// A locked period returns its frozen snapshot verbatim, never
    /// recomputed, whatever has happened to the underlying transactions
    /// since. An unlocked period is recomputed from the transaction log on
    /// every call and degrades to an empty row set when there is no data.
    ///
    /// # Errors
    ///
    /// Returns [`RegulatoryError::Calendar`] for a malformed period and
    /// [`RegulatoryError::CustomerNotFound`] when a transaction references
    /// a customer the directory does not know.
    pub fn quarter_draft(
        &self,
        scope: BranchScope,
        year: i32,
        quarter: u8,
    ) -> Result<QuarterReport, RegulatoryError> {
        let span = Self::quarter_span(year, quarter)?;
        let key = ReportingPeriodKey { scope, year, quarter };
        if let Some(locked) = self.periods.get(&key) {
            return Ok(QuarterReport {
                summary: ReportSummary::from_rows(&locked.rows),
                rows: locked.rows,
                status: PeriodStatus::Locked,
            });
        }

        let rows = self.generate_rows(scope, year, quarter, span)?;
        Ok(QuarterReport {
            summary: ReportSummary::from_rows(&rows),
            rows,
            status: PeriodStatus::Draft,
        })
    }

    /// Locks a reporting period, freezing its customer list and rows.
    ///
    /// The draft is regenerated here rather than accepted from the caller,
    /// so a stale or tampered payload can never be what gets frozen. The
    /// final insert is a compare-and-set: of any number of concurrent lock
    /// attempts exactly one wins, the rest observe `AlreadyLocked`.
    ///
    /// Returns the number of customers in the frozen report.
    ///
    /// # Errors
    ///
    /// Returns [`RegulatoryError::Calendar`] for a malformed period,
    /// [`RegulatoryError::AlreadyLocked`] when the period is already
    /// locked, and [`RegulatoryError::EmptyPeriod`] when the regenerated
    /// draft has no rows.
    pub fn lock_quarter(
        &self,
        scope: BranchScope,
        year: i32,
        quarter: u8,
        actor: UserId,
    ) -> Result<usize, RegulatoryError> {
        let span = Self::quarter_span(year, quarter)?;
        let key = ReportingPeriodKey { scope, year, quarter };
        if self.periods.get(&key).is_some() {
            return Err(RegulatoryError::AlreadyLocked { year, quarter });
        }

        let rows = self.generate_rows(scope, year, quarter, span)?;
        if rows.is_empty() {
            return Err(RegulatoryError::EmptyPeriod { year, quarter });
        }
        let reported_customer_ids: BTreeSet<CustomerId> =
            rows.iter().map(|row| row.customer_id).collect();
        let customer_count = reported_customer_ids.len();
        let period = LockedPeriod {
            reported_customer_ids,
            rows,
            locked_by: actor,
            locked_at: Utc::now(),
        };

        if self.periods.try_lock(key, period) {
            info!(?scope, year, quarter, customer_count, "reporting period locked");
            Ok(customer_count)
        } else {
            Err(RegulatoryError::AlreadyLocked { year, quarter })
        }
    }

    /// Returns the lock state of all four quarters of a year in one call.
    #[must_use]
    pub fn year_lock_status(
        &self,
        scope: BranchScope,
        year: i32,
    ) -> BTreeMap<u8, QuarterLockInfo> {
        let locked: BTreeMap<u8, LockedPeriod> =
            self.periods.locked_in_year(scope, year).into_iter().collect();
        (1..=4)
            .map(|quarter| {
                let info = locked.get(&quarter).map_or(
                    QuarterLockInfo {
                        locked: false,
                        locked_by: None,
                        locked_at: None,
                        reported_customers: 0,
                    },
                    |period| QuarterLockInfo {
                        locked: true,
                        locked_by: Some(period.locked_by),
                        locked_at: Some(period.locked_at),
                        reported_customers: period.reported_customer_ids.len(),
                    },
                );
                (quarter, info)
            })
            .collect()
    }

    fn quarter_span(year: i32, quarter: u8) -> Result<(NaiveDate, NaiveDate), RegulatoryError> {
        Ok(AccountingCalendar::quarter_range_of(year, quarter)?)
    }

    /// Builds draft rows: one per first-seen customer with in-scope
    /// transactions this quarter, skipping customers already reported in an
    /// earlier locked quarter of the same year and scope.
    fn generate_rows(
        &self,
        scope: BranchScope,
        year: i32,
        quarter: u8,
        span: (NaiveDate, NaiveDate),
    ) -> Result<Vec<ReportRow>, RegulatoryError> {
        let excluded: BTreeSet<CustomerId> = self
            .periods
            .locked_in_year(scope, year)
            .into_iter()
            .filter(|(locked_quarter, _)| *locked_quarter < quarter)
            .flat_map(|(_, period)| period.reported_customer_ids)
            .collect();

        let (start, end) = self.calendar.utc_range_of_span(span.0, span.1);
        let mut transactions = self.transactions.find_in_range(scope, start, end);
        transactions.sort_by_key(|t| (t.transaction_instant, t.id));

        let mut seen: BTreeSet<CustomerId> = BTreeSet::new();
        let mut rows = Vec::new();
        for transaction in transactions {
            let customer_id = transaction.customer_id;
            if excluded.contains(&customer_id) || !seen.insert(customer_id) {
                continue;
            }
            let profile = self
                .customers
                .get(customer_id)
                .ok_or(RegulatoryError::CustomerNotFound(customer_id))?;
            rows.push(ReportRow::from_profile(&self.operator_id, &profile));
        }
        debug!(?scope, year, quarter, rows = rows.len(), "quarter draft generated");
        Ok(rows)
    }
}
