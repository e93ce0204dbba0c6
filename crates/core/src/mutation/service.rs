//! Mutation computation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;
use valuta_shared::types::{BranchScope, CurrencyCode};

use super::error::MutationError;
use super::types::{CurrencyMutation, DateRange};
use crate::branch::BranchConfig;
use crate::calendar::AccountingCalendar;
use crate::transaction::store::TransactionStore;
use crate::transaction::types::{Direction, Transaction};

/// Running stock position: foreign units and their local-currency carrying
/// value.
#[derive(Debug, Clone, Copy, Default)]
struct Position {
    fc: Decimal,
    lc: Decimal,
}

impl Position {
    fn is_zero(self) -> bool {
        self.fc.is_zero() && self.lc.is_zero()
    }
}

/// One period's buy/sell totals.
#[derive(Debug, Clone, Copy, Default)]
struct WindowTotals {
    purchases_fc: Decimal,
    purchases_lc: Decimal,
    sales_fc: Decimal,
    sales_lc: Decimal,
    count: usize,
}

impl WindowTotals {
    fn add(&mut self, transaction: &Transaction) {
        match transaction.direction {
            Direction::Buy => {
                self.purchases_fc += transaction.foreign_amount;
                self.purchases_lc += transaction.local_amount;
            }
            Direction::Sell => {
                self.sales_fc += transaction.foreign_amount;
                self.sales_lc += transaction.local_amount;
            }
        }
        self.count += 1;
    }
}

/// Applies one period's totals to a position.
///
/// The average cost moves only on acquisitions; sales leave the average
/// untouched and remove value at that average. Zero acquisition basis
/// resolves to a zero rate, never an error.
fn apply_window(position: Position, totals: WindowTotals) -> (Position, Decimal) {
    let basis_fc = position.fc + totals.purchases_fc;
    let basis_lc = position.lc + totals.purchases_lc;
    let weighted_avg_rate = if basis_fc.is_zero() {
        Decimal::ZERO
    } else {
        basis_lc / basis_fc
    };
    let next = Position {
        fc: basis_fc - totals.sales_fc,
        lc: basis_lc - totals.sales_fc * weighted_avg_rate,
    };
    (next, weighted_avg_rate)
}

/// Computes per-currency stock mutations from the transaction log.
pub struct MutationCalculator<'a> {
    store: &'a dyn TransactionStore,
    branches: &'a dyn BranchConfig,
    calendar: AccountingCalendar,
}

impl<'a> MutationCalculator<'a> {
    /// Creates a calculator over the given collaborators.
    #[must_use]
    pub fn new(
        store: &'a dyn TransactionStore,
        branches: &'a dyn BranchConfig,
        calendar: AccountingCalendar,
    ) -> Self {
        Self {
            store,
            branches,
            calendar,
        }
    }

    /// Computes the mutation record for one currency over a range of
    /// accounting dates.
    ///
    /// Returns `Ok(None)` for a currency with no stock and no activity in
    /// scope, including a currency code the system has never seen.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::BranchNotFound`] when the scope names a
    /// branch that does not exist.
    pub fn compute(
        &self,
        scope: BranchScope,
        currency: &CurrencyCode,
        range: DateRange,
    ) -> Result<Option<CurrencyMutation>, MutationError> {
        self.ensure_branch(scope)?;
        Ok(self.compute_unchecked(scope, currency, range))
    }

    /// Computes mutation records for every currency with stock or activity
    /// in scope, sorted by currency code.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::BranchNotFound`] when the scope names a
    /// branch that does not exist.
    pub fn compute_all(
        &self,
        scope: BranchScope,
        range: DateRange,
    ) -> Result<Vec<CurrencyMutation>, MutationError> {
        self.ensure_branch(scope)?;

        let (_, range_end) = self.calendar.utc_range_of_span(range.start(), range.end());
        let mut currencies: BTreeSet<CurrencyCode> = self
            .store
            .find_in_range(scope, DateTime::<Utc>::MIN_UTC, range_end)
            .into_iter()
            .map(|t| t.currency)
            .collect();
        if let Some(branch) = scope.branch_id() {
            currencies.extend(
                self.branches
                    .opening_balances(branch)
                    .into_iter()
                    .map(|(code, _)| code),
            );
        }

        let records: Vec<CurrencyMutation> = currencies
            .into_iter()
            .filter_map(|currency| self.compute_unchecked(scope, &currency, range))
            .collect();
        debug!(?scope, currencies = records.len(), "mutation report computed");
        Ok(records)
    }

    fn ensure_branch(&self, scope: BranchScope) -> Result<(), MutationError> {
        match scope.branch_id() {
            Some(branch) if !self.branches.exists(branch) => {
                Err(MutationError::BranchNotFound(branch))
            }
            _ => Ok(()),
        }
    }

    fn compute_unchecked(
        &self,
        scope: BranchScope,
        currency: &CurrencyCode,
        range: DateRange,
    ) -> Option<CurrencyMutation> {
        let (range_start, range_end) = self.calendar.utc_range_of_span(range.start(), range.end());

        // The lookback is anchored to the whole requested range: the opening
        // position is the state strictly before `range.start()`, never
        // re-derived per day inside the range.
        let opening = self.opening_position(scope, currency, range_start);

        let mut totals = WindowTotals::default();
        for transaction in self
            .store
            .find_in_range(scope, range_start, range_end)
            .iter()
            .filter(|t| &t.currency == currency)
        {
            totals.add(transaction);
        }

        if totals.count == 0 && opening.is_zero() {
            return None;
        }

        let (ending, weighted_avg_rate) = apply_window(opening, totals);
        Some(CurrencyMutation {
            currency: currency.clone(),
            opening_stock_fc: opening.fc,
            opening_stock_lc: opening.lc,
            purchases_fc: totals.purchases_fc,
            purchases_lc: totals.purchases_lc,
            sales_fc: totals.sales_fc,
            sales_lc: totals.sales_lc,
            ending_stock_fc: ending.fc,
            weighted_avg_rate,
            ending_stock_lc: ending.lc,
            profit_loss_lc: (ending.lc + totals.sales_lc) - (opening.lc + totals.purchases_lc),
            transaction_count: totals.count,
        })
    }

    /// Reconstructs the stock position strictly before `before`.
    ///
    /// Starts from the configured opening balance (the period-zero anchor;
    /// zero for the all-branches aggregate, whose anchors are per branch)
    /// and replays prior accounting days in order, each day carried at its
    /// own weighted-average cost, matching the figures a daily mutation
    /// record for the preceding day would have ended with.
    fn opening_position(
        &self,
        scope: BranchScope,
        currency: &CurrencyCode,
        before: DateTime<Utc>,
    ) -> Position {
        let configured = scope
            .branch_id()
            .and_then(|branch| self.branches.opening_balance(branch, currency));
        let mut position = configured.map_or_else(Position::default, |balance| Position {
            fc: balance.foreign,
            lc: balance.local,
        });

        let mut days: BTreeMap<NaiveDate, WindowTotals> = BTreeMap::new();
        for transaction in self
            .store
            .find_in_range(scope, DateTime::<Utc>::MIN_UTC, before)
            .iter()
            .filter(|t| &t.currency == currency)
        {
            days.entry(transaction.accounting_date)
                .or_default()
                .add(transaction);
        }
        for totals in days.into_values() {
            (position, _) = apply_window(position, totals);
        }
        position
    }
}
