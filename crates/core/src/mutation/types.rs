//! Mutation record types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use valuta_shared::types::money::{round_foreign, round_local, round_rate};
use valuta_shared::types::CurrencyCode;

use super::error::MutationError;

/// Inclusive span of accounting dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::InvalidRange`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, MutationError> {
        if start > end {
            return Err(MutationError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range covering a single accounting date.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First accounting date in the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last accounting date in the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Stock mutation figures for one currency over one period.
///
/// All values are exact; rounding happens only through [`Self::rounded`] at
/// the presentation boundary, so figures never accumulate rounding drift
/// when periods chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyMutation {
    /// Currency the figures are for.
    pub currency: CurrencyCode,
    /// Opening stock, foreign units.
    pub opening_stock_fc: Decimal,
    /// Opening stock valuation, local currency.
    pub opening_stock_lc: Decimal,
    /// Purchases from customers, foreign units.
    pub purchases_fc: Decimal,
    /// Purchases from customers, local currency.
    pub purchases_lc: Decimal,
    /// Sales to customers, foreign units.
    pub sales_fc: Decimal,
    /// Sales to customers, local currency.
    pub sales_lc: Decimal,
    /// Ending stock: opening plus purchases minus sales, foreign units.
    pub ending_stock_fc: Decimal,
    /// Weighted-average cost per foreign unit; only acquisitions move it.
    pub weighted_avg_rate: Decimal,
    /// Ending stock carried at the weighted-average cost, local currency.
    pub ending_stock_lc: Decimal,
    /// Realized profit or loss on units sold, local currency.
    pub profit_loss_lc: Decimal,
    /// Number of transactions aggregated into this record.
    pub transaction_count: usize,
}

impl CurrencyMutation {
    /// Returns a presentation copy with every figure rounded half-up to its
    /// currency precision.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            currency: self.currency.clone(),
            opening_stock_fc: round_foreign(self.opening_stock_fc),
            opening_stock_lc: round_local(self.opening_stock_lc),
            purchases_fc: round_foreign(self.purchases_fc),
            purchases_lc: round_local(self.purchases_lc),
            sales_fc: round_foreign(self.sales_fc),
            sales_lc: round_local(self.sales_lc),
            ending_stock_fc: round_foreign(self.ending_stock_fc),
            weighted_avg_rate: round_rate(self.weighted_avg_rate),
            ending_stock_lc: round_local(self.ending_stock_lc),
            profit_loss_lc: round_local(self.profit_loss_lc),
            transaction_count: self.transaction_count,
        }
    }
}
