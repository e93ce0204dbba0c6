//! Transaction domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use valuta_shared::types::money::round_local;
use valuta_shared::types::{BranchId, CurrencyCode, CustomerId, TransactionId, UserId};

/// Direction of a transaction, from the money changer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The system buys foreign currency from the customer.
    Buy,
    /// The system sells foreign currency to the customer.
    Sell,
}

/// Audit metadata recorded when a transaction is soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionInfo {
    /// User who deleted the transaction.
    pub deleted_by: UserId,
    /// When the deletion happened.
    pub deleted_at: DateTime<Utc>,
}

/// An immutable buy/sell event.
///
/// `local_amount` is always `foreign_amount * exchange_rate` rounded to the
/// local precision; it is computed at creation and never settable on its
/// own. `accounting_date` is likewise derived once from
/// `transaction_instant` and stored, so later calendar changes cannot
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Human-readable transaction number.
    pub number: String,
    /// Optional free-text voucher number used to batch related entries.
    pub voucher_number: Option<String>,
    /// Customer involved in the exchange.
    pub customer_id: CustomerId,
    /// Branch the transaction was booked at.
    pub branch_id: BranchId,
    /// Foreign currency exchanged.
    pub currency: CurrencyCode,
    /// Buy or sell, from the system's point of view.
    pub direction: Direction,
    /// Amount in foreign-currency units.
    pub foreign_amount: Decimal,
    /// Exchange rate, local currency per foreign unit.
    pub exchange_rate: Decimal,
    /// Local-currency value: `foreign_amount * exchange_rate`, rounded.
    pub local_amount: Decimal,
    /// Business-effective timestamp; defaults to creation time, may be
    /// backdated.
    pub transaction_instant: DateTime<Utc>,
    /// Local accounting date derived from `transaction_instant` at creation.
    pub accounting_date: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Payment method used to settle the local side.
    pub payment_method: Option<String>,
    /// Customer-stated purpose of the transaction.
    pub transaction_purpose: Option<String>,
    /// User who recorded the transaction.
    pub created_by: UserId,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// Deletion metadata; `Some` means the transaction is excluded from all
    /// computations but kept for audit.
    pub deletion: Option<DeletionInfo>,
}

impl Transaction {
    /// Returns true if the transaction has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deletion.is_some()
    }
}

/// Computes the local-currency value of a transaction leg.
#[must_use]
pub fn local_amount_of(foreign_amount: Decimal, exchange_rate: Decimal) -> Decimal {
    round_local(foreign_amount * exchange_rate)
}

/// Input for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Customer involved in the exchange.
    pub customer_id: CustomerId,
    /// Foreign currency exchanged.
    pub currency: CurrencyCode,
    /// Buy or sell, from the system's point of view.
    pub direction: Direction,
    /// Amount in foreign-currency units.
    pub foreign_amount: Decimal,
    /// Exchange rate, local currency per foreign unit.
    pub exchange_rate: Decimal,
    /// Optional voucher number.
    pub voucher_number: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Payment method used to settle the local side.
    pub payment_method: Option<String>,
    /// Customer-stated purpose of the transaction.
    pub transaction_purpose: Option<String>,
    /// Business-effective timestamp; `None` means "now".
    pub transaction_instant: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_local_amount_is_product_rounded() {
        assert_eq!(local_amount_of(dec!(300), dec!(15500)), dec!(4650000));
        // 10.55 * 15000.5 = 158255.275 -> whole local units, half-up
        assert_eq!(local_amount_of(dec!(10.55), dec!(15000.5)), dec!(158255));
        assert_eq!(local_amount_of(dec!(0.1), dec!(15005)), dec!(1501));
    }
}
