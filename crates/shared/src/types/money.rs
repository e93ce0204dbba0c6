//! Monetary rounding rules.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; internal accumulation stays
//! exact and these helpers are applied only at record-creation and
//! presentation boundaries, so rounding error never compounds across days.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Decimal places kept for foreign-currency amounts.
pub const FOREIGN_DP: u32 = 2;

/// Decimal places kept for local-currency amounts (whole rupiah).
pub const LOCAL_DP: u32 = 0;

/// Decimal places kept for exchange rates and average rates.
pub const RATE_DP: u32 = 2;

/// Rounds a foreign-currency amount half-up to [`FOREIGN_DP`] places.
#[must_use]
pub fn round_foreign(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(FOREIGN_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a local-currency amount half-up to [`LOCAL_DP`] places.
#[must_use]
pub fn round_local(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(LOCAL_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an exchange rate half-up to [`RATE_DP`] places.
#[must_use]
pub fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_foreign_half_up() {
        assert_eq!(round_foreign(dec!(10.005)), dec!(10.01));
        assert_eq!(round_foreign(dec!(10.004)), dec!(10.00));
        assert_eq!(round_foreign(dec!(-10.005)), dec!(-10.01));
    }

    #[test]
    fn test_round_local_to_whole_units() {
        assert_eq!(round_local(dec!(158255.275)), dec!(158255));
        assert_eq!(round_local(dec!(158255.5)), dec!(158256));
        assert_eq!(round_local(dec!(4650000)), dec!(4650000));
    }

    #[test]
    fn test_round_rate() {
        // 22,600,000 / 1,500 = 15,066.666... -> 15,066.67
        let rate = dec!(22600000) / dec!(1500);
        assert_eq!(round_rate(rate), dec!(15066.67));
    }

    #[test]
    fn test_half_up_not_bankers() {
        // Banker's rounding would give 2; the ledger mandates half-up.
        assert_eq!(round_local(dec!(2.5)), dec!(3));
        assert_eq!(round_local(dec!(3.5)), dec!(4));
    }
}
