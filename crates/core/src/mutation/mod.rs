//! Per-currency stock mutation engine.
//!
//! For a branch scope, a currency and a span of accounting dates this module
//! computes opening stock, purchase and sale totals, weighted-average cost
//! basis, ending stock and realized profit/loss. Records are derived, never
//! authored: every figure is reconstructible from the transaction log plus
//! the configured opening balances, and recomputation is deterministic.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::MutationError;
pub use service::MutationCalculator;
pub use types::{CurrencyMutation, DateRange};
