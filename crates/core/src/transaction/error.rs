//! Transaction error types.

use thiserror::Error;
use valuta_shared::types::{BranchId, CustomerId, TransactionId};

/// Errors that can occur when recording transactions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Referenced branch does not exist.
    #[error("Branch not found: {0}")]
    BranchNotFound(BranchId),

    /// Referenced transaction does not exist.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Foreign amount must be positive.
    #[error("Foreign amount must be positive")]
    NonPositiveAmount,

    /// Exchange rate must be positive.
    #[error("Exchange rate must be positive")]
    NonPositiveRate,
}

impl TransactionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::BranchNotFound(_) => "BRANCH_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::NonPositiveRate => "NON_POSITIVE_RATE",
        }
    }
}
