//! Regulatory reporting error types.

use thiserror::Error;
use valuta_shared::types::CustomerId;

use crate::calendar::CalendarError;

/// Errors that can occur in draft generation and period locking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegulatoryError {
    /// Malformed period (bad quarter or year); rejected before any store
    /// access.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// The period is already locked; terminal, not retryable.
    #[error("Reporting period {year} Q{quarter} is already locked")]
    AlreadyLocked {
        /// Year of the rejected lock.
        year: i32,
        /// Quarter of the rejected lock.
        quarter: u8,
    },

    /// Locking a period with no reportable customers; may succeed later
    /// once transactions exist.
    #[error("Reporting period {year} Q{quarter} has no reportable customers")]
    EmptyPeriod {
        /// Year of the rejected lock.
        year: i32,
        /// Quarter of the rejected lock.
        quarter: u8,
    },

    /// A transaction references a customer the directory does not know.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),
}

impl RegulatoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Calendar(inner) => inner.error_code(),
            Self::AlreadyLocked { .. } => "ALREADY_LOCKED",
            Self::EmptyPeriod { .. } => "EMPTY_PERIOD",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
        }
    }

    /// Returns true if this error can clear up on retry with no operator
    /// intervention.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::EmptyPeriod { .. })
    }
}
