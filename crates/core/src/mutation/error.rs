//! Mutation engine error types.

use chrono::NaiveDate;
use thiserror::Error;
use valuta_shared::types::BranchId;

/// Errors that can occur when computing currency mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MutationError {
    /// Referenced branch does not exist.
    #[error("Branch not found: {0}")]
    BranchNotFound(BranchId),

    /// Range start falls after range end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested range start.
        start: NaiveDate,
        /// Requested range end.
        end: NaiveDate,
    },
}

impl MutationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BranchNotFound(_) => "BRANCH_NOT_FOUND",
            Self::InvalidRange { .. } => "INVALID_PERIOD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            MutationError::BranchNotFound(BranchId::new()).error_code(),
            "BRANCH_NOT_FOUND"
        );
        let start = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(
            MutationError::InvalidRange { start, end }.error_code(),
            "INVALID_PERIOD"
        );
    }
}
