//! Calendar error types.

use thiserror::Error;

/// Errors that can occur when deriving accounting periods.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// Quarter number outside 1..=4.
    #[error("Invalid quarter: {quarter} (expected 1-4)")]
    InvalidPeriod {
        /// The rejected quarter number.
        quarter: u8,
    },

    /// Year outside the representable calendar range.
    #[error("Invalid year: {year}")]
    InvalidDate {
        /// The rejected year.
        year: i32,
    },

    /// UTC offset outside the representable range.
    #[error("Invalid UTC offset: {hours} hours")]
    InvalidOffset {
        /// The rejected offset, in hours.
        hours: i32,
    },
}

impl CalendarError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::InvalidOffset { .. } => "INVALID_OFFSET",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalendarError::InvalidPeriod { quarter: 5 }.error_code(),
            "INVALID_PERIOD"
        );
        assert_eq!(
            CalendarError::InvalidDate { year: 300_000 }.error_code(),
            "INVALID_DATE"
        );
        assert_eq!(
            CalendarError::InvalidOffset { hours: 25 }.error_code(),
            "INVALID_OFFSET"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CalendarError::InvalidPeriod { quarter: 0 }.to_string(),
            "Invalid quarter: 0 (expected 1-4)"
        );
    }
}
