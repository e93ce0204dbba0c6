//! Human-readable transaction numbering.
//!
//! Format: `TRX-<org>-<J|B>-<sequence>-<branchcode>-<DDMMYY>` where `J`
//! marks a sale to the customer and `B` a purchase from the customer, the
//! sequence counts same-accounting-day transactions across the whole system
//! (not per branch), and the date suffix is the accounting date rather than
//! the wall-clock date.
//!
//! The number is cosmetic: uniqueness is guaranteed by the transaction id,
//! so a sequence collision between two concurrent creations is tolerated.

use chrono::NaiveDate;

use super::types::Direction;

/// Zero-padded width of the daily sequence number.
const SEQUENCE_WIDTH: usize = 5;

/// Width the branch code is truncated to.
const BRANCH_CODE_WIDTH: usize = 3;

/// Fallback when a branch has no usable code.
const BRANCH_CODE_FALLBACK: &str = "00";

/// Returns the direction letter used in transaction numbers.
#[must_use]
pub const fn direction_letter(direction: Direction) -> char {
    match direction {
        Direction::Sell => 'J',
        Direction::Buy => 'B',
    }
}

/// Derives the number's branch segment from a configured branch code.
///
/// Takes the first segment before a `-`, `/` or whitespace separator,
/// truncated to three characters and upper-cased; `"00"` when the branch
/// has no usable code.
#[must_use]
pub fn branch_code_segment(raw: Option<&str>) -> String {
    let segment = raw
        .unwrap_or_default()
        .split(['-', '/', ' '])
        .next()
        .unwrap_or_default()
        .trim();
    if segment.is_empty() {
        return BRANCH_CODE_FALLBACK.to_string();
    }
    segment
        .chars()
        .take(BRANCH_CODE_WIDTH)
        .collect::<String>()
        .to_uppercase()
}

/// Formats a transaction number.
#[must_use]
pub fn format_transaction_number(
    org_code: &str,
    direction: Direction,
    sequence: u64,
    branch_segment: &str,
    accounting_date: NaiveDate,
) -> String {
    format!(
        "TRX-{org_code}-{letter}-{sequence:0width$}-{branch_segment}-{date}",
        letter = direction_letter(direction),
        width = SEQUENCE_WIDTH,
        date = accounting_date.format("%d%m%y"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format() {
        assert_eq!(
            format_transaction_number("VLT", Direction::Sell, 1, "HQ", date(2024, 3, 5)),
            "TRX-VLT-J-00001-HQ-050324"
        );
        assert_eq!(
            format_transaction_number("VLT", Direction::Buy, 123, "KCP", date(2024, 12, 31)),
            "TRX-VLT-B-00123-KCP-311224"
        );
    }

    #[test]
    fn test_sequence_padding_overflows_gracefully() {
        let number =
            format_transaction_number("VLT", Direction::Buy, 123_456, "KCP", date(2024, 1, 1));
        assert_eq!(number, "TRX-VLT-B-123456-KCP-010124");
    }

    #[test]
    fn test_branch_code_segment() {
        assert_eq!(branch_code_segment(Some("hq-jakarta")), "HQ");
        assert_eq!(branch_code_segment(Some("KCP01/SBY")), "KCP");
        assert_eq!(branch_code_segment(Some("medan utara")), "MED");
        assert_eq!(branch_code_segment(Some("BALIKPAPAN")), "BAL");
        assert_eq!(branch_code_segment(Some("")), "00");
        assert_eq!(branch_code_segment(None), "00");
    }

    #[test]
    fn test_date_suffix_is_accounting_date() {
        // The caller passes the accounting date; a transaction booked late at
        // night UTC but after local midnight carries the local day.
        let number =
            format_transaction_number("VLT", Direction::Sell, 7, "HQ", date(2024, 4, 1));
        assert!(number.ends_with("-010424"));
    }
}
