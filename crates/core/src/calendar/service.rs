//! Accounting date and period derivation.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use valuta_shared::config::CalendarConfig;

use super::error::CalendarError;

const SECS_PER_HOUR: i32 = 3600;

/// Maps wall-clock instants to local accounting dates and back.
///
/// The calendar runs on a fixed local offset (no daylight saving): an
/// accounting day is the half-open instant range
/// `[local midnight, local midnight + 24h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountingCalendar {
    offset: FixedOffset,
}

impl AccountingCalendar {
    /// Creates a calendar with the given fixed offset from UTC.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] when the offset is not a
    /// representable timezone offset.
    pub fn new(utc_offset_hours: i32) -> Result<Self, CalendarError> {
        let offset = utc_offset_hours
            .checked_mul(SECS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .ok_or(CalendarError::InvalidOffset {
                hours: utc_offset_hours,
            })?;
        Ok(Self { offset })
    }

    /// Creates a calendar from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] for an unrepresentable offset.
    pub fn from_config(config: &CalendarConfig) -> Result<Self, CalendarError> {
        Self::new(config.utc_offset_hours)
    }

    /// Returns the local accounting date a wall-clock instant belongs to.
    #[must_use]
    pub fn accounting_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Returns the UTC half-open instant range `[start, end)` covering one
    /// accounting date.
    #[must_use]
    pub fn utc_range_of(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let local_midnight = date.and_time(NaiveTime::MIN);
        let start =
            (local_midnight - Duration::seconds(i64::from(self.offset.local_minus_utc()))).and_utc();
        (start, start + Duration::days(1))
    }

    /// Returns the UTC half-open instant range covering an inclusive span of
    /// accounting dates.
    #[must_use]
    pub fn utc_range_of_span(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, _) = self.utc_range_of(first);
        let (_, end) = self.utc_range_of(last);
        (start, end)
    }

    /// Returns the inclusive first and last accounting dates of a calendar
    /// quarter (quarter 1 = January through March, and so on).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidPeriod`] when `quarter` is outside
    /// 1..=4, before any store access, and [`CalendarError::InvalidDate`]
    /// when `year` falls outside the representable calendar range.
    pub fn quarter_range_of(
        year: i32,
        quarter: u8,
    ) -> Result<(NaiveDate, NaiveDate), CalendarError> {
        if !(1..=4).contains(&quarter) {
            return Err(CalendarError::InvalidPeriod { quarter });
        }
        let first_month = u32::from(quarter - 1) * 3 + 1;
        let first = NaiveDate::from_ymd_opt(year, first_month, 1)
            .ok_or(CalendarError::InvalidDate { year })?;
        // Last day of the quarter: day before the first of the next quarter.
        let last = if quarter == 4 {
            NaiveDate::from_ymd_opt(year, 12, 31).ok_or(CalendarError::InvalidDate { year })?
        } else {
            NaiveDate::from_ymd_opt(year, first_month + 3, 1)
                .and_then(|d| d.pred_opt())
                .ok_or(CalendarError::InvalidDate { year })?
        };
        Ok((first, last))
    }

    /// Returns the quarter (1-4) an accounting date falls in.
    #[must_use]
    pub fn quarter_of(date: NaiveDate) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let quarter = ((date.month() - 1) / 3 + 1) as u8;
        quarter
    }
}
