//! Accounting calendar.
//!
//! Converts between wall-clock instants and local accounting dates, and
//! derives the date spans of quarterly reporting periods. Every "what day is
//! this transaction" question in the system goes through here; nothing else
//! may apply the local offset.

pub mod error;
pub mod service;

pub use error::CalendarError;
pub use service::AccountingCalendar;
