//! Quarterly regulatory reporting and the report-once lock.
//!
//! Each (branch scope, year, quarter) reporting period starts as a virtual
//! draft, recomputed from the transaction log on every query, and can be
//! locked exactly once. Locking freezes the customer list and the report
//! rows permanently; a customer reported in a locked quarter never appears
//! again in a later quarter of the same year and scope.

pub mod error;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;


pub use error::RegulatoryError;
pub use memory::MemoryReportingPeriodStore;
pub use service::RegulatoryService;
pub use store::ReportingPeriodStore;
pub use types::{
    LockedPeriod, PeriodState, QuarterLockInfo, QuarterReport, ReportRow, ReportSummary,
    ReportingPeriodKey,
};
