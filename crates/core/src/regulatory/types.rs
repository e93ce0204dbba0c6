//! Regulatory reporting types.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use valuta_shared::types::{BranchScope, CustomerId, UserId};

use crate::customer::types::{CustomerProfile, LegalDetail, LegalKind};

/// Compound key of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingPeriodKey {
    /// Branch scope the report covers.
    pub scope: BranchScope,
    /// Calendar year.
    pub year: i32,
    /// Quarter, 1-4.
    pub quarter: u8,
}

/// One customer row of a quarterly report, flattened the way the regulator
/// file expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Regulator-assigned operator id of the reporting institution.
    pub operator_id: String,
    /// Customer being reported.
    pub customer_id: CustomerId,
    /// Human-readable customer code.
    pub customer_code: String,
    /// Legal classification driving which fields are filled.
    pub legal_kind: LegalKind,
    /// Customer or entity name.
    pub name: String,
    /// Identity document type (individuals).
    pub identity_type: Option<String>,
    /// Identity document number (individuals).
    pub identity_number: Option<String>,
    /// Place of birth (individuals).
    pub birth_place: Option<String>,
    /// Date of birth (individuals).
    pub birth_date: Option<NaiveDate>,
    /// Business license number (entities).
    pub license_number: Option<String>,
    /// Tax registration number (entities).
    pub tax_number: Option<String>,
    /// Registered address.
    pub address: String,
}

impl ReportRow {
    /// Builds a report row from a customer profile and the configured
    /// operator id.
    #[must_use]
    pub fn from_profile(operator_id: &str, profile: &CustomerProfile) -> Self {
        let base = Self {
            operator_id: operator_id.to_string(),
            customer_id: profile.id,
            customer_code: profile.customer_code.clone(),
            legal_kind: profile.legal_kind(),
            name: profile.display_name().to_string(),
            identity_type: None,
            identity_number: None,
            birth_place: None,
            birth_date: None,
            license_number: None,
            tax_number: None,
            address: String::new(),
        };
        match &profile.detail {
            LegalDetail::Individual(d) => Self {
                identity_type: Some(d.identity_type.clone()),
                identity_number: Some(d.identity_number.clone()),
                birth_place: d.birth_place.clone(),
                birth_date: d.birth_date,
                address: d.address.clone(),
                ..base
            },
            LegalDetail::Entity(d) => Self {
                license_number: Some(d.license_number.clone()),
                tax_number: d.tax_number.clone(),
                address: d.address.clone(),
                ..base
            },
        }
    }
}

/// Count summary of a quarterly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total customer rows.
    pub total: usize,
    /// Rows for natural persons.
    pub individuals: usize,
    /// Rows for business entities.
    pub entities: usize,
}

impl ReportSummary {
    /// Tallies a slice of report rows.
    #[must_use]
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let individuals = rows
            .iter()
            .filter(|r| r.legal_kind == LegalKind::Individual)
            .count();
        Self {
            total: rows.len(),
            individuals,
            entities: rows.len() - individuals,
        }
    }
}

/// The immutable payload persisted when a period is locked.
///
/// The customer id set and the row snapshot are always written together;
/// there is no partially-locked state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPeriod {
    /// Customers reported in this period; excluded from all later quarters
    /// of the same year and scope.
    pub reported_customer_ids: BTreeSet<CustomerId>,
    /// Frozen report rows, returned verbatim by every later query.
    pub rows: Vec<ReportRow>,
    /// User who locked the period.
    pub locked_by: UserId,
    /// When the period was locked.
    pub locked_at: DateTime<Utc>,
}

/// Lifecycle state of a reporting period.
///
/// Draft is virtual: no row exists until the one-and-only lock, so a
/// missing record and an unlocked record are the same thing by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeriodState {
    /// Not locked yet; contents are recomputed on every query.
    Draft,
    /// Locked; contents are frozen forever.
    Locked(LockedPeriod),
}

/// Lifecycle tag without the snapshot payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Not locked yet.
    Draft,
    /// Locked.
    Locked,
}

/// A quarterly report as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterReport {
    /// Customer rows.
    pub rows: Vec<ReportRow>,
    /// Count summary.
    pub summary: ReportSummary,
    /// Whether the rows are a live draft or a frozen snapshot.
    pub status: PeriodStatus,
}

/// Lock state of one quarter, for the compliance dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterLockInfo {
    /// Whether the quarter is locked.
    pub locked: bool,
    /// User who locked it.
    pub locked_by: Option<UserId>,
    /// When it was locked.
    pub locked_at: Option<DateTime<Utc>>,
    /// Number of customers in the frozen report.
    pub reported_customers: usize,
}
