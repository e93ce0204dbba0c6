//! Customer profile types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use valuta_shared::types::{BranchId, CustomerId};

/// Legal classification of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalKind {
    /// Natural person.
    Individual,
    /// Business entity.
    Entity,
}

/// Identity fields for a natural-person customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualDetail {
    /// Full name as printed on the identity document.
    pub name: String,
    /// Identity document type (national ID, passport, ...).
    pub identity_type: String,
    /// Identity document number.
    pub identity_number: String,
    /// Place of birth.
    pub birth_place: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Registered address.
    pub address: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Stated occupation.
    pub occupation: Option<String>,
}

/// Identity fields for a business-entity customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDetail {
    /// Registered entity name.
    pub entity_name: String,
    /// Legal form of the entity.
    pub entity_type: String,
    /// Business license number.
    pub license_number: String,
    /// Tax registration number.
    pub tax_number: Option<String>,
    /// Registered address.
    pub address: String,
    /// Person in charge named on the account.
    pub pic_name: Option<String>,
}

/// Legal-type-specific part of a customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "legal_kind", rename_all = "snake_case")]
pub enum LegalDetail {
    /// Natural person.
    Individual(IndividualDetail),
    /// Business entity.
    Entity(EntityDetail),
}

/// A customer as seen by the reporting core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Unique identifier.
    pub id: CustomerId,
    /// Human-readable customer code.
    pub customer_code: String,
    /// Branch the customer is registered at.
    pub branch_id: BranchId,
    /// Legal-type-specific identity fields.
    pub detail: LegalDetail,
}

impl CustomerProfile {
    /// Returns the customer's legal classification.
    #[must_use]
    pub const fn legal_kind(&self) -> LegalKind {
        match self.detail {
            LegalDetail::Individual(_) => LegalKind::Individual,
            LegalDetail::Entity(_) => LegalKind::Entity,
        }
    }

    /// Returns the name used on reports.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.detail {
            LegalDetail::Individual(d) => &d.name,
            LegalDetail::Entity(d) => &d.entity_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_kind_and_display_name() {
        let individual = CustomerProfile {
            id: CustomerId::new(),
            customer_code: "VLT00000001".to_string(),
            branch_id: BranchId::new(),
            detail: LegalDetail::Individual(IndividualDetail {
                name: "Siti Rahayu".to_string(),
                identity_type: "KTP".to_string(),
                identity_number: "3174050901880002".to_string(),
                birth_place: None,
                birth_date: None,
                address: "Jl. Sudirman 1".to_string(),
                phone: None,
                occupation: None,
            }),
        };
        assert_eq!(individual.legal_kind(), LegalKind::Individual);
        assert_eq!(individual.display_name(), "Siti Rahayu");

        let entity = CustomerProfile {
            id: CustomerId::new(),
            customer_code: "VLT00000002".to_string(),
            branch_id: BranchId::new(),
            detail: LegalDetail::Entity(EntityDetail {
                entity_name: "PT Sentosa Abadi".to_string(),
                entity_type: "PT".to_string(),
                license_number: "LIC-1234".to_string(),
                tax_number: Some("01.234.567.8-901.000".to_string()),
                address: "Jl. Thamrin 10".to_string(),
                pic_name: Some("Budi".to_string()),
            }),
        };
        assert_eq!(entity.legal_kind(), LegalKind::Entity);
        assert_eq!(entity.display_name(), "PT Sentosa Abadi");
    }
}
