//! Customer directory contract and in-memory backend.

use std::collections::HashMap;
use std::sync::RwLock;

use valuta_shared::types::CustomerId;

use super::types::CustomerProfile;

/// Read access to customer profiles.
pub trait CustomerDirectory: Send + Sync {
    /// Looks up a customer by id.
    fn get(&self, id: CustomerId) -> Option<CustomerProfile>;
}

/// In-memory [`CustomerDirectory`] backend for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryCustomerDirectory {
    customers: RwLock<HashMap<CustomerId, CustomerProfile>>,
}

impl MemoryCustomerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile.
    pub fn insert(&self, profile: CustomerProfile) {
        let mut customers = self
            .customers
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        customers.insert(profile.id, profile);
    }
}

impl CustomerDirectory for MemoryCustomerDirectory {
    fn get(&self, id: CustomerId) -> Option<CustomerProfile> {
        let customers = self
            .customers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        customers.get(&id).cloned()
    }
}
