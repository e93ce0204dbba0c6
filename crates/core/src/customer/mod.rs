//! Customer directory contract.
//!
//! Customer CRUD lives outside the core; regulatory reporting only needs
//! read access to profiles, exposed behind the [`CustomerDirectory`] trait.

pub mod directory;
pub mod types;

pub use directory::{CustomerDirectory, MemoryCustomerDirectory};
pub use types::{CustomerProfile, EntityDetail, IndividualDetail, LegalDetail, LegalKind};
