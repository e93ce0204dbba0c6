//! Common types used across the application.

pub mod currency;
pub mod id;
pub mod money;
pub mod scope;

pub use currency::CurrencyCode;
pub use id::*;
pub use scope::BranchScope;
