//! Branch configuration.
//!
//! Branches are administered outside the core; the mutation engine only
//! needs their codes and per-currency opening balances, exposed behind the
//! [`BranchConfig`] trait.

pub mod memory;
pub mod types;

pub use memory::MemoryBranchConfig;
pub use types::{BranchConfig, OpeningBalance};
