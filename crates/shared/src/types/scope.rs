//! Branch scoping for queries and reports.

use serde::{Deserialize, Serialize};

use super::id::BranchId;

/// Scope of a mutation or regulatory query: one branch, or the whole
/// organization.
///
/// Modeled as a tagged variant so an "all branches" aggregate can never be
/// confused with a missing branch filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchScope {
    /// Aggregate across every branch.
    AllBranches,
    /// A single branch.
    Branch(BranchId),
}

impl BranchScope {
    /// Returns true if the given branch falls within this scope.
    #[must_use]
    pub fn contains(&self, branch: BranchId) -> bool {
        match self {
            Self::AllBranches => true,
            Self::Branch(id) => *id == branch,
        }
    }

    /// Returns the concrete branch id, if the scope names one.
    #[must_use]
    pub const fn branch_id(&self) -> Option<BranchId> {
        match self {
            Self::AllBranches => None,
            Self::Branch(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_branches_contains_everything() {
        let branch = BranchId::new();
        assert!(BranchScope::AllBranches.contains(branch));
        assert_eq!(BranchScope::AllBranches.branch_id(), None);
    }

    #[test]
    fn test_single_branch_scope() {
        let a = BranchId::new();
        let b = BranchId::new();
        let scope = BranchScope::Branch(a);
        assert!(scope.contains(a));
        assert!(!scope.contains(b));
        assert_eq!(scope.branch_id(), Some(a));
    }
}
