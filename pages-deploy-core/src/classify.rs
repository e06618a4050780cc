//! Branch policy: which branches publish, and where.

use serde::{Deserialize, Serialize};

/// Branch name whose version directory is renamed; its plain name is
/// reserved for the stable root.
const RESERVED_BRANCH: &str = "master";

/// Directory a version build of the reserved branch publishes under.
const RESERVED_BRANCH_DIR: &str = "wip";

/// How a source branch relates to the configured publishing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchClass {
    /// Deploys to the root of the deploy branch.
    Stable,
    /// Deploys to a dedicated subdirectory named after the branch.
    Version,
    /// Listed nowhere; never published.
    Unrecognized,
}

/// The configured stable branch and version-branch list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionPolicy {
    /// The single branch that deploys to the deploy-branch root.
    pub stable: String,
    /// Branches that each deploy to their own subdirectory.
    pub branches: Vec<String>,
}

impl VersionPolicy {
    /// Classify a branch against the policy. The stable name always wins,
    /// even when it is also listed under `branches`.
    pub fn classify(&self, branch: &str) -> BranchClass {
        if branch == self.stable {
            BranchClass::Stable
        } else if self.branches.iter().any(|b| b == branch) {
            BranchClass::Version
        } else {
            BranchClass::Unrecognized
        }
    }

    /// Version directory names in configuration order, rename applied.
    pub fn version_directories(&self) -> Vec<String> {
        self.branches
            .iter()
            .map(|b| directory_name(b).to_string())
            .collect()
    }
}

/// Directory a version branch publishes under. `master` is reserved for the
/// stable root, so its version output lives under `wip`.
pub fn directory_name(branch: &str) -> &str {
    if branch == RESERVED_BRANCH {
        RESERVED_BRANCH_DIR
    } else {
        branch
    }
}
