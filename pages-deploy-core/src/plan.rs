//! Output-path and baseurl planning for a classified branch.

use std::path::PathBuf;

use crate::classify::{directory_name, BranchClass};

/// Root of the generated site, relative to the source checkout. Doubles as
/// the scratch-repository worktree during deploy.
pub const OUTPUT_ROOT: &str = "_site";

/// Where a build lands and which baseurl it is generated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPlan {
    /// Deploy-branch worktree root.
    pub output_root: PathBuf,
    /// Directory the generator writes into; equals `output_root` for stable.
    pub output_dir: PathBuf,
    /// Branch directory under the deploy root; `None` for stable.
    pub subdirectory: Option<String>,
    /// Baseurl the site is generated against.
    pub base_url: String,
}

/// Compute the plan for a stable or version branch. Unrecognized branches
/// never deploy and have no plan.
pub fn plan(class: BranchClass, branch: &str, root_base_url: &str) -> Option<PathPlan> {
    let root = root_base_url.trim_end_matches('/');
    let output_root = PathBuf::from(OUTPUT_ROOT);
    match class {
        BranchClass::Stable => Some(PathPlan {
            output_dir: output_root.clone(),
            output_root,
            subdirectory: None,
            base_url: root.to_string(),
        }),
        BranchClass::Version => {
            let dir = directory_name(branch);
            Some(PathPlan {
                output_dir: output_root.join(dir),
                output_root,
                subdirectory: Some(dir.to_string()),
                base_url: format!("{root}/{dir}"),
            })
        }
        BranchClass::Unrecognized => None,
    }
}
