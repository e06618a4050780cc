//! Process-environment snapshot. Read once at startup and passed explicitly;
//! nothing downstream reads the ambient environment.

use std::env;

use tracing::debug;

/// Marks an automated build environment. Any non-empty value counts.
pub const CI_VAR: &str = "CI";

/// Overrides the branch detected from the source checkout.
pub const BRANCH_VAR: &str = "BRANCH";

/// Committer name for deploy commits.
pub const GIT_NAME_VAR: &str = "GIT_NAME";

/// Committer email for deploy commits.
pub const GIT_EMAIL_VAR: &str = "GIT_EMAIL";

/// Overrides the branch the site is published to.
pub const DEPLOY_BRANCH_VAR: &str = "DEPLOY_BRANCH";

const DEFAULT_DEPLOY_BRANCH: &str = "gh-pages";
const DEFAULT_GIT_NAME: &str = "pages-deploy";
const DEFAULT_GIT_EMAIL: &str = "pages-deploy@localhost";

/// Everything this tool reads from the environment.
#[derive(Debug, Clone)]
pub struct EnvInfo {
    /// Running under automation; deploys are refused without it.
    pub ci: bool,
    /// Branch name supplied by the CI system, if any.
    pub branch_override: Option<String>,
    /// Committer identity for the scratch repository.
    pub git_name: String,
    pub git_email: String,
    /// Branch the site is published to.
    pub deploy_branch: String,
}

impl EnvInfo {
    /// Snapshot the variables this tool reads.
    pub fn from_env() -> Self {
        let info = EnvInfo {
            ci: env::var(CI_VAR).map(|v| !v.is_empty()).unwrap_or(false),
            branch_override: non_empty(BRANCH_VAR),
            git_name: non_empty(GIT_NAME_VAR).unwrap_or_else(|| DEFAULT_GIT_NAME.to_string()),
            git_email: non_empty(GIT_EMAIL_VAR).unwrap_or_else(|| DEFAULT_GIT_EMAIL.to_string()),
            deploy_branch: non_empty(DEPLOY_BRANCH_VAR)
                .unwrap_or_else(|| DEFAULT_DEPLOY_BRANCH.to_string()),
        };
        debug!(?info, "Environment snapshot");
        info
    }
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}
