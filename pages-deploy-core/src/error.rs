//! Failure taxonomy for a deploy run.
//!
//! Every fatal condition carries a distinct process exit status so CI
//! pipelines can tell policy aborts from tool failures.

use thiserror::Error;

/// Main error type for deploy runs.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Missing or invalid settings, or an unresolvable source branch.
    #[error("configuration error: {0}")]
    Config(String),

    /// Branch is neither stable nor a configured version, and the run is
    /// interactive. Under CI the same condition triggers a dry build instead.
    #[error("unrecognized branch '{0}'; refusing to build outside CI")]
    UnrecognizedBranch(String),

    /// The site generator could not be launched.
    #[error("could not launch the site generator: {0}")]
    GeneratorLaunch(String),

    /// The site generator ran and exited non-zero.
    #[error("site generator exited with status {0}")]
    BuildFailed(i32),

    /// Deploy attempted outside an automated environment.
    #[error("deploying is only allowed from a CI environment (set CI)")]
    GuardRejected,

    /// Shallow fetch of the deploy branch failed; the one step treated as
    /// possibly transient (network).
    #[error("could not fetch '{branch}' from the deploy remote (status {status})")]
    FetchFailed { branch: String, status: i32 },

    /// Any other git invocation failed.
    #[error("git: {0}")]
    Git(String),

    /// Filesystem failure while preparing the deploy tree.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The secondary settings file held YAML this tool cannot merge into.
    #[error("invalid YAML in {path}: {detail}")]
    Yaml { path: String, detail: String },
}

impl DeployError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::GeneratorLaunch(_) | DeployError::BuildFailed(_) => 3,
            DeployError::FetchFailed { .. } => 5,
            DeployError::UnrecognizedBranch(_) => 120,
            DeployError::GuardRejected => 128,
            DeployError::Config(_)
            | DeployError::Git(_)
            | DeployError::Io { .. }
            | DeployError::Yaml { .. } => 1,
        }
    }
}
