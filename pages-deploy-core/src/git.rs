//! Git plumbing for the source checkout and the scratch deploy repository.
//!
//! Every operation is a single argv-array invocation through the
//! [`CommandRunner`] contract; output parsing is limited to trimming.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::contract::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::DeployError;

/// Remote name registered inside the scratch repository.
pub const DEPLOY_REMOTE: &str = "deploy";

/// Typed wrapper over git invocations in one working directory.
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    workdir: PathBuf,
}

impl<'a> Git<'a> {
    pub fn new<P: AsRef<Path>>(runner: &'a dyn CommandRunner, workdir: P) -> Self {
        Git {
            runner,
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    fn captured(&self, args: &[&str]) -> Result<CommandOutput, DeployError> {
        self.runner
            .run(&CommandSpec::captured("git", args).in_dir(&self.workdir))
            .map_err(|e| DeployError::Git(format!("failed to launch git: {e}")))
    }

    fn streamed(&self, args: &[&str]) -> Result<CommandOutput, DeployError> {
        self.runner
            .run(&CommandSpec::streamed("git", args).in_dir(&self.workdir))
            .map_err(|e| DeployError::Git(format!("failed to launch git: {e}")))
    }

    /// Run a command where anything but success is a pipeline failure.
    fn expect_success(&self, args: &[&str]) -> Result<(), DeployError> {
        let out = self.streamed(args)?;
        if out.success() {
            Ok(())
        } else {
            Err(DeployError::Git(format!(
                "git {} exited with status {}",
                args.first().copied().unwrap_or(""),
                out.code()
            )))
        }
    }

    /// Query a value, trimming the captured stdout.
    fn query(&self, args: &[&str], what: &str) -> Result<String, DeployError> {
        let out = self.captured(args)?;
        if !out.success() {
            return Err(DeployError::Git(format!(
                "querying {what} exited with status {}",
                out.code()
            )));
        }
        Ok(out.stdout.trim().to_string())
    }

    /// Branch the checkout currently has checked out. Yields `HEAD` when
    /// detached; callers decide whether that is acceptable.
    pub fn current_branch(&self) -> Result<String, DeployError> {
        self.query(&["rev-parse", "--abbrev-ref", "HEAD"], "current branch")
    }

    /// Short commit hash of HEAD, with a `+` suffix when the working tree is
    /// dirty.
    pub fn head_describe(&self) -> Result<String, DeployError> {
        let sha = self.query(&["rev-parse", "--short", "HEAD"], "HEAD commit")?;
        let porcelain = self.query(&["status", "--porcelain"], "working tree status")?;
        if porcelain.is_empty() {
            Ok(sha)
        } else {
            Ok(format!("{sha}+"))
        }
    }

    /// URL of the `origin` remote.
    pub fn origin_url(&self) -> Result<String, DeployError> {
        self.query(&["config", "--get", "remote.origin.url"], "origin URL")
    }

    pub fn init(&self) -> Result<(), DeployError> {
        self.expect_success(&["init"])
    }

    pub fn set_identity(&self, name: &str, email: &str) -> Result<(), DeployError> {
        self.expect_success(&["config", "user.name", name])?;
        self.expect_success(&["config", "user.email", email])
    }

    pub fn add_remote(&self, name: &str, url: &str) -> Result<(), DeployError> {
        self.expect_success(&["remote", "add", name, url])
    }

    /// Shallow fetch of one branch. Non-zero exit is returned to the caller,
    /// which maps it to the dedicated fetch-failure status.
    pub fn fetch_shallow(&self, remote: &str, branch: &str) -> Result<CommandOutput, DeployError> {
        self.streamed(&["fetch", "--depth", "1", remote, branch])
    }

    /// Mixed reset to `target`: moves HEAD and index, leaves the freshly
    /// built working tree in place so it shows up as changes.
    pub fn reset_to(&self, target: &str) -> Result<(), DeployError> {
        self.expect_success(&["reset", target])
    }

    /// Restore `path` from `target`, discarding local changes to it. Reports
    /// whether git accepted the pathspec; a path absent from `target` is the
    /// caller's call, not a pipeline failure.
    pub fn restore_path(&self, target: &str, path: &str) -> Result<bool, DeployError> {
        let out = self.streamed(&["checkout", target, "--", path])?;
        debug!(path, status = out.code(), "Restored path from deploy tip");
        Ok(out.success())
    }

    pub fn stage_all(&self) -> Result<(), DeployError> {
        self.expect_success(&["add", "--all", "."])
    }

    pub fn stage_path(&self, path: &str) -> Result<(), DeployError> {
        self.expect_success(&["add", "--all", path])
    }

    /// Commit staged changes. `Ok(false)` means git refused the commit,
    /// commonly because there was nothing to commit.
    pub fn commit(&self, message: &str) -> Result<bool, DeployError> {
        let out = self.streamed(&["commit", "-m", message])?;
        Ok(out.success())
    }

    pub fn push(&self, remote: &str, refspec: &str) -> Result<(), DeployError> {
        self.expect_success(&["push", remote, refspec])
    }
}

/// Rewrite an http(s) remote URL to its SSH form so an authorized deploy key
/// can authenticate. Already-SSH URLs pass through unchanged.
pub fn ssh_remote_url(url: &str) -> String {
    let trimmed = url.trim();
    let rest = match trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return trimmed.to_string(),
    };
    match rest.split_once('/') {
        Some((host, path)) => {
            let path = path.trim_end_matches('/');
            if path.ends_with(".git") {
                format!("git@{host}:{path}")
            } else {
                format!("git@{host}:{path}.git")
            }
        }
        None => trimmed.to_string(),
    }
}
