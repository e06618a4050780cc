//! Site generator invocation.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::contract::{CommandRunner, CommandSpec};
use crate::error::DeployError;

/// Default generator command, overridable through the primary settings file.
pub const DEFAULT_GENERATOR: &str = "jekyll";

/// One configured invocation of the static-site generator.
pub struct SiteBuilder<'a> {
    runner: &'a dyn CommandRunner,
    command: String,
    source_dir: PathBuf,
}

impl<'a> SiteBuilder<'a> {
    pub fn new<P: AsRef<Path>>(runner: &'a dyn CommandRunner, command: &str, source_dir: P) -> Self {
        SiteBuilder {
            runner,
            command: command.to_string(),
            source_dir: source_dir.as_ref().to_path_buf(),
        }
    }

    /// Build into `destination` against the given settings files, in order;
    /// the generator merges later files over earlier ones. Returns the
    /// generator's exit status.
    pub fn build(&self, destination: &Path, configs: &[&Path]) -> Result<i32, DeployError> {
        let destination = destination.display().to_string();
        let config_list = configs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        info!(
            command = %self.command,
            destination = %destination,
            configs = %config_list,
            "[DEPLOY] Building site"
        );
        let spec = CommandSpec::streamed(
            &self.command,
            &[
                "build",
                "--destination",
                destination.as_str(),
                "--config",
                config_list.as_str(),
            ],
        )
        .in_dir(&self.source_dir);
        let out = self.runner.run(&spec).map_err(|e| {
            error!(error = %e, command = %self.command, "[DEPLOY][ERROR] Could not launch the site generator");
            DeployError::GeneratorLaunch(e.to_string())
        })?;
        info!(status = out.code(), "[DEPLOY] Site generator finished");
        Ok(out.code())
    }
}
