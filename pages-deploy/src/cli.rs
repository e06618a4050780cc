//! CLI glue for pages-deploy: argument parsing and run orchestration.
//!
//! All pipeline logic (classification, planning, the deploy sequence) lives
//! in the `pages-deploy-core` crate; this module maps arguments and the
//! loaded settings into a [`DeployContext`] and the result back into a
//! process exit status.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pages_deploy_core::deploy::{self, DeployContext, DeploySettings, Outcome};
use pages_deploy_core::environment::EnvInfo;
use pages_deploy_core::error::DeployError;
use pages_deploy_core::exec::SystemRunner;

use crate::load_config::load_config;

/// CLI for pages-deploy: build and publish versioned documentation sites.
#[derive(Parser)]
#[clap(
    name = "pages-deploy",
    version,
    about = "Build a static documentation site and publish it to a deploy branch, one subdirectory per version branch"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the site for the current branch and push it to the deploy branch
    Deploy {
        /// Path to the primary site settings file, relative to the source dir
        #[clap(long, default_value = "_config.yml")]
        config: PathBuf,

        /// Path to the synthesized deploy settings file
        #[clap(long, default_value = "_config_deploy.yml")]
        deploy_config: PathBuf,

        /// Source checkout to operate in
        #[clap(long, default_value = ".")]
        source_dir: PathBuf,
    },
}

/// CLI entrypoint, also used by integration tests. The caller maps the
/// result to the process exit status.
pub fn run(cli: Cli) -> Result<Outcome, DeployError> {
    match cli.command {
        Commands::Deploy {
            config,
            deploy_config,
            source_dir,
        } => {
            let site = load_config(source_dir.join(&config))
                .map_err(|e| DeployError::Config(format!("{e:#}")))?;

            let settings = DeploySettings {
                source_dir,
                primary_config: config,
                secondary_config: deploy_config,
                policy: site.policy,
                root_base_url: site.root_base_url,
                generator: site.generator,
            };
            settings.trace_loaded();

            let runner = SystemRunner;
            let ctx = DeployContext {
                runner: &runner,
                env: EnvInfo::from_env(),
                settings,
            };
            let outcome = deploy::run(&ctx)?;
            match &outcome {
                Outcome::Published {
                    branch,
                    subdirectory,
                } => {
                    tracing::info!(branch = %branch, subdirectory = ?subdirectory, "Deploy complete")
                }
                Outcome::NothingToPublish { branch } => {
                    tracing::info!(branch = %branch, "Deploy complete; nothing to publish")
                }
                Outcome::DryRunValidated { branch, status } => {
                    tracing::info!(branch = %branch, status = status, "Dry build complete")
                }
            }
            Ok(outcome)
        }
    }
}
