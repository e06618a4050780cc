//! High-level pipeline: resolve → classify → build → publish.
//!
//! This module drives one deploy run as a linear sequence of states with an
//! early-exit guard at every external-command boundary:
//!   - Resolves the source branch (environment override, else a git query)
//!   - Classifies it against the configured version policy
//!   - Synthesizes the secondary settings file and invokes the generator
//!   - Assembles and pushes the deploy commit from a scratch repository
//!     created inside the build output directory
//!
//! # Error Handling
//! Each failed step returns immediately with a typed [`DeployError`] whose
//! `exit_code` is the run's process status. An empty deploy commit is not an
//! error: the run ends in [`Outcome::NothingToPublish`] and the push is
//! skipped.
//!
//! # Navigation
//! - Main entrypoint: [`run`]
//! - Supporting types: [`DeploySettings`], [`DeployContext`], [`Outcome`]

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::build::SiteBuilder;
use crate::classify::{BranchClass, VersionPolicy};
use crate::contract::CommandRunner;
use crate::environment::EnvInfo;
use crate::error::DeployError;
use crate::git::{ssh_remote_url, Git, DEPLOY_REMOTE};
use crate::plan::{self, PathPlan, OUTPUT_ROOT};
use crate::synthesis::{self, ComputedSettings};

/// Sentinel telling the hosting platform not to run its own generator over
/// the deployed tree.
const MARKER_FILE: &str = ".nojekyll";

/// Everything a run needs, resolved by the caller before the pipeline starts.
#[derive(Debug)]
pub struct DeploySettings {
    /// Source checkout the run operates in.
    pub source_dir: PathBuf,
    /// Primary settings file handed to the generator, relative to the source
    /// checkout.
    pub primary_config: PathBuf,
    /// Secondary settings file this tool synthesizes each run.
    pub secondary_config: PathBuf,
    /// Stable/version branch policy from the primary settings file.
    pub policy: VersionPolicy,
    /// Root baseurl from the primary settings file.
    pub root_base_url: String,
    /// Generator command.
    pub generator: String,
}

impl DeploySettings {
    pub fn trace_loaded(&self) {
        info!(
            source_dir = %self.source_dir.display(),
            stable = %self.policy.stable,
            versions = ?self.policy.branches,
            generator = %self.generator,
            "Loaded deploy settings"
        );
        debug!(?self, "Deploy settings (full debug)");
    }
}

/// Execution context threaded through the pipeline steps.
pub struct DeployContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub env: EnvInfo,
    pub settings: DeploySettings,
}

/// Pipeline states, walked in order. Every abort is a typed error naming the
/// step it interrupted; these exist so the step sequence is explicit rather
/// than implied by early returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    BranchResolved,
    Classified,
    Built,
    GuardChecked,
    RemoteConfigured,
    Fetched,
    Reset,
    Staged,
    Committed,
    Pushed,
}

fn enter(state: RunState) {
    debug!(state = ?state, "[DEPLOY] state transition");
}

/// Terminal result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new deploy commit was pushed.
    Published {
        branch: String,
        /// Version subdirectory the branch published into; `None` for stable.
        subdirectory: Option<String>,
    },
    /// Nothing changed relative to the deployed tree; push skipped.
    NothingToPublish { branch: String },
    /// Unrecognized branch under CI: the build was validated but nothing was
    /// published. Carries the generator's own exit status.
    DryRunValidated { branch: String, status: i32 },
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::DryRunValidated { status, .. } => *status,
            _ => 0,
        }
    }
}

/// Drive one full deploy run.
pub fn run(ctx: &DeployContext) -> Result<Outcome, DeployError> {
    enter(RunState::Init);
    let source = Git::new(ctx.runner, &ctx.settings.source_dir);

    let branch = resolve_branch(ctx, &source)?;
    enter(RunState::BranchResolved);
    info!(branch = %branch, "[DEPLOY] Source branch resolved");

    let class = ctx.settings.policy.classify(&branch);
    enter(RunState::Classified);
    info!(class = ?class, branch = %branch, "[DEPLOY] Branch classified");

    let builder = SiteBuilder::new(ctx.runner, &ctx.settings.generator, &ctx.settings.source_dir);

    if class == BranchClass::Unrecognized {
        if !ctx.env.ci {
            warn!(branch = %branch, "[DEPLOY] Branch not in version policy and not under CI");
            return Err(DeployError::UnrecognizedBranch(branch));
        }
        // Validation-only path: build with the primary settings alone, report
        // the generator's status, never publish.
        info!(branch = %branch, "[DEPLOY] Unrecognized branch under CI; dry build only");
        let status = builder.build(
            Path::new(OUTPUT_ROOT),
            &[ctx.settings.primary_config.as_path()],
        )?;
        return Ok(Outcome::DryRunValidated { branch, status });
    }

    let plan = plan::plan(class, &branch, &ctx.settings.root_base_url).ok_or_else(|| {
        DeployError::Config(format!("no deploy plan for branch '{branch}'"))
    })?;
    info!(
        output_dir = %plan.output_dir.display(),
        baseurl = %plan.base_url,
        "[DEPLOY] Path plan computed"
    );

    let computed = ComputedSettings {
        branch: branch.clone(),
        base_url: plan.base_url.clone(),
        root_base_url: ctx.settings.root_base_url.trim_end_matches('/').to_string(),
    };
    let secondary_path = ctx.settings.source_dir.join(&ctx.settings.secondary_config);
    synthesis::write_settings(&secondary_path, &computed)?;

    let status = builder.build(
        &plan.output_dir,
        &[
            ctx.settings.primary_config.as_path(),
            ctx.settings.secondary_config.as_path(),
        ],
    )?;
    if status != 0 {
        return Err(DeployError::BuildFailed(status));
    }
    enter(RunState::Built);

    if !ctx.env.ci {
        warn!("[DEPLOY] Not a CI environment; refusing to touch the deploy remote");
        return Err(DeployError::GuardRejected);
    }
    enter(RunState::GuardChecked);

    publish(ctx, &source, &branch, class, &plan)
}

fn resolve_branch(ctx: &DeployContext, source: &Git) -> Result<String, DeployError> {
    let branch = match &ctx.env.branch_override {
        Some(b) => b.clone(),
        None => source.current_branch()?,
    };
    if branch.is_empty() || branch == "HEAD" {
        return Err(DeployError::Config(
            "cannot determine the source branch: checkout is detached and no BRANCH override is set"
                .to_string(),
        ));
    }
    Ok(branch)
}

/// The deploy sequence proper, operating on a scratch repository inside the
/// build output directory. Nothing here touches the source checkout's own
/// history.
fn publish(
    ctx: &DeployContext,
    source: &Git,
    branch: &str,
    class: BranchClass,
    plan: &PathPlan,
) -> Result<Outcome, DeployError> {
    let origin = source.origin_url()?;
    let remote_url = ssh_remote_url(&origin);
    let describe = source.head_describe()?;

    let scratch_root = ctx.settings.source_dir.join(&plan.output_root);
    let scratch = Git::new(ctx.runner, &scratch_root);
    let deploy_branch = &ctx.env.deploy_branch;

    scratch.init()?;
    scratch.set_identity(&ctx.env.git_name, &ctx.env.git_email)?;
    scratch.add_remote(DEPLOY_REMOTE, &remote_url)?;
    enter(RunState::RemoteConfigured);
    info!(remote = %remote_url, "[DEPLOY] Scratch repository configured");

    let fetch = scratch.fetch_shallow(DEPLOY_REMOTE, deploy_branch)?;
    if !fetch.success() {
        return Err(DeployError::FetchFailed {
            branch: deploy_branch.clone(),
            status: fetch.code(),
        });
    }
    enter(RunState::Fetched);

    let tip = format!("{DEPLOY_REMOTE}/{deploy_branch}");
    scratch.reset_to(&tip)?;
    enter(RunState::Reset);

    match class {
        BranchClass::Stable => {
            // The stable build clobbers the whole output root, so previously
            // deployed version subtrees are restored from the deploy tip.
            // Directories dropped from the policy stay clobbered and thus
            // vanish from the published site.
            for dir in ctx.settings.policy.version_directories() {
                if !scratch.restore_path(&tip, &dir)? {
                    warn!(
                        directory = %dir,
                        "[DEPLOY] Version directory not on the deployed tip; leaving as built"
                    );
                }
            }
            ensure_marker(&scratch_root)?;
            scratch.stage_all()?;
        }
        BranchClass::Version => {
            // A version build owns only its own subdirectory; every other
            // path keeps the deployed tip's content.
            let sub = plan.subdirectory.as_deref().ok_or_else(|| {
                DeployError::Config(format!("version branch '{branch}' has no subdirectory"))
            })?;
            scratch.stage_path(sub)?;
        }
        BranchClass::Unrecognized => {
            return Err(DeployError::UnrecognizedBranch(branch.to_string()))
        }
    }
    enter(RunState::Staged);

    let message = format!("Built from {describe} on branch {branch}");
    if !scratch.commit(&message)? {
        warn!("[DEPLOY] Nothing to commit; the deployed site is already current");
        return Ok(Outcome::NothingToPublish {
            branch: branch.to_string(),
        });
    }
    enter(RunState::Committed);

    scratch.push(DEPLOY_REMOTE, &format!("HEAD:refs/heads/{deploy_branch}"))?;
    enter(RunState::Pushed);
    info!(branch = %branch, deploy_branch = %deploy_branch, "[DEPLOY] Site published");

    Ok(Outcome::Published {
        branch: branch.to_string(),
        subdirectory: plan.subdirectory.clone(),
    })
}

/// The marker must survive every stable deploy or the hosting platform will
/// re-process the generated tree.
fn ensure_marker(root: &Path) -> Result<(), DeployError> {
    let marker = root.join(MARKER_FILE);
    if marker.exists() {
        return Ok(());
    }
    fs::write(&marker, b"").map_err(|e| DeployError::Io {
        context: format!("creating {}", marker.display()),
        source: e,
    })
}
