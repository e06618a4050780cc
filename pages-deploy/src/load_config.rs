//! Primary settings loading: the only place the site's YAML is parsed.
//!
//! The primary settings file belongs to the generator; this tool reads just
//! the keys it needs (`baseurl`, the `versions` section, an optional `build`
//! section) and ignores the rest. Any failure here must produce a clear
//! diagnostic, because it is the first thing a misconfigured CI job sees.

use std::fs;
use std::path::Path;

use anyhow::Result;
use pages_deploy_core::build::DEFAULT_GENERATOR;
use pages_deploy_core::classify::VersionPolicy;
use serde::Deserialize;
use tracing::{error, info};

/// Branch deployed to the root when the settings file does not name one.
const DEFAULT_STABLE: &str = "master";

/// Settings the orchestrator needs from the site's primary settings file.
#[derive(Debug)]
pub struct SiteSettings {
    pub policy: VersionPolicy,
    pub root_base_url: String,
    pub generator: String,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    baseurl: Option<String>,
    versions: Option<RawVersions>,
    build: Option<RawBuild>,
}

#[derive(Debug, Deserialize)]
struct RawVersions {
    #[serde(default)]
    branches: Vec<String>,
    stable: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBuild {
    command: Option<String>,
}

/// Load the primary settings file and adapt it into the typed settings the
/// deploy pipeline consumes.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SiteSettings> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading primary settings file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read settings file");
            return Err(anyhow::anyhow!(
                "failed to read settings file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&content) {
        Ok(raw) => raw,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse settings YAML");
            return Err(anyhow::anyhow!(
                "failed to parse settings file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let root_base_url = raw.baseurl.ok_or_else(|| {
        anyhow::anyhow!("missing required settings key 'baseurl' in {:?}", path_ref)
    })?;
    let versions = raw.versions.ok_or_else(|| {
        anyhow::anyhow!(
            "missing required settings section 'versions' in {:?}",
            path_ref
        )
    })?;
    let stable = versions
        .stable
        .unwrap_or_else(|| DEFAULT_STABLE.to_string());
    let generator = raw
        .build
        .and_then(|b| b.command)
        .unwrap_or_else(|| DEFAULT_GENERATOR.to_string());

    info!(
        stable = %stable,
        versions = ?versions.branches,
        baseurl = %root_base_url,
        "Parsed primary settings"
    );
    Ok(SiteSettings {
        policy: VersionPolicy {
            stable,
            branches: versions.branches,
        },
        root_base_url,
        generator,
    })
}
