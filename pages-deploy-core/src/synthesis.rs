//! Secondary settings synthesis.
//!
//! The generator merges a second settings file over the primary one; this
//! module rewrites that file each run with the values the pipeline computed,
//! preserving whatever unrelated keys an operator keeps in it.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::info;

use crate::error::DeployError;

pub const BRANCH_KEY: &str = "branch";
pub const BASE_URL_KEY: &str = "baseurl";
pub const ROOT_BASE_URL_KEY: &str = "root_baseurl";

/// The three values layered into the secondary settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedSettings {
    pub branch: String,
    pub base_url: String,
    pub root_base_url: String,
}

/// Merge the computed settings over whatever `path` already contains and
/// write it back. The file is created when absent.
pub fn write_settings(path: &Path, computed: &ComputedSettings) -> Result<(), DeployError> {
    let mut mapping = read_mapping(path)?;
    mapping.insert(
        Value::String(BRANCH_KEY.to_string()),
        Value::String(computed.branch.clone()),
    );
    mapping.insert(
        Value::String(BASE_URL_KEY.to_string()),
        Value::String(computed.base_url.clone()),
    );
    mapping.insert(
        Value::String(ROOT_BASE_URL_KEY.to_string()),
        Value::String(computed.root_base_url.clone()),
    );

    let rendered = serde_yaml::to_string(&Value::Mapping(mapping)).map_err(|e| {
        DeployError::Yaml {
            path: path.display().to_string(),
            detail: e.to_string(),
        }
    })?;
    fs::write(path, rendered).map_err(|e| DeployError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })?;
    info!(
        path = %path.display(),
        branch = %computed.branch,
        baseurl = %computed.base_url,
        "[DEPLOY] Deploy settings synthesized"
    );
    Ok(())
}

fn read_mapping(path: &Path) -> Result<Mapping, DeployError> {
    if !path.exists() {
        return Ok(Mapping::new());
    }
    let content = fs::read_to_string(path).map_err(|e| DeployError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(&content).map_err(|e| DeployError::Yaml {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(DeployError::Yaml {
            path: path.display().to_string(),
            detail: format!("expected a mapping at the top level, found {other:?}"),
        }),
    }
}
