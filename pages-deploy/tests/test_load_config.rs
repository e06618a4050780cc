use std::fs::write;

use tempfile::NamedTempFile;

/// A full settings file produces the typed policy, baseurl and generator.
#[test]
fn test_load_config_success_full_settings() {
    let config_yaml = r#"
title: Widget Docs
baseurl: /docs/
versions:
  branches:
    - v2
    - v3
  stable: main
build:
  command: bundle-exec-jekyll
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write settings");

    let settings =
        pages_deploy::load_config::load_config(config_file.path()).expect("settings should load");

    assert_eq!(settings.root_base_url, "/docs/");
    assert_eq!(settings.policy.stable, "main");
    assert_eq!(settings.policy.branches, vec!["v2", "v3"]);
    assert_eq!(settings.generator, "bundle-exec-jekyll");
}

/// The stable branch and generator fall back to their defaults when unset.
#[test]
fn test_load_config_defaults_stable_and_generator() {
    let config_yaml = r#"
baseurl: /docs
versions:
  branches:
    - v2
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write settings");

    let settings =
        pages_deploy::load_config::load_config(config_file.path()).expect("settings should load");

    assert_eq!(settings.policy.stable, "master");
    assert_eq!(settings.generator, "jekyll");
}

/// A versions section without branches still loads; only stable is published.
#[test]
fn test_load_config_allows_empty_branch_list() {
    let config_yaml = r#"
baseurl: /docs
versions:
  stable: master
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write settings");

    let settings =
        pages_deploy::load_config::load_config(config_file.path()).expect("settings should load");
    assert!(settings.policy.branches.is_empty());
}

#[test]
fn test_load_config_requires_baseurl() {
    let config_yaml = r#"
versions:
  branches:
    - v2
  stable: master
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write settings");

    let err = pages_deploy::load_config::load_config(config_file.path())
        .expect_err("must reject settings without a baseurl");
    assert!(err.to_string().contains("baseurl"), "got: {err}");
}

#[test]
fn test_load_config_requires_versions_section() {
    let config_yaml = "baseurl: /docs\n";
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).expect("write settings");

    let err = pages_deploy::load_config::load_config(config_file.path())
        .expect_err("must reject settings without a versions section");
    assert!(err.to_string().contains("versions"), "got: {err}");
}

#[test]
fn test_load_config_rejects_invalid_yaml() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "baseurl: [unclosed\n").expect("write settings");

    let err = pages_deploy::load_config::load_config(config_file.path())
        .expect_err("must reject invalid YAML");
    assert!(err.to_string().contains("parse"), "got: {err}");
}

#[test]
fn test_load_config_missing_file_is_an_error() {
    let err = pages_deploy::load_config::load_config("definitely/not/a/real/_config.yml")
        .expect_err("must reject a missing file");
    assert!(err.to_string().contains("read"), "got: {err}");
}
