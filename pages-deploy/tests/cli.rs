// Binary-level tests: the exit-status contract as CI jobs observe it.
//
// These run the real binary in a temporary source directory. The branch is
// always supplied through the BRANCH override so no git checkout is needed,
// and the generator is pointed at harmless standard commands (`true`,
// `false`) where a build must "run".

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, generator: &str) {
    let config = format!(
        "baseurl: /docs\nversions:\n  branches:\n    - v2\n    - v3\n  stable: master\nbuild:\n  command: {generator}\n"
    );
    fs::write(dir.path().join("_config.yml"), config).expect("write settings");
}

fn deploy_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pages-deploy").expect("binary exists");
    cmd.current_dir(dir.path())
        .arg("deploy")
        .env_remove("CI")
        .env_remove("BRANCH")
        .env_remove("DEPLOY_BRANCH")
        .env_remove("GIT_NAME")
        .env_remove("GIT_EMAIL");
    cmd
}

#[test]
fn help_names_the_deploy_subcommand() {
    let mut cmd = Command::cargo_bin("pages-deploy").expect("binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"));
}

#[test]
fn missing_settings_file_fails_with_a_diagnostic() {
    let dir = TempDir::new().expect("tempdir");

    deploy_cmd(&dir)
        .env("BRANCH", "master")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("settings file"));
}

#[test]
fn missing_versions_section_is_a_configuration_error() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("_config.yml"), "baseurl: /docs\n").expect("write settings");

    deploy_cmd(&dir)
        .env("BRANCH", "master")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("versions"));
}

#[test]
fn unrecognized_branch_outside_ci_exits_120_without_building() {
    let dir = TempDir::new().expect("tempdir");
    // A generator that would fail loudly if it were ever invoked.
    write_config(&dir, "false");

    deploy_cmd(&dir)
        .env("BRANCH", "feature-x")
        .assert()
        .code(120)
        .stdout(predicate::str::contains("feature-x"));

    // Nothing was built and no deploy settings were synthesized.
    assert!(!dir.path().join("_config_deploy.yml").exists());
}

#[test]
fn unrecognized_branch_under_ci_propagates_the_generator_status() {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, "false");

    deploy_cmd(&dir)
        .env("BRANCH", "feature-x")
        .env("CI", "true")
        .assert()
        .code(1);
    assert!(!dir.path().join("_config_deploy.yml").exists());
}

#[test]
fn dry_build_success_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, "true");

    deploy_cmd(&dir)
        .env("BRANCH", "feature-x")
        .env("CI", "true")
        .assert()
        .code(0);
}

#[test]
fn unlaunchable_generator_exits_3() {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, "pages-deploy-test-no-such-generator");

    deploy_cmd(&dir)
        .env("BRANCH", "master")
        .env("CI", "true")
        .assert()
        .code(3);
}

#[test]
fn failing_build_exits_3() {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, "false");

    deploy_cmd(&dir)
        .env("BRANCH", "master")
        .env("CI", "true")
        .assert()
        .code(3);
}

#[test]
fn deploy_outside_ci_exits_128_after_the_build() {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, "true");

    deploy_cmd(&dir)
        .env("BRANCH", "master")
        .assert()
        .code(128);

    // The build step ran: the deploy settings were synthesized for it.
    assert!(dir.path().join("_config_deploy.yml").exists());
}
