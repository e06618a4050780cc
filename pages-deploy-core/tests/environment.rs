// Environment snapshot rules. These mutate process-wide state, so they are
// serialised.

use std::env;

use pages_deploy_core::environment::{
    EnvInfo, BRANCH_VAR, CI_VAR, DEPLOY_BRANCH_VAR, GIT_EMAIL_VAR, GIT_NAME_VAR,
};
use serial_test::serial;

fn clear_all() {
    for var in [CI_VAR, BRANCH_VAR, GIT_NAME_VAR, GIT_EMAIL_VAR, DEPLOY_BRANCH_VAR] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_apply_when_nothing_is_set() {
    clear_all();

    let info = EnvInfo::from_env();
    assert!(!info.ci);
    assert_eq!(info.branch_override, None);
    assert_eq!(info.git_name, "pages-deploy");
    assert_eq!(info.git_email, "pages-deploy@localhost");
    assert_eq!(info.deploy_branch, "gh-pages");
}

#[test]
#[serial]
fn set_variables_override_every_default() {
    clear_all();
    env::set_var(CI_VAR, "true");
    env::set_var(BRANCH_VAR, "v2");
    env::set_var(GIT_NAME_VAR, "Deploy Bot");
    env::set_var(GIT_EMAIL_VAR, "bot@acme.dev");
    env::set_var(DEPLOY_BRANCH_VAR, "published");

    let info = EnvInfo::from_env();
    assert!(info.ci);
    assert_eq!(info.branch_override.as_deref(), Some("v2"));
    assert_eq!(info.git_name, "Deploy Bot");
    assert_eq!(info.git_email, "bot@acme.dev");
    assert_eq!(info.deploy_branch, "published");

    clear_all();
}

#[test]
#[serial]
fn empty_values_count_as_unset() {
    clear_all();
    env::set_var(CI_VAR, "");
    env::set_var(BRANCH_VAR, "");
    env::set_var(DEPLOY_BRANCH_VAR, "");

    let info = EnvInfo::from_env();
    assert!(!info.ci);
    assert_eq!(info.branch_override, None);
    assert_eq!(info.deploy_branch, "gh-pages");

    clear_all();
}
