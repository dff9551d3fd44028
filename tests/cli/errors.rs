//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("provision"));
    assert!(out.contains("generate"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vmkeys");
}

#[test]
fn test_malformed_config_fails() {
    let t = Test::new();
    t.write_config("[generator\nlength = ");

    let output = t.cmd().arg("generate").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config file");
}

#[test]
fn test_explicit_missing_config_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "does-not-exist.toml", "generate"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read config file");
}

#[test]
fn test_completions_ignore_broken_config() {
    let t = Test::new();
    t.write_config("not toml at all [");

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vmkeys");
}

#[test]
fn test_missing_identity_key_fails() {
    let t = Test::init(VAULT);
    std::fs::remove_dir_all(t.home.path().join("keys")).unwrap();

    let output = t.provision(VAULT, "vm", "prod", 1, 1, 3);
    assert_failure(&output);
    assert_stderr_contains(&output, "no identity key");
}
