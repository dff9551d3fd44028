//! Tests for `vmkeys init`, `list` and `get`.

use crate::support::*;
use std::fs;

#[test]
fn test_init_creates_vault_and_key() {
    let t = Test::new();

    let output = t.init_cmd(VAULT);
    assert_success(&output);
    assert_stdout_contains(&output, "initialized vault");

    assert!(t.dir.path().join("kv-test.vault.toml").exists());
    assert!(t
        .home
        .path()
        .join("keys")
        .join(VAULT)
        .join("identity.key")
        .exists());
}

#[test]
fn test_init_twice_fails() {
    let t = Test::init(VAULT);

    let output = t.init_cmd(VAULT);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_init_rejects_bad_name() {
    let t = Test::new();

    let output = t.init_cmd("../escape");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid vault name");
}

#[test]
fn test_list_empty_vault() {
    let t = Test::init(VAULT);

    let output = t
        .cmd()
        .args(["list", "--key-vault-name", VAULT])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "no secrets stored");
}

#[test]
fn test_list_shows_names() {
    let t = Test::init(VAULT);
    assert_success(&t.provision(VAULT, "db", "stage", 1, 2, 2));

    let output = t
        .cmd()
        .args(["list", "--key-vault-name", VAULT])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "2 secrets");
    assert_stdout_contains(&output, "DB01-STAGE-PASSWORD");
    assert_stdout_contains(&output, "DB02-STAGE-PASSWORD");
}

#[test]
fn test_vault_file_holds_no_plaintext() {
    let t = Test::init(VAULT);
    assert_success(&t.provision(VAULT, "vm", "prod", 1, 1, 3));

    let password = stdout(&t.get(VAULT, "VM001-PROD-PASSWORD"));
    let password = password.trim_end_matches('\n');
    assert_eq!(password.chars().count(), 12);

    let raw = fs::read_to_string(t.dir.path().join("kv-test.vault.toml")).unwrap();
    assert!(raw.contains("VM001-PROD-PASSWORD"));
    assert!(raw.contains("BEGIN AGE ENCRYPTED FILE"));
    assert!(!raw.contains(password));
}

#[test]
fn test_get_missing_secret_fails() {
    let t = Test::init(VAULT);

    let output = t.get(VAULT, "NOPE-PASSWORD");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found");
}
