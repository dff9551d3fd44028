//! Tests for `vmkeys provision`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_provision_creates_all_secrets() {
    let t = Test::init(VAULT);

    let output = t.provision(VAULT, "vm", "prod", 1, 3, 3);
    assert_success(&output);
    assert_stdout_contains(&output, "created VM001-PROD-PASSWORD");
    assert_stdout_contains(&output, "created VM002-PROD-PASSWORD");
    assert_stdout_contains(&output, "created VM003-PROD-PASSWORD");

    let json = stdout_json(&t.list_json(VAULT));
    assert_eq!(json["count"], 3);
}

#[test]
fn test_provision_twice_is_idempotent() {
    let t = Test::init(VAULT);

    assert_success(&t.provision(VAULT, "vm", "prod", 1, 2, 3));
    let first = stdout(&t.get(VAULT, "VM001-PROD-PASSWORD"));

    let output = t.provision_with(VAULT, "vm", "prod", 1, 2, 3, &["--json"]);
    assert_success(&output);
    let report = stdout_json(&output);
    assert_eq!(report["created"], 0);
    assert_eq!(report["skipped"], 2);

    // Existing secrets are never replaced
    let second = stdout(&t.get(VAULT, "VM001-PROD-PASSWORD"));
    assert_eq!(first, second);
}

#[test]
fn test_provision_extends_existing_batch() {
    let t = Test::init(VAULT);

    assert_success(&t.provision(VAULT, "web", "dev", 1, 2, 2));
    let output = t.provision_with(VAULT, "web", "dev", 1, 4, 2, &["--json"]);
    assert_success(&output);

    let report = stdout_json(&output);
    let outcomes: Vec<&str> = report["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["outcome"].as_str().unwrap())
        .collect();
    assert_eq!(outcomes, vec!["skipped", "skipped", "created", "created"]);
}

#[test]
fn test_provision_report_order_matches_sequence() {
    let t = Test::init(VAULT);

    let output = t.provision_with(VAULT, "vm", "qa", 8, 5, 2, &["--json", "--workers", "4"]);
    assert_success(&output);

    let report = stdout_json(&output);
    let names: Vec<&str> = report["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "VM08-QA-PASSWORD",
            "VM09-QA-PASSWORD",
            "VM10-QA-PASSWORD",
            "VM11-QA-PASSWORD",
            "VM12-QA-PASSWORD",
        ]
    );
}

#[test]
fn test_provision_length_flag() {
    let t = Test::init(VAULT);

    assert_success(&t.provision_with(VAULT, "vm", "prod", 1, 1, 1, &["--length", "24"]));

    let output = t.get(VAULT, "VM1-PROD-PASSWORD");
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end_matches('\n').chars().count(), 24);
}

#[test]
fn test_provision_rejects_short_length() {
    let t = Test::init(VAULT);

    let output = t.provision_with(VAULT, "vm", "prod", 1, 1, 1, &["--length", "5"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "outside the allowed range");

    // Nothing was written
    let json = stdout_json(&t.list_json(VAULT));
    assert_eq!(json["count"], 0);
}

#[test]
fn test_provision_without_vault_fails() {
    let t = Test::new();

    let output = t.provision("missing", "vm", "prod", 1, 1, 3);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault not initialized");
    assert_stderr_contains(&output, "vmkeys init --key-vault-name missing");
}

#[test]
fn test_provision_requires_all_parameters() {
    let t = Test::init(VAULT);

    t.cmd()
        .args([
            "provision",
            "--key-vault-name",
            VAULT,
            "--vm-name-prefix",
            "vm",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--environment-name"));
}

#[test]
fn test_provision_uses_config_generator() {
    let t = Test::init(VAULT);
    t.write_config(
        r#"
[generator]
length = 10

[[generator.sets]]
chars = "ab"
min = 5

[[generator.sets]]
chars = "12"
min = 5
"#,
    );

    assert_success(&t.provision(VAULT, "vm", "prod", 1, 1, 1));

    let value = stdout(&t.get(VAULT, "VM1-PROD-PASSWORD"));
    let value = value.trim_end_matches('\n');
    assert_eq!(value.len(), 10);
    assert!(value.chars().all(|c| "ab12".contains(c)));
}

/// Block vault writes by occupying the temp file path with a directory.
fn block_writes(t: &Test) {
    std::fs::create_dir(t.dir.path().join("kv-test.vault.tmp")).unwrap();
}

#[test]
fn test_item_failures_keep_zero_exit_by_default() {
    let t = Test::init(VAULT);
    block_writes(&t);

    let output = t.provision(VAULT, "vm", "prod", 1, 2, 3);
    assert_success(&output);
    assert_stdout_contains(&output, "failed VM001-PROD-PASSWORD");
    assert_stdout_contains(&output, "failed VM002-PROD-PASSWORD");
}

#[test]
fn test_fail_on_error_sets_exit_status() {
    let t = Test::init(VAULT);
    block_writes(&t);

    let output = t.provision_with(VAULT, "vm", "prod", 1, 2, 3, &["--fail-on-error"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "2 of 2 secrets failed to provision");
}

#[test]
fn test_fail_on_error_from_config() {
    let t = Test::init(VAULT);
    t.write_config("[provision]\nfail_on_error = true\n");
    block_writes(&t);

    let output = t.provision(VAULT, "vm", "prod", 1, 1, 3);
    assert_failure(&output);
}
