//! Tests for `vmkeys generate`.

use crate::support::*;

#[test]
fn test_generate_default_length() {
    let t = Test::new();

    let output = t.cmd().arg("generate").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].chars().count(), 12);
}

#[test]
fn test_generate_count_and_length() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["generate", "--length", "20", "-n", "5"])
        .output()
        .unwrap();
    assert_success(&output);

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.chars().count() == 20));

    let mut unique = lines.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 5);
}

#[test]
fn test_generate_rejects_out_of_range_length() {
    let t = Test::new();

    let output = t.cmd().args(["generate", "--length", "256"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "outside the allowed range");
}
