//! Test support utilities for vmkeys integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;

use tempfile::TempDir;

/// Vault name used by most CLI tests.
pub const VAULT: &str = "kv-test";

/// Test environment with isolated temp directories.
///
/// Each test gets its own working directory (where vault files land) and
/// home directory (where identity keys land). Child processes use
/// `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary working directory
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with an initialized vault.
    pub fn init(vault: &str) -> Self {
        let t = Self::new();
        let output = t.init_cmd(vault);
        assert!(
            output.status.success(),
            "Failed to initialize vault: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }
}
