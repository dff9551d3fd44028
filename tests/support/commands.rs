//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a vmkeys command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and VMKEYS_KEY_DIR inside the temporary home directory
    /// - Current directory set to the test working directory
    /// - Colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vmkeys").expect("failed to find vmkeys binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("VMKEYS_KEY_DIR", self.home.path().join("keys"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("VMKEYS_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `vmkeys init`.
    pub fn init_cmd(&self, vault: &str) -> Output {
        self.cmd()
            .args(["init", "--key-vault-name", vault])
            .output()
            .expect("failed to run vmkeys init")
    }

    /// Shortcut for `vmkeys provision` with the six mandatory parameters.
    pub fn provision(
        &self,
        vault: &str,
        prefix: &str,
        env: &str,
        index: u64,
        count: u64,
        pad: usize,
    ) -> Output {
        self.provision_with(vault, prefix, env, index, count, pad, &[])
    }

    /// `vmkeys provision` with extra flags appended.
    #[allow(clippy::too_many_arguments)]
    pub fn provision_with(
        &self,
        vault: &str,
        prefix: &str,
        env: &str,
        index: u64,
        count: u64,
        pad: usize,
        extra: &[&str],
    ) -> Output {
        let index = index.to_string();
        let count = count.to_string();
        let pad = pad.to_string();
        self.cmd()
            .args([
                "provision",
                "--key-vault-name",
                vault,
                "--vm-name-prefix",
                prefix,
                "--environment-name",
                env,
                "--index",
                &index,
                "--number-of-instances",
                &count,
                "--pad-left-int",
                &pad,
            ])
            .args(extra)
            .output()
            .expect("failed to run vmkeys provision")
    }

    /// Shortcut for `vmkeys list --json`.
    pub fn list_json(&self, vault: &str) -> Output {
        self.cmd()
            .args(["list", "--key-vault-name", vault, "--json"])
            .output()
            .expect("failed to run vmkeys list")
    }

    /// Shortcut for `vmkeys get`.
    pub fn get(&self, vault: &str, name: &str) -> Output {
        self.cmd()
            .args(["get", "--key-vault-name", vault, name])
            .output()
            .expect("failed to run vmkeys get")
    }

    /// Write a vmkeys.toml into the working directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir.path().join("vmkeys.toml"), contents)
            .expect("failed to write config");
    }
}
