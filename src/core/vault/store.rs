//! Filesystem identity storage.
//!
//! Each vault has an age x25519 identity in
//! `<key_dir>/<vault-name>/identity.key`, written with mode 0600.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use age::secrecy::ExposeSecret;
use age::x25519;
use tracing::{debug, warn};

use crate::core::constants;
use crate::error::{Result, VaultError};

/// Identity keys under a base directory.
#[derive(Debug, Clone)]
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, vault: &str) -> PathBuf {
        self.dir.join(vault).join(constants::IDENTITY_FILE)
    }

    /// Generate and persist a new identity for `vault`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::VaultExists` if a key is already present, or
    /// `VaultError::WriteFailed` on I/O errors.
    pub fn generate(&self, vault: &str) -> Result<x25519::Identity> {
        let key_path = self.key_path(vault);
        if key_path.exists() {
            return Err(VaultError::VaultExists(format!(
                "identity key already present at {}",
                key_path.display()
            ))
            .into());
        }

        let identity = x25519::Identity::generate();

        if let Some(parent) = key_path.parent() {
            fs::create_dir_all(parent).map_err(VaultError::WriteFailed)?;
        }

        // Owner-only from creation.
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&key_path).map_err(VaultError::WriteFailed)?;
        if let Err(e) = writeln!(file, "{}", identity.to_string().expose_secret())
            .and_then(|()| file.sync_all())
        {
            let _ = fs::remove_file(&key_path);
            return Err(VaultError::WriteFailed(e).into());
        }

        debug!(path = %key_path.display(), "identity key written");
        Ok(identity)
    }

    /// Load the identity for `vault`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NoIdentity` if the key file is missing, or
    /// `VaultError::InvalidIdentity` if it cannot be parsed.
    pub fn load(&self, vault: &str) -> Result<x25519::Identity> {
        let key_path = self.key_path(vault);
        if !key_path.exists() {
            return Err(VaultError::NoIdentity(vault.to_string()).into());
        }

        #[cfg(unix)]
        check_permissions(&key_path, 0o600);

        let contents = fs::read_to_string(&key_path).map_err(VaultError::ReadFailed)?;
        contents
            .trim()
            .parse::<x25519::Identity>()
            .map_err(|e: &str| VaultError::InvalidIdentity(e.to_string()).into())
    }

    pub fn has_key(&self, vault: &str) -> bool {
        self.key_path(vault).exists()
    }

    /// Delete the identity for `vault`, and its directory once empty.
    ///
    /// A missing key is not an error.
    pub fn remove(&self, vault: &str) -> Result<()> {
        let key_path = self.key_path(vault);
        match fs::remove_file(&key_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(VaultError::WriteFailed(e).into()),
        }
        if let Some(parent) = key_path.parent() {
            // Only succeeds if nothing else lives there.
            let _ = fs::remove_dir(parent);
        }
        debug!(path = %key_path.display(), "identity key removed");
        Ok(())
    }
}

/// Warn when a key file is readable by anyone but its owner.
#[cfg(unix)]
fn check_permissions(path: &Path, expected_mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let actual_mode = metadata.permissions().mode() & 0o777;
        if actual_mode != expected_mode {
            warn!(
                path = %path.display(),
                expected = format!("{:o}", expected_mode),
                actual = format!("{:o}", actual_mode),
                "identity key has loose permissions"
            );
        }
    }
}
