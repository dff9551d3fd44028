//! Secret vault abstraction.
//!
//! The provisioner only needs to list names and write new secrets; the CLI
//! also reads them back. Any store that can do those three things can sit
//! behind [`SecretVault`].
//!
//! ## Backends
//!
//! - [`FileVault`]: local age-encrypted TOML file, used by the CLI.
//! - [`MemoryVault`]: in-process map, for tests and embedding.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `SecretVault` trait
//! 2. Map transport failures to `VaultError` (timeouts to `VaultError::Timeout`)
//! 3. Re-export from this module

use std::collections::BTreeSet;

use zeroize::Zeroizing;

use crate::core::types::SecretName;
use crate::error::{Result, ValidationError};

mod file;
mod memory;
mod store;

pub use file::FileVault;
pub use memory::MemoryVault;
pub use store::KeyStore;

/// Key-value store for secrets.
///
/// Methods take `&self` so one vault can serve several provisioning
/// workers; implementations synchronize internally.
pub trait SecretVault {
    /// Vault name for display.
    fn name(&self) -> &str;

    /// Names of all stored secrets.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` if the vault cannot be read. Provisioning treats
    /// this as fatal.
    fn list_secrets(&self) -> Result<BTreeSet<SecretName>>;

    /// Value of a stored secret, or `None` if absent.
    fn get_secret(&self, name: &str) -> Result<Option<Zeroizing<String>>>;

    /// Store a new secret.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` if the write fails. Provisioning records this
    /// against the item and moves on.
    fn set_secret(&self, name: &str, value: &str) -> Result<()>;
}

/// Validate a vault name.
///
/// Vault names become file and directory names, so they are limited to
/// ASCII letters, digits, `-` and `_`, 1 to 127 characters.
pub fn validate_vault_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| -> crate::error::Error {
        ValidationError::InvalidVaultName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty"));
    }
    if name.len() > 127 {
        return Err(invalid("longer than 127 characters"));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(invalid(&format!("invalid character '{}'", ch)));
    }

    Ok(())
}
