//! Local file-backed vault.
//!
//! A vault named `kv-prod` lives in `<dir>/kv-prod.vault.toml`. Secret names
//! are stored in the clear, values as age ciphertext addressed to the
//! vault's own identity (see [`KeyStore`]).

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use age::x25519;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::{validate_vault_name, KeyStore, SecretVault};
use crate::core::cipher;
use crate::core::constants;
use crate::core::types::{EncryptedValue, PublicKey, SecretName};
use crate::error::{Result, VaultError};

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct VaultFile {
    vault: Meta,
    #[serde(default)]
    secrets: BTreeMap<SecretName, StoredSecret>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Meta {
    version: String,
    name: String,
    recipient: PublicKey,
    created: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSecret {
    value: EncryptedValue,
    created: String,
}

/// Age-encrypted vault file.
pub struct FileVault {
    name: String,
    path: PathBuf,
    identity: x25519::Identity,
    recipient: x25519::Recipient,
    state: Mutex<VaultFile>,
}

impl std::fmt::Debug for FileVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileVault")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("recipient", &self.recipient.to_string())
            .finish()
    }
}

impl FileVault {
    /// Path of the vault file for `name` inside `dir`.
    pub fn path_for(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}{}", name, constants::VAULT_FILE_SUFFIX))
    }

    /// Check if a vault file exists.
    pub fn exists(dir: &Path, name: &str) -> bool {
        Self::path_for(dir, name).exists()
    }

    /// Create an empty vault and its identity key.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidVaultName` for bad names,
    /// `VaultError::VaultExists` if the vault file or key already exists,
    /// or a write error.
    pub fn init(name: &str, dir: &Path, keys: &KeyStore) -> Result<Self> {
        validate_vault_name(name)?;

        let path = Self::path_for(dir, name);
        if path.exists() {
            return Err(VaultError::VaultExists(path.display().to_string()).into());
        }

        let identity = keys.generate(name)?;
        let recipient = identity.to_public();

        let file = VaultFile {
            vault: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
                name: name.to_string(),
                recipient: recipient.to_string(),
                created: now(),
            },
            secrets: BTreeMap::new(),
        };

        let written: Result<()> = fs::create_dir_all(dir)
            .map_err(|e| VaultError::WriteFailed(e).into())
            .and_then(|()| write_file(&path, &file));
        if let Err(e) = written {
            // Leave no orphaned key behind.
            if let Err(cleanup) = keys.remove(name) {
                warn!(vault = name, error = %cleanup, "failed to remove identity key");
            }
            return Err(e);
        }

        info!(vault = name, path = %path.display(), "vault created");

        Ok(Self {
            name: name.to_string(),
            path,
            identity,
            recipient,
            state: Mutex::new(file),
        })
    }

    /// Open an existing vault.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotInitialized` if the file is missing,
    /// `VaultError::Parse` if it is malformed, and identity errors if the
    /// key is missing or does not match the vault's recipient.
    pub fn open(name: &str, dir: &Path, keys: &KeyStore) -> Result<Self> {
        validate_vault_name(name)?;

        let path = Self::path_for(dir, name);
        debug!(path = %path.display(), "opening vault");

        if !path.exists() {
            return Err(VaultError::NotInitialized(name.to_string()).into());
        }

        let contents = fs::read_to_string(&path).map_err(VaultError::ReadFailed)?;
        let file: VaultFile =
            toml::from_str(&contents).map_err(|e| VaultError::Parse(e.to_string()))?;

        if file.vault.name != name {
            return Err(VaultError::Parse(format!(
                "file belongs to vault '{}', expected '{}'",
                file.vault.name, name
            ))
            .into());
        }

        let identity = keys.load(name)?;
        let recipient = identity.to_public();
        let declared = cipher::parse_recipient(&file.vault.recipient)?;
        if declared.to_string() != recipient.to_string() {
            return Err(VaultError::InvalidIdentity(format!(
                "identity key does not match recipient of vault '{}'",
                name
            ))
            .into());
        }

        debug!(secrets = file.secrets.len(), "vault loaded");

        Ok(Self {
            name: name.to_string(),
            path,
            identity,
            recipient,
            state: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The vault's age public key.
    pub fn recipient(&self) -> PublicKey {
        self.recipient.to_string()
    }

    fn lock(&self) -> MutexGuard<'_, VaultFile> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SecretVault for FileVault {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_secrets(&self) -> Result<BTreeSet<SecretName>> {
        Ok(self.lock().secrets.keys().cloned().collect())
    }

    fn get_secret(&self, name: &str) -> Result<Option<Zeroizing<String>>> {
        let stored = self.lock().secrets.get(name).cloned();
        stored
            .map(|s| cipher::decrypt(&s.value, &self.identity).map(Zeroizing::new))
            .transpose()
    }

    fn set_secret(&self, name: &str, value: &str) -> Result<()> {
        let encrypted = cipher::encrypt(value, &self.recipient)?;

        let mut file = self.lock();
        if file.secrets.contains_key(name) {
            return Err(VaultError::AlreadyExists(name.to_string()).into());
        }

        file.secrets.insert(
            name.to_string(),
            StoredSecret {
                value: encrypted,
                created: now(),
            },
        );

        if let Err(e) = write_file(&self.path, &file) {
            file.secrets.remove(name);
            return Err(e);
        }

        debug!(secret = name, "secret stored");
        Ok(())
    }
}

/// Write via a temp file and rename so a crash never leaves a torn vault.
fn write_file(path: &Path, file: &VaultFile) -> Result<()> {
    let contents =
        toml::to_string_pretty(file).map_err(|e| VaultError::Serialize(e.to_string()))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(VaultError::WriteFailed)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(VaultError::WriteFailed(e).into());
    }
    Ok(())
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
