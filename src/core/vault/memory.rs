//! In-memory vault.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use zeroize::Zeroizing;

use super::SecretVault;
use crate::core::types::SecretName;
use crate::error::{Result, VaultError};

/// A vault held in a map. Writes are counted so callers can check how many
/// secrets a run created.
#[derive(Default)]
pub struct MemoryVault {
    name: String,
    secrets: Mutex<BTreeMap<SecretName, Zeroizing<String>>>,
    writes: AtomicUsize,
}

impl MemoryVault {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Vault pre-populated with `(name, value)` pairs. Seeding is not
    /// counted as writes.
    pub fn with_secrets(name: &str, secrets: &[(&str, &str)]) -> Self {
        let vault = Self::new(name);
        {
            let mut map = vault.lock();
            for (k, v) in secrets {
                map.insert(k.to_string(), Zeroizing::new(v.to_string()));
            }
        }
        vault
    }

    /// Number of successful `set_secret` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<SecretName, Zeroizing<String>>> {
        self.secrets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for MemoryVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryVault")
            .field("name", &self.name)
            .field("secrets", &self.len())
            .field("writes", &self.writes())
            .finish()
    }
}

impl SecretVault for MemoryVault {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_secrets(&self) -> Result<BTreeSet<SecretName>> {
        Ok(self.lock().keys().cloned().collect())
    }

    fn get_secret(&self, name: &str) -> Result<Option<Zeroizing<String>>> {
        Ok(self.lock().get(name).cloned())
    }

    fn set_secret(&self, name: &str, value: &str) -> Result<()> {
        let mut map = self.lock();
        if map.contains_key(name) {
            return Err(VaultError::AlreadyExists(name.to_string()).into());
        }
        map.insert(name.to_string(), Zeroizing::new(value.to_string()));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
