//! Configuration file management.
//!
//! Reads the optional `vmkeys.toml`. Every field has a default, so a missing
//! file and an empty file behave the same. Command-line flags override
//! values read here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::password::{CharacterSet, GenerationSpec, LengthBounds};
use crate::core::vault::KeyStore;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `vmkeys.toml`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub provision: ProvisionConfig,
    pub vault: VaultConfig,
}

/// `[generator]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub length: usize,
    pub min_length: usize,
    pub max_length: usize,
    /// Character classes; empty means the four defaults.
    pub sets: Vec<SetConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: constants::DEFAULT_LENGTH,
            min_length: constants::MIN_LENGTH,
            max_length: constants::MAX_LENGTH,
            sets: Vec::new(),
        }
    }
}

/// One `[[generator.sets]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetConfig {
    pub chars: String,
    #[serde(default = "default_min")]
    pub min: usize,
}

fn default_min() -> usize {
    1
}

/// `[provision]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    pub workers: usize,
    /// Exit non-zero when any item fails.
    pub fail_on_error: bool,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            fail_on_error: false,
        }
    }
}

/// `[vault]` section.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VaultConfig {
    /// Directory holding `*.vault.toml` files. Defaults to the working directory.
    pub dir: Option<PathBuf>,
    /// Directory holding identity keys. Defaults to `~/.vmkeys/keys`.
    pub key_dir: Option<PathBuf>,
}

impl Config {
    /// Path to the default configuration file in the current directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `vmkeys.toml` in the
    /// working directory is used if present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` on bad files,
    /// and `ConfigError::InvalidValue` if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Checks:
    /// - `provision.workers` is at least 1
    /// - the generator section describes a valid `GenerationSpec`
    pub fn validate(&self) -> Result<()> {
        if self.provision.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provision.workers",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        self.generation_spec(None)?;
        Ok(())
    }

    /// Build the generation spec, optionally overriding the length.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the resulting spec is invalid.
    pub fn generation_spec(&self, length: Option<usize>) -> Result<GenerationSpec> {
        let generator = &self.generator;
        let bounds = LengthBounds::new(generator.min_length, generator.max_length)?;
        let sets = if generator.sets.is_empty() {
            CharacterSet::defaults()
        } else {
            generator
                .sets
                .iter()
                .map(|s| CharacterSet::new(&s.chars, s.min))
                .collect()
        };
        GenerationSpec::with_bounds(length.unwrap_or(generator.length), sets, bounds)
    }

    /// Vault directory, preferring `override_dir`.
    pub fn vault_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.vault.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Identity key store.
    ///
    /// `VMKEYS_KEY_DIR` wins over `vault.key_dir`, which wins over
    /// `~/.vmkeys/keys`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is needed
    /// but cannot be determined.
    pub fn key_store(&self) -> Result<KeyStore> {
        if let Ok(dir) = std::env::var(constants::KEY_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(KeyStore::new(dir));
            }
        }
        if let Some(dir) = &self.vault.key_dir {
            return Ok(KeyStore::new(dir.clone()));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(KeyStore::new(home.join(constants::KEY_DIR)))
    }
}
