//! Error types for vmkeys.
//!
//! Errors are grouped by concern. `Validation` and `Config` errors are
//! raised before any vault is touched, `Entropy` errors abort a run (wrapped
//! in `Aborted` with the partial report), and `Vault` errors are
//! either fatal (listing) or recorded per item (writes).

use thiserror::Error;

use crate::core::provision::ProvisioningReport;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Some items failed and the caller asked for a non-zero exit.
    #[error("{failed} of {total} secrets failed to provision")]
    Incomplete { failed: usize, total: usize },

    /// A fatal error stopped the run partway. `report` holds the items
    /// finished before it, including secrets already written.
    #[error("provisioning aborted after {} of {total} secrets: {source}", .report.len())]
    Aborted {
        report: Box<ProvisioningReport>,
        total: usize,
        source: Box<Error>,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed generation spec or batch parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("password length {length} is outside the allowed range {min}..={max}")]
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid length bounds: min {min} must be at least 1 and not above max {max}")]
    InvalidBounds { min: usize, max: usize },

    #[error("{sets} character sets but {counts} minimum counts")]
    CountMismatch { sets: usize, counts: usize },

    #[error("minimum counts require {required} characters but length is {length}")]
    MinCountsExceedLength { required: usize, length: usize },

    #[error("character set {0} is empty")]
    EmptyCharacterSet(usize),

    #[error("at least one character set is required")]
    NoCharacterSets,

    #[error("invalid vault name '{name}': {reason}")]
    InvalidVaultName { name: String, reason: String },

    #[error("sequence {start} + {count} overflows")]
    SequenceOverflow { start: u64, count: u64 },
}

/// The secure random source could not be read.
#[derive(Error, Debug)]
pub enum EntropyError {
    #[error("secure random source unavailable: {0}")]
    Unavailable(String),
}

/// Vault access failures.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("vault not initialized: {0}")]
    NotInitialized(String),

    #[error("vault already exists: {0}")]
    VaultExists(String),

    #[error("secret already exists: {0}")]
    AlreadyExists(String),

    #[error("secret not found: {0}")]
    SecretNotFound(String),

    #[error("no identity key for vault: {0}")]
    NoIdentity(String),

    #[error("invalid identity key: {0}")]
    InvalidIdentity(String),

    #[error("failed to read vault: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write vault: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("malformed vault file: {0}")]
    Parse(String),

    #[error("failed to serialize vault: {0}")]
    Serialize(String),

    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("decryption failed: {0}")]
    Decrypt(String),

    #[error("vault call timed out: {0}")]
    Timeout(String),

    #[error("vault backend error: {0}")]
    Backend(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unable to determine home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, Error>;
