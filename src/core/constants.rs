//! Constants used throughout vmkeys.
//!
//! Centralizes file names, environment variables and generator defaults.

/// Configuration file name looked up in the working directory.
pub const CONFIG_FILE: &str = "vmkeys.toml";

/// Suffix appended to a vault name to form its file name.
pub const VAULT_FILE_SUFFIX: &str = ".vault.toml";

/// Identity directory relative to HOME (~/.vmkeys/keys).
pub const KEY_DIR: &str = ".vmkeys/keys";

/// Identity file name inside a vault's key directory.
pub const IDENTITY_FILE: &str = "identity.key";

/// Overrides the identity directory.
pub const KEY_DIR_ENV: &str = "VMKEYS_KEY_DIR";

/// Log filter environment variable.
pub const LOG_ENV: &str = "VMKEYS_LOG";

/// Suffix of every derived secret name, before uppercasing.
pub const SECRET_NAME_SUFFIX: &str = "password";

/// Default password length.
pub const DEFAULT_LENGTH: usize = 12;

/// Default lower bound on password length.
pub const MIN_LENGTH: usize = 8;

/// Default upper bound on password length.
pub const MAX_LENGTH: usize = 255;

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Decimal digits.
pub const DIGITS: &str = "0123456789";

/// Symbols accepted by common VM admin password policies.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";
