//! Age encryption for stored secret values.
//!
//! Values are encrypted to the vault's x25519 recipient and ASCII-armored
//! so they sit cleanly inside the TOML vault file.

use std::io::{Read, Write};

use age::x25519;
use tracing::trace;

use crate::error::{Result, VaultError};

/// Encrypt plaintext for a single recipient.
///
/// # Errors
///
/// Returns `VaultError::Encrypt` if any stage of encryption fails.
pub fn encrypt(plaintext: &str, recipient: &x25519::Recipient) -> Result<String> {
    trace!(plaintext_len = plaintext.len(), "encrypting");

    let encryptor = age::Encryptor::with_recipients(std::iter::once(recipient as &dyn age::Recipient))
        .map_err(|e| VaultError::Encrypt(e.to_string()))?;

    let mut encrypted = Vec::new();
    let armor = age::armor::ArmoredWriter::wrap_output(&mut encrypted, age::armor::Format::AsciiArmor)
        .map_err(|e| VaultError::Encrypt(e.to_string()))?;
    let mut writer = encryptor
        .wrap_output(armor)
        .map_err(|e| VaultError::Encrypt(e.to_string()))?;

    writer
        .write_all(plaintext.as_bytes())
        .map_err(|e| VaultError::Encrypt(e.to_string()))?;
    let armored = writer
        .finish()
        .map_err(|e| VaultError::Encrypt(e.to_string()))?;
    armored
        .finish()
        .map_err(|e| VaultError::Encrypt(format!("armor: {}", e)))?;

    trace!(ciphertext_len = encrypted.len(), "encrypted");

    String::from_utf8(encrypted).map_err(|e| VaultError::Encrypt(format!("UTF-8 error: {}", e)).into())
}

/// Decrypt an armored ciphertext with the vault identity.
///
/// # Errors
///
/// Returns `VaultError::Decrypt` if the ciphertext is malformed or was not
/// encrypted to `identity`.
pub fn decrypt(encrypted: &str, identity: &x25519::Identity) -> Result<String> {
    trace!(ciphertext_len = encrypted.len(), "decrypting");

    let reader = age::armor::ArmoredReader::new(encrypted.as_bytes());
    let decryptor = age::Decryptor::new(reader).map_err(|e| VaultError::Decrypt(e.to_string()))?;

    let mut decrypted = Vec::new();
    let mut reader = decryptor
        .decrypt(std::iter::once(identity as &dyn age::Identity))
        .map_err(|e| VaultError::Decrypt(e.to_string()))?;

    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| VaultError::Decrypt(e.to_string()))?;

    String::from_utf8(decrypted).map_err(|e| VaultError::Decrypt(format!("UTF-8 error: {}", e)).into())
}

/// Parse a public key string into an age recipient.
///
/// # Errors
///
/// Returns `VaultError::InvalidIdentity` if the key format is invalid.
pub fn parse_recipient(key: &str) -> Result<x25519::Recipient> {
    key.parse::<x25519::Recipient>()
        .map_err(|_| VaultError::InvalidIdentity(format!("bad recipient: {}", key)).into())
}
