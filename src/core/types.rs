//! Type aliases for domain concepts.

/// A derived vault secret name (e.g., VM003-PROD-PASSWORD).
pub type SecretName = String;

/// An encrypted secret value (age-armored ciphertext).
pub type EncryptedValue = String;

/// An age public key string (starts with "age1...").
pub type PublicKey = String;
