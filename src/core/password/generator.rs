//! Password generation.

use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

use super::GenerationSpec;
use crate::error::{EntropyError, Result};

/// A generated password.
///
/// The buffer is wiped on drop and `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Generates passwords from an injected secure entropy source.
///
/// Each call to [`PasswordGenerator::generate`] draws one 32-byte seed from
/// the source and runs a `StdRng` from it for the per-character draws.
pub struct PasswordGenerator<S = OsRng> {
    source: S,
}

impl PasswordGenerator<OsRng> {
    /// Generator backed by the operating system CSPRNG.
    pub fn from_os() -> Self {
        Self::new(OsRng)
    }
}

impl<S: RngCore + CryptoRng> PasswordGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Generate one password.
    ///
    /// Draws `min_count` characters from every set in order, fills the rest
    /// from the combined pool, then shuffles the whole buffer so the
    /// guaranteed characters do not sit at fixed positions.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `spec` is malformed, or
    /// `EntropyError::Unavailable` if the source cannot produce a seed.
    pub fn generate(&mut self, spec: &GenerationSpec) -> Result<Password> {
        spec.validate()?;

        let mut rng = StdRng::from_rng(&mut self.source)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))?;

        let length = spec.length();
        let mut buf: Vec<char> = Vec::with_capacity(length);

        for set in spec.sets() {
            for _ in 0..set.min_count() {
                buf.push(sample(&mut rng, set.alphabet()));
            }
        }

        let pool = spec.pool();
        while buf.len() < length {
            buf.push(sample(&mut rng, &pool));
        }

        shuffle(&mut buf, &mut rng);

        let password = Password(Zeroizing::new(buf.iter().collect()));
        buf.zeroize();

        trace!(length, sets = spec.sets().len(), "generated password");
        Ok(password)
    }
}

/// Uniform draw from a non-empty alphabet.
fn sample<R: Rng + ?Sized>(rng: &mut R, alphabet: &[char]) -> char {
    alphabet[rng.gen_range(0..alphabet.len())]
}

/// Fisher-Yates shuffle.
///
/// For `i` from `len` down to 1, swaps position `i - 1` with a uniform
/// `j` in `[0, i)`. Every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..=items.len()).rev() {
        let j = rng.gen_range(0..i);
        items.swap(i - 1, j);
    }
}
