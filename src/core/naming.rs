//! VM identities and derived secret names.
//!
//! A secret name is the join key between what should exist and what the
//! vault holds, so it must come out identical on every run:
//!
//! ```text
//! uppercase(prefix + zero_pad(sequence, width) + "-" + environment + "-password")
//! ```

use crate::core::constants;
use crate::core::types::SecretName;
use crate::error::{Result, ValidationError};

/// One VM in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmIdentity {
    prefix: String,
    sequence: u64,
    pad_width: usize,
    environment: String,
}

impl VmIdentity {
    pub fn new(prefix: &str, sequence: u64, pad_width: usize, environment: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            sequence,
            pad_width,
            environment: environment.to_string(),
        }
    }

    /// VM name as given: prefix followed by the zero-padded sequence number.
    pub fn vm_name(&self) -> String {
        format!(
            "{}{:0width$}",
            self.prefix,
            self.sequence,
            width = self.pad_width
        )
    }

    /// Vault secret name for this VM.
    pub fn secret_name(&self) -> SecretName {
        format!(
            "{}-{}-{}",
            self.vm_name(),
            self.environment,
            constants::SECRET_NAME_SUFFIX
        )
        .to_uppercase()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Identities for sequence numbers `start..start + count`, in order.
///
/// # Errors
///
/// Returns `ValidationError::SequenceOverflow` if the range does not fit
/// in a `u64`.
pub fn derive(
    prefix: &str,
    environment: &str,
    start: u64,
    count: u64,
    pad_width: usize,
) -> Result<Vec<VmIdentity>> {
    let end = start
        .checked_add(count)
        .ok_or(ValidationError::SequenceOverflow { start, count })?;

    Ok((start..end)
        .map(|sequence| VmIdentity::new(prefix, sequence, pad_width, environment))
        .collect())
}
