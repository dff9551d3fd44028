//! Generation constraints and their validation.

use super::CharacterSet;
use crate::core::constants;
use crate::error::{Result, ValidationError};

/// Inclusive bounds on password length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    min: usize,
    max: usize,
}

impl LengthBounds {
    /// Create bounds, rejecting `min == 0` or `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 || min > max {
            return Err(ValidationError::InvalidBounds { min, max }.into());
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, length: usize) -> bool {
        (self.min..=self.max).contains(&length)
    }
}

impl Default for LengthBounds {
    /// `8..=255`.
    fn default() -> Self {
        Self {
            min: constants::MIN_LENGTH,
            max: constants::MAX_LENGTH,
        }
    }
}

/// Everything needed to generate one password.
///
/// Constructors validate, so a `GenerationSpec` in hand is always usable.
/// [`GenerationSpec::validate`] is still public because the generator
/// re-checks its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSpec {
    length: usize,
    sets: Vec<CharacterSet>,
    bounds: LengthBounds,
}

impl GenerationSpec {
    /// Build a spec with the default length bounds.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the length is out of bounds, a set is
    /// empty, or the minimum counts add up to more than `length`.
    pub fn new(length: usize, sets: Vec<CharacterSet>) -> Result<Self> {
        Self::with_bounds(length, sets, LengthBounds::default())
    }

    /// Build a spec with explicit length bounds.
    pub fn with_bounds(length: usize, sets: Vec<CharacterSet>, bounds: LengthBounds) -> Result<Self> {
        let spec = Self {
            length,
            sets,
            bounds,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Build a spec from parallel lists of alphabets and minimum counts.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::CountMismatch` if the lists differ in
    /// length, plus everything [`GenerationSpec::new`] checks.
    pub fn from_parts(length: usize, alphabets: &[&str], min_counts: &[usize]) -> Result<Self> {
        if alphabets.len() != min_counts.len() {
            return Err(ValidationError::CountMismatch {
                sets: alphabets.len(),
                counts: min_counts.len(),
            }
            .into());
        }
        let sets = alphabets
            .iter()
            .zip(min_counts)
            .map(|(chars, &min)| CharacterSet::new(chars, min))
            .collect();
        Self::new(length, sets)
    }

    /// The four default classes at a custom length.
    pub fn with_length(length: usize) -> Result<Self> {
        Self::new(length, CharacterSet::defaults())
    }

    /// Check every constraint.
    pub fn validate(&self) -> Result<()> {
        if !self.bounds.contains(self.length) {
            return Err(ValidationError::LengthOutOfRange {
                length: self.length,
                min: self.bounds.min(),
                max: self.bounds.max(),
            }
            .into());
        }

        if self.sets.is_empty() {
            return Err(ValidationError::NoCharacterSets.into());
        }

        if let Some(i) = self.sets.iter().position(CharacterSet::is_empty) {
            return Err(ValidationError::EmptyCharacterSet(i).into());
        }

        let required = self.required();
        if required > self.length {
            return Err(ValidationError::MinCountsExceedLength {
                required,
                length: self.length,
            }
            .into());
        }

        Ok(())
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn sets(&self) -> &[CharacterSet] {
        &self.sets
    }

    pub fn bounds(&self) -> LengthBounds {
        self.bounds
    }

    /// Sum of all minimum counts.
    pub fn required(&self) -> usize {
        self.sets
            .iter()
            .fold(0usize, |acc, s| acc.saturating_add(s.min_count()))
    }

    /// All alphabets concatenated in set order.
    pub fn pool(&self) -> Vec<char> {
        self.sets
            .iter()
            .flat_map(|s| s.alphabet().iter().copied())
            .collect()
    }
}

impl Default for GenerationSpec {
    /// Length 12, one each of lowercase, uppercase, digit and symbol.
    fn default() -> Self {
        Self {
            length: constants::DEFAULT_LENGTH,
            sets: CharacterSet::defaults(),
            bounds: LengthBounds::default(),
        }
    }
}
