//! Character classes.

use crate::core::constants;

/// An alphabet paired with the minimum number of characters a password
/// must draw from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    chars: Vec<char>,
    min: usize,
}

impl CharacterSet {
    /// Create a set from an alphabet string and a minimum count.
    ///
    /// Duplicate characters are kept, which weights them during sampling.
    pub fn new(chars: &str, min: usize) -> Self {
        Self {
            chars: chars.chars().collect(),
            min,
        }
    }

    /// Lowercase ASCII letters, at least one.
    pub fn lowercase() -> Self {
        Self::new(constants::LOWERCASE, 1)
    }

    /// Uppercase ASCII letters, at least one.
    pub fn uppercase() -> Self {
        Self::new(constants::UPPERCASE, 1)
    }

    /// Decimal digits, at least one.
    pub fn digits() -> Self {
        Self::new(constants::DIGITS, 1)
    }

    /// Symbols, at least one.
    pub fn symbols() -> Self {
        Self::new(constants::SYMBOLS, 1)
    }

    /// The four default classes: lowercase, uppercase, digits, symbols.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::lowercase(),
            Self::uppercase(),
            Self::digits(),
            Self::symbols(),
        ]
    }

    /// Same alphabet with a different minimum count.
    pub fn with_min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn alphabet(&self) -> &[char] {
        &self.chars
    }

    pub fn min_count(&self) -> usize {
        self.min
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether `c` belongs to this alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}
