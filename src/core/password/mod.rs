//! Constrained random password generation.
//!
//! A [`GenerationSpec`] describes the length and the character classes a
//! password must cover. [`PasswordGenerator`] turns a spec into a
//! [`Password`] using an injected entropy source:
//!
//! ```
//! use vmkeys::core::password::{GenerationSpec, PasswordGenerator};
//!
//! let spec = GenerationSpec::default();
//! let password = PasswordGenerator::from_os().generate(&spec).unwrap();
//! assert_eq!(password.len(), 12);
//! ```
//!
//! Every set contributes at least its minimum count. The remaining
//! characters come from the combined pool, so a set may end up with more
//! than its minimum.

mod charset;
mod generator;
mod spec;

pub use charset::CharacterSet;
pub use generator::{shuffle, Password, PasswordGenerator};
pub use spec::{GenerationSpec, LengthBounds};
