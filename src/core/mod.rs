//! Core library components.
//!
//! Password generation, secret naming, the vault abstraction and the
//! provisioning protocol that ties them together.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod naming;
pub mod password;
pub mod provision;
pub mod types;
pub mod vault;
