//! vmkeys - Idempotent password provisioning for batches of virtual machines.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── provision     # Batch provisioning
//! │   ├── generate      # Print passwords
//! │   ├── vault         # init, list, get
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── password/     # Constrained password generator
//!     ├── naming        # VM identity → secret name
//!     ├── provision/    # Idempotent batch protocol and report
//!     ├── vault/        # SecretVault trait, file and memory backends
//!     ├── cipher        # age encryption of stored values
//!     └── config        # vmkeys.toml management
//! ```
//!
//! # Example
//!
//! ```
//! use vmkeys::core::provision::{BatchSpec, Provisioner};
//! use vmkeys::core::vault::MemoryVault;
//!
//! let vault = MemoryVault::new("kv-prod");
//! let batch = BatchSpec::new("vm", "prod", 1, 3, 3);
//!
//! let report = Provisioner::new(&vault).provision(&batch).unwrap();
//! assert_eq!(report.created(), 3);
//!
//! // A second run finds every secret and writes nothing.
//! let report = Provisioner::new(&vault).provision(&batch).unwrap();
//! assert_eq!(report.skipped(), 3);
//! assert_eq!(vault.writes(), 3);
//! ```

pub mod cli;
pub mod core;
pub mod error;
