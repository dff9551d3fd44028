//! vmkeys - Idempotent password provisioning for batches of virtual machines.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vmkeys::cli::output;
use vmkeys::cli::{execute, Cli};
use vmkeys::core::constants;
use vmkeys::error::{Error, VaultError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vmkeys=debug")
        } else {
            EnvFilter::new("vmkeys=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Vault(VaultError::NotInitialized(name)) => {
                Some(format!("run: vmkeys init --key-vault-name {}", name))
            }
            Error::Vault(VaultError::NoIdentity(_)) => {
                Some(format!("set {} to the directory holding the vault key", constants::KEY_DIR_ENV))
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
