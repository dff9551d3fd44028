//! Command-line interface.

pub mod completions;
pub mod generate;
pub mod output;
pub mod provision;
pub mod vault;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::core::config::Config;
use crate::error::Result;

/// vmkeys - Idempotent password provisioning for VM batches.
#[derive(Parser)]
#[command(
    name = "vmkeys",
    about = "Provision unique VM passwords into a secret vault",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a vmkeys.toml config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding vault files
    #[arg(long, global = true, value_name = "DIR")]
    pub vault_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate and store passwords for a batch of VMs
    Provision(ProvisionArgs),

    /// Print random passwords without touching a vault
    Generate {
        /// Password length
        #[arg(short, long)]
        length: Option<usize>,
        /// Number of passwords to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Create an empty vault and its identity key
    Init {
        /// Vault name
        #[arg(long)]
        key_vault_name: String,
    },

    /// List secret names in a vault
    List {
        /// Vault name
        #[arg(long)]
        key_vault_name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a stored secret
    Get {
        /// Vault name
        #[arg(long)]
        key_vault_name: String,
        /// Secret name (e.g., VM001-PROD-PASSWORD)
        name: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `vmkeys provision`.
#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Vault to store passwords in
    #[arg(long)]
    pub key_vault_name: String,

    /// VM name prefix (e.g., "vm")
    #[arg(long)]
    pub vm_name_prefix: String,

    /// Environment name (e.g., "prod")
    #[arg(long)]
    pub environment_name: String,

    /// First sequence number
    #[arg(long)]
    pub index: u64,

    /// Number of VMs
    #[arg(long)]
    pub number_of_instances: u64,

    /// Zero-pad width of the sequence number
    #[arg(long)]
    pub pad_left_int: usize,

    /// Password length (overrides config)
    #[arg(long)]
    pub length: Option<usize>,

    /// Concurrent workers (overrides config)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Exit non-zero if any item fails
    #[arg(long)]
    pub fail_on_error: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub vault_dir: PathBuf,
}

impl Context {
    /// Load config and resolve the vault directory.
    pub fn load(config: Option<&Path>, vault_dir: Option<&Path>) -> Result<Self> {
        let config = Config::load(config)?;
        let vault_dir = config.vault_dir(vault_dir);
        Ok(Self { config, vault_dir })
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    // Completions run without loading config.
    if let Command::Completions { shell } = &cli.command {
        return completions::execute(shell.clone());
    }

    let ctx = Context::load(cli.config.as_deref(), cli.vault_dir.as_deref())?;

    match cli.command {
        Command::Provision(args) => provision::execute(&ctx, &args),
        Command::Generate { length, count } => generate::execute(&ctx, length, count),
        Command::Init { key_vault_name } => vault::init(&ctx, &key_vault_name),
        Command::List {
            key_vault_name,
            json,
        } => vault::list(&ctx, &key_vault_name, json),
        Command::Get {
            key_vault_name,
            name,
        } => vault::get(&ctx, &key_vault_name, &name),
        Command::Completions { shell } => completions::execute(shell),
    }
}
