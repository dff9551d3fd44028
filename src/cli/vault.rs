//! Vault commands: init, list, get.

use tracing::info;

use crate::cli::{output, Context};
use crate::core::vault::{FileVault, SecretVault};
use crate::error::{Result, VaultError};

/// Create an empty vault.
pub fn init(ctx: &Context, name: &str) -> Result<()> {
    info!("Initializing vault: {}", name);
    let keys = ctx.config.key_store()?;
    let vault = FileVault::init(name, &ctx.vault_dir, &keys)?;

    output::success(&format!("initialized vault {}", output::key(name)));
    output::kv("file:     ", vault.path().display());
    output::kv("recipient:", vault.recipient());
    Ok(())
}

/// List secret names.
pub fn list(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let keys = ctx.config.key_store()?;
    let vault = FileVault::open(name, &ctx.vault_dir, &keys)?;
    let secrets = vault.list_secrets()?;

    if json {
        let result = serde_json::json!({
            "vault": name,
            "secrets": secrets,
            "count": secrets.len()
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if secrets.is_empty() {
        output::dimmed("no secrets stored");
    } else {
        println!();
        output::header(&format!("{} secrets", secrets.len()));
        output::rule();
        for secret in &secrets {
            output::list_item(secret);
        }
    }

    Ok(())
}

/// Print one secret value.
pub fn get(ctx: &Context, name: &str, secret: &str) -> Result<()> {
    let keys = ctx.config.key_store()?;
    let vault = FileVault::open(name, &ctx.vault_dir, &keys)?;
    let value = vault
        .get_secret(secret)?
        .ok_or_else(|| VaultError::SecretNotFound(secret.to_string()))?;
    // Plain output for scripting - no decoration
    println!("{}", value.as_str());
    Ok(())
}
