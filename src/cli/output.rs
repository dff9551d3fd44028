//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: created, success
//! - Red: errors, failed items
//! - Cyan: secret names, hints
//! - Dimmed: skipped items, secondary info

use console::style;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ created VM001-PROD-PASSWORD`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print a failure line to stdout (red cross).
///
/// Used for per-item failures that do not end the command.
pub fn failure(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✗").red(), msg);
    } else {
        println!("✗ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ vault not initialized: kv-prod`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: vmkeys init --key-vault-name kv-prod`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  vault:  kv-prod`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a horizontal rule separator.
pub fn rule() {
    if colors_enabled() {
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Format a secret name in cyan.
pub fn key(k: &str) -> String {
    if colors_enabled() {
        style(k).cyan().to_string()
    } else {
        k.to_string()
    }
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets stored`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
