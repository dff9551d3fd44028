//! Per-item outcomes and the batch report.

use serde::Serialize;

use crate::core::types::SecretName;

/// Terminal state of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Created,
    Skipped,
    Failed,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Created => "created",
            Outcome::Skipped => "skipped",
            Outcome::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result for one derived secret name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub name: SecretName,
    pub outcome: Outcome,
    pub detail: String,
}

impl ItemReport {
    pub fn created(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Created,
            detail: "stored new secret".to_string(),
        }
    }

    pub fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Skipped,
            detail: "already exists".to_string(),
        }
    }

    pub fn failed(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Failed,
            detail: reason.into(),
        }
    }
}

/// Ordered outcomes of one provisioning run, one entry per derived name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningReport {
    vault: String,
    items: Vec<ItemReport>,
    created: usize,
    skipped: usize,
    failed: usize,
}

impl ProvisioningReport {
    pub fn new(vault: &str, items: Vec<ItemReport>) -> Self {
        let count = |o: Outcome| items.iter().filter(|i| i.outcome == o).count();
        Self {
            vault: vault.to_string(),
            created: count(Outcome::Created),
            skipped: count(Outcome::Skipped),
            failed: count(Outcome::Failed),
            items,
        }
    }

    pub fn vault(&self) -> &str {
        &self.vault
    }

    /// Items in derivation order.
    pub fn items(&self) -> &[ItemReport] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
