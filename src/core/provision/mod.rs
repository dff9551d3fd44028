//! Idempotent batch provisioning.
//!
//! The provisioner derives one secret name per VM, lists the vault once,
//! and writes a fresh password only for names the vault does not already
//! hold. Existing secrets are never read or replaced, so running the same
//! batch twice writes nothing the second time.
//!
//! A failed write is recorded against its item and the batch carries on.
//! Listing failures and entropy failures end the run; after an entropy
//! failure the items already finished still come back inside the error.

mod report;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

use crate::core::naming::{self, VmIdentity};
use crate::core::password::{GenerationSpec, Password, PasswordGenerator};
use crate::core::types::SecretName;
use crate::core::vault::SecretVault;
use crate::error::{Error, Result};

pub use report::{ItemReport, Outcome, ProvisioningReport};

/// What to provision.
#[derive(Debug, Clone)]
pub struct BatchSpec {
    pub vm_prefix: String,
    pub environment: String,
    pub start: u64,
    pub count: u64,
    pub pad_width: usize,
    pub generation: GenerationSpec,
}

impl BatchSpec {
    /// Batch using the default generation spec.
    pub fn new(vm_prefix: &str, environment: &str, start: u64, count: u64, pad_width: usize) -> Self {
        Self {
            vm_prefix: vm_prefix.to_string(),
            environment: environment.to_string(),
            start,
            count,
            pad_width,
            generation: GenerationSpec::default(),
        }
    }

    pub fn with_generation(mut self, generation: GenerationSpec) -> Self {
        self.generation = generation;
        self
    }

    /// VM identities in sequence order.
    pub fn identities(&self) -> Result<Vec<VmIdentity>> {
        naming::derive(
            &self.vm_prefix,
            &self.environment,
            self.start,
            self.count,
            self.pad_width,
        )
    }

    /// Secret names in sequence order.
    pub fn secret_names(&self) -> Result<Vec<SecretName>> {
        Ok(self
            .identities()?
            .iter()
            .map(VmIdentity::secret_name)
            .collect())
    }
}

/// Runs a [`BatchSpec`] against a vault.
pub struct Provisioner<'v, V: ?Sized, S = OsRng> {
    vault: &'v V,
    generator: Mutex<PasswordGenerator<S>>,
    workers: usize,
}

impl<'v, V: SecretVault + Sync + ?Sized> Provisioner<'v, V, OsRng> {
    /// Provisioner using the operating system CSPRNG, one worker.
    pub fn new(vault: &'v V) -> Self {
        Self::with_generator(vault, PasswordGenerator::from_os())
    }
}

impl<'v, V, S> Provisioner<'v, V, S>
where
    V: SecretVault + Sync + ?Sized,
    S: RngCore + CryptoRng + Send,
{
    pub fn with_generator(vault: &'v V, generator: PasswordGenerator<S>) -> Self {
        Self {
            vault,
            generator: Mutex::new(generator),
            workers: 1,
        }
    }

    /// Number of concurrent generate-and-store workers. Zero is treated as one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Provision every secret in the batch that the vault does not hold yet.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the batch is malformed and `VaultError`
    /// if the vault cannot be listed. If a password cannot be generated the
    /// run stops with `Error::Aborted`, whose report lists the items already
    /// finished. Per-item write failures are reported, not returned.
    pub fn provision(&self, batch: &BatchSpec) -> Result<ProvisioningReport> {
        batch.generation.validate()?;
        let names = batch.secret_names()?;

        let existing = self.vault.list_secrets()?;
        debug!(
            vault = self.vault.name(),
            derived = names.len(),
            existing = existing.len(),
            workers = self.workers,
            "provisioning batch"
        );

        let results = if self.workers == 1 || names.len() < 2 {
            self.provision_sequential(&names, &existing, &batch.generation)
        } else {
            self.provision_parallel(&names, &existing, &batch.generation)
        };

        self.finish(names.len(), results)
    }

    /// Fold item results into a report. The first fatal error becomes
    /// `Error::Aborted` carrying every item that did finish.
    fn finish(
        &self,
        total: usize,
        results: Vec<Result<ItemReport>>,
    ) -> Result<ProvisioningReport> {
        let mut items = Vec::with_capacity(results.len());
        let mut fatal = None;
        for result in results {
            match result {
                Ok(item) => items.push(item),
                Err(e) => {
                    fatal.get_or_insert(e);
                }
            }
        }

        let report = ProvisioningReport::new(self.vault.name(), items);
        if let Some(source) = fatal {
            warn!(
                created = report.created(),
                skipped = report.skipped(),
                failed = report.failed(),
                total,
                error = %source,
                "batch aborted"
            );
            return Err(Error::Aborted {
                report: Box::new(report),
                total,
                source: Box::new(source),
            });
        }

        info!(
            created = report.created(),
            skipped = report.skipped(),
            failed = report.failed(),
            "batch complete"
        );
        Ok(report)
    }

    /// One item at a time, stopping at the first fatal error.
    fn provision_sequential(
        &self,
        names: &[SecretName],
        existing: &BTreeSet<SecretName>,
        spec: &GenerationSpec,
    ) -> Vec<Result<ItemReport>> {
        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let result = self.provision_one(name, existing, spec);
            let stop = result.is_err();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    }

    /// Workers pull indices from a shared cursor; results are put back in
    /// derivation order afterwards.
    fn provision_parallel(
        &self,
        names: &[SecretName],
        existing: &BTreeSet<SecretName>,
        spec: &GenerationSpec,
    ) -> Vec<Result<ItemReport>> {
        let cursor = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let workers = self.workers.min(names.len());

        let mut results: Vec<(usize, Result<ItemReport>)> = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let cursor = &cursor;
                    let abort = &abort;
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        while !abort.load(Ordering::SeqCst) {
                            let i = cursor.fetch_add(1, Ordering::SeqCst);
                            let Some(name) = names.get(i) else {
                                break;
                            };
                            let result = self.provision_one(name, existing, spec);
                            if result.is_err() {
                                abort.store(true, Ordering::SeqCst);
                            }
                            done.push((i, result));
                        }
                        done
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        results.sort_by_key(|(i, _)| *i);
        results.into_iter().map(|(_, r)| r).collect()
    }

    /// Pending → Skipped | Created | Failed.
    fn provision_one(
        &self,
        name: &str,
        existing: &BTreeSet<SecretName>,
        spec: &GenerationSpec,
    ) -> Result<ItemReport> {
        if existing.contains(name) {
            info!(secret = name, "skipped: already exists");
            return Ok(ItemReport::skipped(name));
        }

        let password = self.generate(spec)?;

        match self.vault.set_secret(name, password.as_str()) {
            Ok(()) => {
                info!(secret = name, "created");
                Ok(ItemReport::created(name))
            }
            Err(e) => {
                warn!(secret = name, error = %e, "failed to store secret");
                Ok(ItemReport::failed(name, e.to_string()))
            }
        }
    }

    fn generate(&self, spec: &GenerationSpec) -> Result<Password> {
        self.generator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generate(spec)
    }
}
