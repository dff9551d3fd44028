//! Provision command.

use tracing::info;

use crate::cli::{output, Context, ProvisionArgs};
use crate::core::provision::{BatchSpec, Outcome, Provisioner, ProvisioningReport};
use crate::core::vault::FileVault;
use crate::error::{Error, Result};

/// Provision passwords for a batch of VMs.
///
/// Per-item failures are printed and leave the exit status alone unless
/// `--fail-on-error` or `provision.fail_on_error` is set.
pub fn execute(ctx: &Context, args: &ProvisionArgs) -> Result<()> {
    let spec = ctx.config.generation_spec(args.length)?;
    let keys = ctx.config.key_store()?;
    let vault = FileVault::open(&args.key_vault_name, &ctx.vault_dir, &keys)?;

    let batch = BatchSpec::new(
        &args.vm_name_prefix,
        &args.environment_name,
        args.index,
        args.number_of_instances,
        args.pad_left_int,
    )
    .with_generation(spec);

    let workers = args.workers.unwrap_or(ctx.config.provision.workers);
    info!(vault = %args.key_vault_name, workers, "provisioning");

    let report = match Provisioner::new(&vault).workers(workers).provision(&batch) {
        Ok(report) => report,
        Err(e) => {
            // Show what was written before the run stopped.
            if let Error::Aborted { report, .. } = &e {
                show(report, args.json)?;
            }
            return Err(e);
        }
    };

    show(&report, args.json)?;

    let fail_on_error = args.fail_on_error || ctx.config.provision.fail_on_error;
    if fail_on_error && report.has_failures() {
        return Err(Error::Incomplete {
            failed: report.failed(),
            total: report.len(),
        });
    }

    Ok(())
}

fn show(report: &ProvisioningReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &ProvisioningReport) {
    for item in report.items() {
        match item.outcome {
            Outcome::Created => output::success(&format!("created {}", output::key(&item.name))),
            Outcome::Skipped => output::dimmed(&format!("- skipped {} ({})", item.name, item.detail)),
            Outcome::Failed => output::failure(&format!(
                "failed {}: {}",
                output::key(&item.name),
                item.detail
            )),
        }
    }

    output::section(&format!("Vault {}", report.vault()));
    output::kv("created:", report.created());
    output::kv("skipped:", report.skipped());
    output::kv("failed: ", report.failed());
}
