//! Reconciles distribution-vendor vulnerability advisories against a host's
//! installed-package inventory.
//!
//! One reconciliation pass walks the host's packages, asks an
//! [`AdvisorySource`] for the advisories that remain unfixed for each, and
//! folds the results into the host's findings ledger: raw advisories are
//! normalized into canonical content, their package states filtered against
//! what is actually installed, and the outcome merged per advisory id.

pub mod advisory;
pub mod content;
pub mod filter;
pub mod inventory;
pub mod ledger;
pub mod output;
pub mod remote;
pub mod source;
pub mod status;
pub mod store;

use anyhow::{Context, Result};
use tracing::debug;

pub use advisory::RawAdvisory;
pub use content::{AdvisoryContent, normalize};
pub use inventory::{HostScan, InstalledPackage, Packages};
pub use ledger::{Finding, Ledger};
pub use remote::RemoteSource;
pub use source::AdvisorySource;
pub use status::{PackageStatus, PackageStatuses};
pub use store::{AdvisoryStore, JsonFileStore, LocalSource};

/// Run one reconciliation pass: enrich the host's ledger with everything
/// `source` reports as still unfixed for its installed packages.
///
/// Packages are processed one at a time, in name order. The first fetch or
/// decode failure aborts the pass for the whole host; the ledger keeps
/// whatever was merged before the failure.
pub async fn fill_ledger(scan: &mut HostScan, source: &dyn AdvisorySource) -> Result<()> {
    let major = scan.release_major().to_string();

    let mut names: Vec<String> = scan.packages.keys().cloned().collect();
    names.sort();

    for package in &names {
        let advisories = source
            .fetch_unfixed(&major, package)
            .await
            .with_context(|| format!("fetching unfixed advisories for {package}"))?;
        debug!(%package, count = advisories.len(), "reconciling advisories");

        for raw in advisories.into_values() {
            let current = scan
                .findings
                .get(&raw.name)
                .map(|f| f.affected.clone())
                .unwrap_or_default();
            let affected = filter::unresolved_statuses(
                &current,
                &raw.package_state,
                &scan.packages,
                &scan.release,
            );
            let content = content::normalize(&raw);
            ledger::merge_finding(&mut scan.findings, source.name(), content, affected);
        }
    }
    Ok(())
}
