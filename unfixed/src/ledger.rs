use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::content::AdvisoryContent;
use crate::status::PackageStatuses;

/// How a finding was established. Accumulated on first sight of an advisory
/// and left untouched by later passes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Matched against the vendor advisory feed for this distribution.
    VendorAdvisoryMatch,
}

/// One advisory as it applies to one host: canonical content per source,
/// how the match was made, and which installed packages are still affected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub advisory_id: String,
    /// One content slot per advisory source, keyed by source name. The same
    /// advisory reported by several vendors keeps every vendor's content.
    pub contents: BTreeMap<String, AdvisoryContent>,
    pub confidences: BTreeSet<Confidence>,
    #[serde(default, skip_serializing_if = "PackageStatuses::is_empty")]
    pub affected: PackageStatuses,
}

/// The host's vulnerability ledger, keyed by advisory id. Owned by the
/// [`HostScan`](crate::inventory::HostScan) and mutated only through
/// [`merge_finding`].
pub type Ledger = BTreeMap<String, Finding>;

/// Fold one normalized advisory into the ledger.
///
/// First sight of an advisory id creates the finding; later sightings from
/// other sources fill their own content slot without disturbing the rest.
/// The affected set is only replaced when the new one is non-empty, so a
/// pass that resolves to zero affected packages never erases what an
/// earlier pass recorded.
pub fn merge_finding(
    ledger: &mut Ledger,
    source: &str,
    content: AdvisoryContent,
    affected: PackageStatuses,
) {
    let finding = ledger
        .entry(content.id.clone())
        .or_insert_with(|| Finding {
            advisory_id: content.id.clone(),
            contents: BTreeMap::new(),
            confidences: BTreeSet::from([Confidence::VendorAdvisoryMatch]),
            affected: PackageStatuses::new(),
        });

    finding.contents.insert(source.to_string(), content);
    if !affected.is_empty() {
        finding.affected = affected;
    }
}
