use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;

/// One installed package as reported by the inventory-collection stage.
/// Version metadata is carried through for display but not interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub release: String,
    #[serde(default)]
    pub arch: String,
}

/// Installed packages keyed by name. Names are unique within a host.
pub type Packages = HashMap<String, InstalledPackage>;

/// Per-host scan state: the inventory produced upstream plus the findings
/// ledger that reconciliation passes mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostScan {
    /// Distribution release string, e.g. "7.9".
    pub release: String,
    #[serde(default)]
    pub packages: Packages,
    #[serde(default)]
    pub findings: Ledger,
}

impl HostScan {
    /// Major version of the release: the text before the first dot.
    pub fn release_major(&self) -> &str {
        release_major(&self.release)
    }
}

pub fn release_major(release: &str) -> &str {
    release.split('.').next().unwrap_or(release)
}
