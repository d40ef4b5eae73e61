use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Remediation status of one installed package under one advisory, as it
/// applies to this host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageStatus {
    pub name: String,
    /// The exact vendor fix-state label, e.g. "Will not fix".
    pub fix_state: String,
    pub not_fixed_yet: bool,
}

/// Statuses keyed by package name. `store` is a last-write-wins upsert:
/// a second status for the same package replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageStatuses(BTreeMap<String, PackageStatus>);

impl PackageStatuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, status: PackageStatus) {
        self.0.insert(status.name.clone(), status);
    }

    pub fn get(&self, name: &str) -> Option<&PackageStatus> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageStatus> {
        self.0.values()
    }
}

impl FromIterator<PackageStatus> for PackageStatuses {
    fn from_iter<I: IntoIterator<Item = PackageStatus>>(iter: I) -> Self {
        let mut statuses = Self::new();
        for status in iter {
            statuses.store(status);
        }
        statuses
    }
}
