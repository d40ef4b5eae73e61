use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::advisory::RawAdvisory;
use crate::source::AdvisorySource;

/// A local advisory database. Lookups are synchronous; whatever assembled
/// the store (file load, embedded db, ...) has already done the slow work.
pub trait AdvisoryStore: Send + Sync {
    /// Unfixed advisories for `package` on the given release major,
    /// keyed by advisory id.
    fn unfixed_advisories(
        &self,
        release_major: &str,
        package: &str,
    ) -> HashMap<String, RawAdvisory>;
}

/// [`AdvisorySource`] backed by an optional local store handle. The handle
/// is optional because the caller's configuration decides the mode; asking
/// a handleless source to fetch is a configuration error, not an empty
/// result.
pub struct LocalSource {
    store: Option<Arc<dyn AdvisoryStore>>,
}

impl LocalSource {
    pub fn new(store: Option<Arc<dyn AdvisoryStore>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AdvisorySource for LocalSource {
    #[instrument(skip(self))]
    async fn fetch_unfixed(
        &self,
        release_major: &str,
        package: &str,
    ) -> Result<HashMap<String, RawAdvisory>> {
        let Some(store) = &self.store else {
            bail!("local advisory store is not configured");
        };
        let advisories = store.unfixed_advisories(release_major, package);
        debug!(count = advisories.len(), %package, "looked up unfixed advisories");
        Ok(advisories)
    }

    fn name(&self) -> &str {
        "redhat_api"
    }
}

/// Advisory store loaded from a single JSON file shaped
/// `{major: {package: {advisory_id: advisory}}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct JsonFileStore {
    releases: HashMap<String, HashMap<String, HashMap<String, RawAdvisory>>>,
}

impl JsonFileStore {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read advisory store {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse advisory store {}", path.display()))
    }
}

impl AdvisoryStore for JsonFileStore {
    fn unfixed_advisories(
        &self,
        release_major: &str,
        package: &str,
    ) -> HashMap<String, RawAdvisory> {
        self.releases
            .get(release_major)
            .and_then(|pkgs| pkgs.get(package))
            .cloned()
            .unwrap_or_default()
    }
}
