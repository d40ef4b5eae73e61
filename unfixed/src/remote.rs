use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::advisory::RawAdvisory;
use crate::source::AdvisorySource;

/// Client for the remote advisory batch service.
///
/// The service answers `GET {base}/redhat/{major}/pkgs/{package}` with one
/// or more newline-delimited JSON-object fragments, each mapping advisory
/// id to advisory. Fragments are decoded independently and unioned; a
/// decode failure on any fragment aborts the whole fetch.
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AdvisorySource for RemoteSource {
    #[instrument(skip(self))]
    async fn fetch_unfixed(
        &self,
        release_major: &str,
        package: &str,
    ) -> Result<HashMap<String, RawAdvisory>> {
        let url = format!("{}/redhat/{release_major}/pkgs/{package}", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{url} returned HTTP {status}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body from {url}"))?;

        let advisories = merge_fragments(&body)
            .with_context(|| format!("failed to decode advisories from {url}"))?;
        debug!(count = advisories.len(), %package, "fetched unfixed advisories");
        Ok(advisories)
    }

    fn name(&self) -> &str {
        "redhat_api"
    }
}

/// Union the response fragments into one id -> advisory map. Later
/// fragments win on duplicate ids.
fn merge_fragments(body: &str) -> Result<HashMap<String, RawAdvisory>> {
    let mut merged = HashMap::new();
    for fragment in body.lines().filter(|l| !l.trim().is_empty()) {
        let advisories: HashMap<String, RawAdvisory> =
            serde_json::from_str(fragment).context("malformed advisory fragment")?;
        merged.extend(advisories);
    }
    Ok(merged)
}
