use std::collections::HashMap;

use async_trait::async_trait;

use crate::advisory::RawAdvisory;

/// An advisory feed that can answer "which advisories are still unfixed for
/// this package on this release". Implemented by the remote batch service
/// client and by local stores; the reconciliation pass only sees this trait.
#[async_trait]
pub trait AdvisorySource: Send + Sync {
    /// Fetch every unfixed advisory for `package` on the given release
    /// major version, keyed by advisory id.
    async fn fetch_unfixed(
        &self,
        release_major: &str,
        package: &str,
    ) -> anyhow::Result<HashMap<String, RawAdvisory>>;

    /// Source name, used as the content-map key in findings and in logs.
    fn name(&self) -> &str;
}
