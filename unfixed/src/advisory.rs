use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A vendor advisory as fetched from the advisory feed. Immutable once
/// decoded; normalization and filtering read from it without modifying it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAdvisory {
    /// Advisory identifier, e.g. "CVE-2016-2148".
    pub name: String,
    /// Single severity label shared by the v2 and v3 scores.
    #[serde(default)]
    pub threat_severity: String,
    #[serde(default)]
    pub cvss: Cvss2,
    #[serde(default)]
    pub cvss3: Cvss3,
    /// Raw CWE field. May be empty, pipe-separated ("CWE-1|CWE-2") or a
    /// parenthesized chain ("(CWE-20->CWE-119)").
    #[serde(default)]
    pub cwe: String,
    /// Free-text detail paragraphs, in publication order.
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub references: Vec<AdvisoryReference>,
    #[serde(default)]
    pub bugzilla: Bugzilla,
    #[serde(default)]
    pub mitigation: String,
    pub public_date: Option<DateTime<Utc>>,
    /// Per-package remediation status entries.
    #[serde(default)]
    pub package_state: Vec<PackageState>,
}

/// CVSS v2 base score and vector, as text. The feed leaves both empty when
/// the vendor never scored the advisory under v2.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cvss2 {
    #[serde(default)]
    pub cvss_base_score: String,
    #[serde(default)]
    pub cvss_scoring_vector: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cvss3 {
    #[serde(default)]
    pub cvss3_base_score: String,
    #[serde(default)]
    pub cvss3_scoring_vector: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryReference {
    #[serde(default)]
    pub reference: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bugzilla {
    /// Bugzilla ticket title, used as the advisory title.
    #[serde(default)]
    pub description: String,
}

/// Remediation status of one package under one advisory on one platform.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageState {
    pub package_name: String,
    /// Platform identifier, e.g. "cpe:/o:redhat:enterprise_linux:7".
    #[serde(default)]
    pub cpe: String,
    /// Vendor fix-state label. Open-ended vocabulary; only "Will not fix"
    /// and "Fix deferred" mean the package is still vulnerable.
    #[serde(default)]
    pub fix_state: String,
}
