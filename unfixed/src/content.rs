use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisory::RawAdvisory;

const SOURCE_LINK_BASE: &str = "https://access.redhat.com/security/cve/";

/// Canonical advisory record: one vendor advisory normalized into the shape
/// shared by every advisory source. Built fresh per advisory and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryContent {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub cvss2_score: f64,
    pub cvss2_vector: String,
    pub cvss2_severity: String,
    pub cvss3_score: f64,
    pub cvss3_vector: String,
    pub cvss3_severity: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cwe_ids: Vec<String>,
    #[serde(default)]
    pub mitigation: String,
    pub published: Option<DateTime<Utc>>,
    pub source_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub link: String,
}

/// Normalize one raw advisory into canonical content. Pure transform; the
/// only failures it can see are unparseable score strings, which collapse
/// to "score unknown" (0.0) rather than propagating.
pub fn normalize(adv: &RawAdvisory) -> AdvisoryContent {
    let (cvss2_score, cvss2_severity) =
        score_and_severity(&adv.cvss.cvss_base_score, &adv.threat_severity);
    let (cvss3_score, cvss3_severity) =
        score_and_severity(&adv.cvss3.cvss3_base_score, &adv.threat_severity);

    AdvisoryContent {
        id: adv.name.clone(),
        title: adv.bugzilla.description.clone(),
        summary: adv.details.join("\n"),
        cvss2_score,
        cvss2_vector: adv.cvss.cvss_scoring_vector.clone(),
        cvss2_severity,
        cvss3_score,
        cvss3_vector: adv.cvss3.cvss3_scoring_vector.clone(),
        cvss3_severity,
        references: adv
            .references
            .iter()
            .map(|r| Reference {
                link: r.reference.clone(),
            })
            .collect(),
        cwe_ids: parse_cwe(&adv.cwe),
        mitigation: adv.mitigation.clone(),
        published: adv.public_date,
        source_link: format!("{SOURCE_LINK_BASE}{}", adv.name),
    }
}

/// Severity is only meaningful alongside a nonzero score; the vendor reuses
/// one threat-severity label for both CVSS versions.
fn score_and_severity(raw_score: &str, threat_severity: &str) -> (f64, String) {
    let score = raw_score.parse::<f64>().unwrap_or(0.0);
    let severity = if score != 0.0 {
        threat_severity.to_string()
    } else {
        String::new()
    };
    (score, severity)
}

/// Split the vendor's composite CWE field into individual identifiers.
/// Pipe-separated fields are split verbatim; otherwise one layer of
/// parentheses is stripped and the chain is split on "->".
fn parse_cwe(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    if raw.contains('|') {
        return raw.split('|').map(String::from).collect();
    }
    let s = raw.strip_prefix('(').unwrap_or(raw);
    let s = s.strip_suffix(')').unwrap_or(s);
    s.split("->").map(String::from).collect()
}
