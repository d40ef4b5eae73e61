use crate::ledger::{Finding, Ledger};

pub trait OutputFormatter {
    fn write_ledger(
        &self,
        ledger: &Ledger,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()>;
}

pub struct TextOutput;

/// Severity to display for a finding: the first non-blank severity across
/// its content slots, preferring v3 over v2.
fn display_severity(finding: &Finding) -> &str {
    finding
        .contents
        .values()
        .flat_map(|c| [c.cvss3_severity.as_str(), c.cvss2_severity.as_str()])
        .find(|s| !s.is_empty())
        .unwrap_or("unknown")
}

impl OutputFormatter for TextOutput {
    fn write_ledger(
        &self,
        ledger: &Ledger,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        if ledger.is_empty() {
            writeln!(writer, "no unresolved advisories")?;
            return Ok(());
        }

        for finding in ledger.values() {
            writeln!(writer, "{} ({})", finding.advisory_id, display_severity(finding))?;

            if let Some(content) = finding.contents.values().next() {
                if !content.title.is_empty() {
                    writeln!(writer, "  {}", content.title)?;
                }
                writeln!(writer, "  {}", content.source_link)?;
            }

            for status in finding.affected.iter() {
                writeln!(writer, "  affected: {} ({})", status.name, status.fix_state)?;
            }
        }
        Ok(())
    }
}

pub struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn write_ledger(
        &self,
        ledger: &Ledger,
        writer: &mut dyn std::io::Write,
    ) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, ledger)?;
        writeln!(writer)?;
        Ok(())
    }
}

pub fn formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput)
    } else {
        Box::new(TextOutput)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::content::AdvisoryContent;
    use crate::ledger::{Confidence, merge_finding};
    use crate::status::{PackageStatus, PackageStatuses};

    fn sample_ledger() -> Ledger {
        let content = AdvisoryContent {
            id: "CVE-2016-2148".to_string(),
            title: "busybox: heap overflow in DHCP".to_string(),
            summary: "Heap overflow.".to_string(),
            cvss2_score: 6.8,
            cvss2_vector: "AV:N/AC:M/Au:N/C:P/I:P/A:P".to_string(),
            cvss2_severity: "Moderate".to_string(),
            cvss3_score: 0.0,
            cvss3_vector: String::new(),
            cvss3_severity: String::new(),
            references: vec![],
            cwe_ids: vec!["CWE-122".to_string()],
            mitigation: String::new(),
            published: None,
            source_link: "https://access.redhat.com/security/cve/CVE-2016-2148".to_string(),
        };
        let affected: PackageStatuses = [PackageStatus {
            name: "busybox".to_string(),
            fix_state: "Will not fix".to_string(),
            not_fixed_yet: true,
        }]
        .into_iter()
        .collect();

        let mut ledger = Ledger::new();
        merge_finding(&mut ledger, "redhat_api", content, affected);
        ledger
    }

    #[test]
    fn text_output_lists_finding_and_affected_package() {
        let mut buf = Vec::new();
        TextOutput.write_ledger(&sample_ledger(), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("CVE-2016-2148 (Moderate)"));
        assert!(output.contains("  busybox: heap overflow in DHCP"));
        assert!(output.contains("  affected: busybox (Will not fix)"));
        assert!(output.contains("https://access.redhat.com/security/cve/CVE-2016-2148"));
    }

    #[test]
    fn text_output_empty_ledger() {
        let mut buf = Vec::new();
        TextOutput.write_ledger(&Ledger::new(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "no unresolved advisories\n"
        );
    }

    #[test]
    fn severity_prefers_v3_when_present() {
        let mut ledger = sample_ledger();
        let finding = ledger.get_mut("CVE-2016-2148").unwrap();
        let content = finding.contents.get_mut("redhat_api").unwrap();
        content.cvss3_score = 8.1;
        content.cvss3_severity = "Important".to_string();

        let mut buf = Vec::new();
        TextOutput.write_ledger(&ledger, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("(Important)"));
    }

    #[test]
    fn severity_falls_back_to_unknown() {
        let mut ledger = Ledger::new();
        ledger.insert(
            "CVE-2024-0001".to_string(),
            crate::ledger::Finding {
                advisory_id: "CVE-2024-0001".to_string(),
                contents: BTreeMap::new(),
                confidences: BTreeSet::from([Confidence::VendorAdvisoryMatch]),
                affected: PackageStatuses::new(),
            },
        );

        let mut buf = Vec::new();
        TextOutput.write_ledger(&ledger, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("(unknown)"));
    }

    #[test]
    fn json_output_round_trips_the_ledger() {
        let mut buf = Vec::new();
        JsonOutput.write_ledger(&sample_ledger(), &mut buf).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&buf).unwrap();

        let finding = &parsed["CVE-2016-2148"];
        assert_eq!(finding["contents"]["redhat_api"]["cvss2_score"], 6.8);
        assert_eq!(finding["affected"]["busybox"]["not_fixed_yet"], true);
        assert_eq!(finding["confidences"][0], "vendor_advisory_match");
    }

    #[test]
    fn factory_selects_format() {
        let mut buf = Vec::new();
        formatter(true).write_ledger(&sample_ledger(), &mut buf).unwrap();
        serde_json::from_slice::<serde_json::Value>(&buf).unwrap();

        let mut buf = Vec::new();
        formatter(false).write_ledger(&sample_ledger(), &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().starts_with("CVE-2016-2148"));
    }
}
