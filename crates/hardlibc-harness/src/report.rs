//! Human-readable conformance report generation.

use crate::runner::VerificationResult;

/// Renders a markdown report over per-family verification results.
pub fn render_markdown(campaign: &str, families: &[(String, Vec<VerificationResult>)]) -> String {
    let total: usize = families.iter().map(|(_, results)| results.len()).sum();
    let passed: usize = families
        .iter()
        .map(|(_, results)| results.iter().filter(|r| r.passed).count())
        .sum();

    let mut out = String::new();
    out.push_str(&format!("# Conformance report: {campaign}\n\n"));
    out.push_str(&format!("{passed}/{total} cases passed.\n\n"));

    for (family, results) in families {
        out.push_str(&format!("## {family}\n\n"));
        out.push_str("| case | section | status |\n|---|---|---|\n");
        for result in results {
            let status = if result.passed { "pass" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                result.case_name, result.spec_section, status
            ));
        }
        out.push('\n');
        for result in results.iter().filter(|r| !r.passed) {
            out.push_str(&format!("### {} (failed)\n\n```diff\n", result.case_name));
            out.push_str(result.diff.as_deref().unwrap_or(""));
            out.push_str("\n```\n\n");
        }
    }
    out
}
