//! Markdown rendering of report summaries.
//!
//! Produces the body of the pull request comment. Rendering is a pure
//! function of the summary and options: identical input yields
//! byte-identical output.

use crate::models::ReportSummary;

/// Presentation options for a rendered summary.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Heading text for the output block
    pub title: String,
    /// Optional hyperlink to a hosted HTML report
    pub report_url: Option<String>,
    /// Optional short identifier of the commit under test
    pub commit: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            title: "Test Report".to_string(),
            report_url: None,
            commit: None,
        }
    }
}

/// Render a report summary as a markdown block.
pub fn render_report_summary(summary: &ReportSummary, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("### {}\n\n", options.title));

    let verdict = if summary.failed.is_empty() {
        "✅"
    } else {
        "❌"
    };
    out.push_str(&format!(
        "{} **{}** tests ran in {}\n\n",
        verdict,
        summary.tests.len(),
        format_duration(summary.duration)
    ));

    out.push_str(&format!("- ✅ **{}** passed\n", summary.passed.len()));
    out.push_str(&format!("- ❌ **{}** failed\n", summary.failed.len()));
    out.push_str(&format!("- ⚠️ **{}** flaky\n", summary.flaky.len()));
    out.push_str(&format!("- ⏭️ **{}** skipped\n", summary.skipped.len()));
    out.push('\n');

    out.push_str(&format!(
        "Run across **{}** {} with **{}** {}.\n",
        summary.shards,
        plural(summary.shards, "shard", "shards"),
        summary.workers,
        plural(summary.workers, "worker", "workers")
    ));

    if let Some(url) = &options.report_url {
        out.push_str(&format!("\n[Open full report ↗︎]({})\n", url));
    }

    if let Some(commit) = &options.commit {
        out.push_str(&format!("\nResults for commit `{}`.\n", commit));
    }

    out
}

/// Format a millisecond duration for display.
fn format_duration(ms: f64) -> String {
    if ms >= 60_000.0 {
        let minutes = (ms / 60_000.0).floor();
        let seconds = (ms - minutes * 60_000.0) / 1000.0;
        format!("{}m {:.0}s", minutes, seconds)
    } else if ms >= 1000.0 {
        format!("{:.1}s", ms / 1000.0)
    } else {
        format!("{:.0}ms", ms)
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TestStatus, TestSummary};

    fn test_entry(status: TestStatus) -> TestSummary {
        TestSummary {
            title: "some spec".to_string(),
            project_name: "chromium".to_string(),
            status,
            duration: 100.0,
        }
    }

    fn sample_summary() -> ReportSummary {
        let passed = vec![test_entry(TestStatus::Passed); 3];
        let failed = vec![test_entry(TestStatus::Failed)];
        let mut tests = passed.clone();
        tests.extend(failed.clone());

        ReportSummary {
            version: "1.37.1".to_string(),
            duration: 1118.34,
            workers: 5,
            shards: 2,
            files: vec!["a.spec.ts".to_string()],
            suites: Vec::new(),
            specs: Vec::new(),
            tests,
            passed,
            failed,
            flaky: Vec::new(),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_render_includes_counts_and_context() {
        let options = RenderOptions {
            title: "Test Report".to_string(),
            report_url: Some("https://example.com/report".to_string()),
            commit: Some("1234567".to_string()),
        };

        let output = render_report_summary(&sample_summary(), &options);

        assert_eq!(
            output,
            "### Test Report\n\
             \n\
             ❌ **4** tests ran in 1.1s\n\
             \n\
             - ✅ **3** passed\n\
             - ❌ **1** failed\n\
             - ⚠️ **0** flaky\n\
             - ⏭️ **0** skipped\n\
             \n\
             Run across **2** shards with **5** workers.\n\
             \n\
             [Open full report ↗︎](https://example.com/report)\n\
             \n\
             Results for commit `1234567`.\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let options = RenderOptions::default();
        let summary = sample_summary();

        assert_eq!(
            render_report_summary(&summary, &options),
            render_report_summary(&summary, &options)
        );
    }

    #[test]
    fn test_render_degrades_without_optional_fields() {
        let options = RenderOptions {
            title: "Test Report".to_string(),
            report_url: None,
            commit: None,
        };

        let output = render_report_summary(&sample_summary(), &options);

        assert!(!output.contains("Open full report"));
        assert!(!output.contains("commit"));
        assert!(!output.contains("()"));
        assert!(!output.contains("[]"));
        assert!(output.ends_with("Run across **2** shards with **5** workers.\n"));
    }

    #[test]
    fn test_format_duration_ranges() {
        assert_eq!(format_duration(943.0), "943ms");
        assert_eq!(format_duration(1118.34), "1.1s");
        assert_eq!(format_duration(61_500.0), "1m 2s");
    }
}
