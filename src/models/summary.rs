//! Aggregate report summary model.

use serde::Serialize;

/// Final classification of a test, as emitted by the report generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Flaky,
    Skipped,
}

impl TestStatus {
    /// Classify a test by its reported `status` string.
    ///
    /// Returns `None` for anything outside the four recognized values so
    /// the caller can fail loudly instead of miscounting.
    pub fn classify(status: &str) -> Option<Self> {
        match status {
            "expected" => Some(Self::Passed),
            "unexpected" => Some(Self::Failed),
            "flaky" => Some(Self::Flaky),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }

    /// String representation used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Flaky => "flaky",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A suite node from the flattened report tree.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteSummary {
    /// Suite title (usually file name or describe block)
    pub title: String,
    /// Path to test file
    pub file: String,
}

/// A spec from the flattened report tree.
#[derive(Debug, Clone, Serialize)]
pub struct SpecSummary {
    /// Spec title
    pub title: String,
    /// Whether every test in this spec concluded acceptably
    pub ok: bool,
    /// Path to test file
    pub file: String,
    /// Tags attached to the spec
    pub tags: Vec<String>,
}

/// A single test (one spec run against one project).
#[derive(Debug, Clone, Serialize)]
pub struct TestSummary {
    /// Title of the owning spec
    pub title: String,
    /// Execution environment label (browser/engine name)
    pub project_name: String,
    /// Final classification
    pub status: TestStatus,
    /// Total duration across all attempts, in milliseconds
    pub duration: f64,
}

/// Aggregate statistics for one parsed report.
///
/// Built once per parse and read-only afterwards. The four classified
/// lists partition `tests`: their lengths always sum to `tests.len()`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Playwright version that produced the report
    pub version: String,
    /// Total run duration in milliseconds
    pub duration: f64,
    /// Number of workers used by the run
    pub workers: usize,
    /// Number of shards the run was split into
    pub shards: usize,
    /// Distinct test file paths, in first-seen order
    pub files: Vec<String>,
    /// All suite nodes, flattened depth-first
    pub suites: Vec<SuiteSummary>,
    /// All specs, flattened depth-first
    pub specs: Vec<SpecSummary>,
    /// All tests across all specs, in spec order
    pub tests: Vec<TestSummary>,
    /// Tests that passed as expected
    pub passed: Vec<TestSummary>,
    /// Tests that failed
    pub failed: Vec<TestSummary>,
    /// Tests that passed only after failing attempts
    pub flaky: Vec<TestSummary>,
    /// Tests that were skipped
    pub skipped: Vec<TestSummary>,
}
