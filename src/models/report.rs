//! Playwright JSON report schema.
//!
//! Mirrors the shape of `results.json` as emitted by Playwright's JSON
//! reporter. Collections default to empty so partial reports still decode.

use serde::Deserialize;

/// Root structure of Playwright results.json.
#[derive(Debug, Deserialize)]
pub struct PlaywrightReport {
    pub config: PlaywrightConfig,
    #[serde(default)]
    pub suites: Vec<PlaywrightSuite>,
    #[serde(default, rename = "errors")]
    pub _errors: Vec<serde_json::Value>,
    pub stats: Option<PlaywrightStats>,
}

/// Playwright configuration section.
#[derive(Debug, Deserialize)]
pub struct PlaywrightConfig {
    pub version: Option<String>,
    pub workers: Option<u32>,
    pub shard: Option<PlaywrightShard>,
    pub metadata: Option<PlaywrightMetadata>,
}

/// Shard assignment for a (merged) sharded run.
#[derive(Debug, Deserialize)]
pub struct PlaywrightShard {
    pub total: u32,
    pub current: u32,
}

/// Config metadata; newer Playwright versions record the worker count here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaywrightMetadata {
    pub actual_workers: Option<u32>,
}

/// Playwright stats section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaywrightStats {
    pub start_time: Option<String>,
    pub duration: f64,
    #[serde(default)]
    pub expected: i32,
    #[serde(default)]
    pub skipped: i32,
    #[serde(default)]
    pub unexpected: i32,
    #[serde(default)]
    pub flaky: i32,
}

/// Playwright test suite; nests to arbitrary depth.
#[derive(Debug, Deserialize)]
pub struct PlaywrightSuite {
    pub title: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub specs: Vec<PlaywrightSpec>,
    #[serde(default)]
    pub suites: Vec<PlaywrightSuite>,
}

/// Playwright test specification.
#[derive(Debug, Deserialize)]
pub struct PlaywrightSpec {
    pub title: String,
    pub ok: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: i32,
    #[serde(default)]
    pub column: i32,
    #[serde(default)]
    pub tests: Vec<PlaywrightTest>,
}

/// Playwright test: one spec run against one project, with retries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaywrightTest {
    #[serde(default)]
    pub expected_status: String,
    /// Final classification: expected, unexpected, flaky or skipped
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub results: Vec<PlaywrightResult>,
}

/// Playwright test result: a single execution attempt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaywrightResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub retry: i32,
    pub start_time: Option<String>,
    pub worker_index: Option<i64>,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    #[serde(default)]
    pub stdout: Vec<serde_json::Value>,
    #[serde(default)]
    pub stderr: Vec<serde_json::Value>,
}
