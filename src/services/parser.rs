//! Report parsing and aggregation service.
//!
//! Validates raw report text, flattens the nested suite tree and classifies
//! every test, producing one immutable [`ReportSummary`] per report. The
//! whole pipeline is a pure, synchronous transform; only the file-reading
//! wrapper at the bottom touches I/O.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::DateTime;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{
    PlaywrightReport, PlaywrightResult, PlaywrightSpec, PlaywrightSuite, ReportSummary,
    SpecSummary, SuiteSummary, TestStatus, TestSummary,
};

// ============================================================================
// Schema Recognition
// ============================================================================

/// Recognized report schema variants.
///
/// Shape checks live here, not inline in the parser, so drift in the
/// generator's schema stays isolated to one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSchema {
    /// Playwright JSON reporter output: `config` and `suites` at the top level
    PlaywrightV1,
}

impl ReportSchema {
    const ALL: [ReportSchema; 1] = [ReportSchema::PlaywrightV1];

    /// Check whether a decoded value matches this schema.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            Self::PlaywrightV1 => {
                value.is_object()
                    && value
                        .get("config")
                        .is_some_and(serde_json::Value::is_object)
                    && value
                        .get("suites")
                        .is_some_and(serde_json::Value::is_array)
            }
        }
    }

    /// Find the first recognized schema for a decoded value.
    pub fn recognize(value: &serde_json::Value) -> Option<Self> {
        Self::ALL.into_iter().find(|schema| schema.matches(value))
    }
}

/// Decide whether a decoded JSON value has the minimal shape of a test report.
///
/// Never panics; any shape mismatch (arrays, strings, null, objects missing
/// `config` or `suites`) yields `false`.
pub fn is_valid_report(value: &serde_json::Value) -> bool {
    ReportSchema::recognize(value).is_some()
}

// ============================================================================
// Tree Flattening
// ============================================================================

/// Where in the suite tree specs are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectPolicy {
    /// Collect the specs of every suite node
    EveryLevel,
    /// Collect specs only from suites with no nested suites
    LeafOnly,
}

/// Flatten a suite tree into an ordered spec sequence.
///
/// Depth-first, left-to-right: each suite's own specs are appended before
/// its nested suites are visited. The accumulator is both the growing
/// result and the return value, which lets sibling calls keep extending
/// one sequence.
pub fn parse_specs_recursively<'a>(
    mut specs: Vec<&'a PlaywrightSpec>,
    suites: &'a [PlaywrightSuite],
    policy: CollectPolicy,
) -> Vec<&'a PlaywrightSpec> {
    for suite in suites {
        let collect = match policy {
            CollectPolicy::EveryLevel => true,
            CollectPolicy::LeafOnly => suite.suites.is_empty(),
        };
        if collect {
            specs.extend(suite.specs.iter());
        }
        specs = parse_specs_recursively(specs, &suite.suites, policy);
    }
    specs
}

/// Flatten a suite tree into the ordered sequence of all suite nodes.
fn collect_suites<'a>(
    mut acc: Vec<&'a PlaywrightSuite>,
    suites: &'a [PlaywrightSuite],
) -> Vec<&'a PlaywrightSuite> {
    for suite in suites {
        acc.push(suite);
        acc = collect_suites(acc, &suite.suites);
    }
    acc
}

// ============================================================================
// Aggregation
// ============================================================================

/// Parse raw report text into an aggregate summary.
///
/// Fails with [`AppError::Decode`] when the text is not valid JSON, with
/// [`AppError::Validation`] when the decoded value is not report-shaped,
/// and with [`AppError::Integrity`] when a test carries a status outside
/// the four recognized classifications.
pub fn parse_report(raw: &str) -> AppResult<ReportSummary> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    if !is_valid_report(&value) {
        return Err(AppError::Validation(
            "expected a Playwright JSON report with top-level `config` and `suites`".to_string(),
        ));
    }

    let report: PlaywrightReport = serde_json::from_value(value)?;

    let version = report
        .config
        .version
        .clone()
        .unwrap_or_else(|| "unknown".to_string());

    let flat_suites = collect_suites(Vec::new(), &report.suites);
    let flat_specs = parse_specs_recursively(Vec::new(), &report.suites, CollectPolicy::EveryLevel);

    // Distinct file paths, first-seen order.
    let mut files: Vec<String> = Vec::new();
    for suite in &flat_suites {
        if !files.iter().any(|f| f == &suite.file) {
            files.push(suite.file.clone());
        }
    }

    let suites: Vec<SuiteSummary> = flat_suites
        .iter()
        .map(|suite| SuiteSummary {
            title: suite.title.clone(),
            file: suite.file.clone(),
        })
        .collect();

    let specs: Vec<SpecSummary> = flat_specs
        .iter()
        .map(|spec| SpecSummary {
            title: spec.title.clone(),
            ok: spec.ok,
            file: spec.file.clone(),
            tags: spec.tags.clone(),
        })
        .collect();

    // Classify every test into exactly one bucket; an unrecognized
    // status fails the parse.
    let mut tests: Vec<TestSummary> = Vec::new();
    for spec in &flat_specs {
        for test in &spec.tests {
            let status = TestStatus::classify(&test.status).ok_or_else(|| {
                AppError::Integrity(format!(
                    "unrecognized test status `{}` for spec `{}`",
                    test.status, spec.title
                ))
            })?;
            tests.push(TestSummary {
                title: spec.title.clone(),
                project_name: test.project_name.clone(),
                status,
                duration: test.results.iter().map(|r| r.duration).sum(),
            });
        }
    }

    let by_status = |status: TestStatus| -> Vec<TestSummary> {
        tests
            .iter()
            .filter(|test| test.status == status)
            .cloned()
            .collect()
    };

    let passed = by_status(TestStatus::Passed);
    let failed = by_status(TestStatus::Failed);
    let flaky = by_status(TestStatus::Flaky);
    let skipped = by_status(TestStatus::Skipped);

    let workers = report
        .config
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.actual_workers)
        .or(report.config.workers)
        .map(|count| count as usize)
        .unwrap_or_else(|| count_distinct_workers(&flat_specs));

    let shards = report
        .config
        .shard
        .as_ref()
        .map(|shard| shard.total as usize)
        .unwrap_or(1);

    let duration = match &report.stats {
        Some(stats) => stats.duration,
        None => backfill_duration(&flat_specs),
    };

    Ok(ReportSummary {
        version,
        duration,
        workers,
        shards,
        files,
        suites,
        specs,
        tests,
        passed,
        failed,
        flaky,
        skipped,
    })
}

/// Count distinct worker indices observed across all results.
fn count_distinct_workers(specs: &[&PlaywrightSpec]) -> usize {
    let workers: BTreeSet<i64> = results_of(specs)
        .filter_map(|result| result.worker_index)
        .collect();
    workers.len()
}

/// Backfill a missing total duration from the underlying results.
///
/// Span from the earliest `startTime` to the latest completion
/// (`startTime + duration`) across all attempts, in milliseconds. Zero
/// when no result carries a parseable start time.
fn backfill_duration(specs: &[&PlaywrightSpec]) -> f64 {
    let mut earliest: Option<f64> = None;
    let mut latest: Option<f64> = None;

    for result in results_of(specs) {
        let Some(start) = result
            .start_time
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        else {
            continue;
        };
        let start_ms = start.timestamp_millis() as f64;
        let end_ms = start_ms + result.duration;

        earliest = Some(earliest.map_or(start_ms, |e: f64| e.min(start_ms)));
        latest = Some(latest.map_or(end_ms, |l: f64| l.max(end_ms)));
    }

    match (earliest, latest) {
        (Some(earliest), Some(latest)) => latest - earliest,
        _ => 0.0,
    }
}

/// Iterate every result of every test of every spec.
fn results_of<'a>(
    specs: &'a [&'a PlaywrightSpec],
) -> impl Iterator<Item = &'a PlaywrightResult> + 'a {
    specs
        .iter()
        .flat_map(|spec| spec.tests.iter())
        .flat_map(|test| test.results.iter())
}

// ============================================================================
// File Wrapper
// ============================================================================

/// Read a report file and parse it into a summary.
pub async fn parse_report_file(path: &Path) -> AppResult<ReportSummary> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::FileSystem(format!(
            "Failed to find report file at path {}: {}",
            path.display(),
            e
        ))
    })?;

    let summary = parse_report(&raw)?;
    info!(
        "Parsed report: {} tests across {} files",
        summary.tests.len(),
        summary.files.len()
    );

    Ok(summary)
}
