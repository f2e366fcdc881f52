//! Action configuration loaded from environment variables.
//!
//! GitHub Actions passes workflow inputs as `INPUT_<NAME>` environment
//! variables and exposes the run context through `GITHUB_*` variables.

use std::env;
use std::fs;
use std::path::PathBuf;

use secrecy::SecretString;

/// Default values applied when an input is omitted.
pub mod defaults {
    pub const DEFAULT_COMMENT_TITLE: &str = "Playwright test results";
    pub const DEFAULT_API_URL: &str = "https://api.github.com";
}

/// Action configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Playwright JSON report
    pub report_file: PathBuf,
    /// Heading used for the PR comment
    pub comment_title: String,
    /// Optional URL of a hosted HTML report
    pub report_url: Option<String>,
    /// Token used to create or update the PR comment
    pub github_token: Option<SecretString>,
    /// GitHub REST API base URL
    pub api_url: String,
    /// Repository in `owner/repo` form
    pub repository: Option<String>,
    /// Commit SHA under test
    pub commit_sha: Option<String>,
    /// Pull request number, when the triggering event carries one
    pub pull_request: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Inputs (via `INPUT_<NAME>`):
    /// - `report-file`: Path to the Playwright JSON report - REQUIRED
    /// - `comment-title`: Comment heading (default: "Playwright test results")
    /// - `report-url`: URL of a hosted HTML report (optional)
    /// - `github-token`: Token for commenting (falls back to `GITHUB_TOKEN`)
    ///
    /// Context (via `GITHUB_*`):
    /// - `GITHUB_API_URL`: REST API base (default: https://api.github.com)
    /// - `GITHUB_REPOSITORY`: `owner/repo` of the current run
    /// - `GITHUB_SHA`: Commit SHA under test
    /// - `GITHUB_EVENT_PATH`: Event payload file, source of the PR number
    pub fn from_env() -> Result<Self, ConfigError> {
        let report_file = action_input("report-file")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingInput("report-file"))?;

        let comment_title = action_input("comment-title")
            .unwrap_or_else(|| defaults::DEFAULT_COMMENT_TITLE.to_string());

        let report_url = action_input("report-url");

        let github_token = action_input("github-token")
            .or_else(|| non_empty(env::var("GITHUB_TOKEN").ok()))
            .map(SecretString::from);

        let api_url = non_empty(env::var("GITHUB_API_URL").ok())
            .unwrap_or_else(|| defaults::DEFAULT_API_URL.to_string());

        let repository = non_empty(env::var("GITHUB_REPOSITORY").ok());
        let commit_sha = non_empty(env::var("GITHUB_SHA").ok());

        let pull_request = match env::var("GITHUB_EVENT_PATH") {
            Ok(path) => {
                let payload = fs::read_to_string(&path)
                    .map_err(|e| ConfigError::EventPayload(format!("{}: {}", path, e)))?;
                let payload: serde_json::Value = serde_json::from_str(&payload)
                    .map_err(|e| ConfigError::EventPayload(format!("{}: {}", path, e)))?;
                pull_request_number(&payload)
            }
            Err(_) => None,
        };

        Ok(Config {
            report_file,
            comment_title,
            report_url,
            github_token,
            api_url,
            repository,
            commit_sha,
            pull_request,
        })
    }

    /// Short commit identifier for display (first 7 characters).
    pub fn short_sha(&self) -> Option<String> {
        self.commit_sha
            .as_deref()
            .map(|sha| sha.chars().take(7).collect())
    }
}

/// Read a workflow input by its `action.yml` name.
fn action_input(name: &str) -> Option<String> {
    non_empty(env::var(input_key(name)).ok())
}

/// Map an input name to the environment variable GitHub Actions sets for it.
fn input_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Treat empty or whitespace-only values as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Extract the pull request number from a webhook event payload.
///
/// `pull_request` events carry it at `pull_request.number`; `issue_comment`
/// events on a PR carry it at `issue.number`.
pub fn pull_request_number(payload: &serde_json::Value) -> Option<u64> {
    payload
        .get("pull_request")
        .and_then(|pr| pr.get("number"))
        .or_else(|| payload.get("issue").and_then(|issue| issue.get("number")))
        .and_then(serde_json::Value::as_u64)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Failed to read event payload: {0}")]
    EventPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_key_mapping() {
        assert_eq!(input_key("report-file"), "INPUT_REPORT-FILE");
        assert_eq!(input_key("comment title"), "INPUT_COMMENT_TITLE");
    }

    #[test]
    fn test_non_empty_filters_blank_values() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(
            non_empty(Some(" value ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_pull_request_number_from_pull_request_event() {
        let payload = json!({ "pull_request": { "number": 12345 } });
        assert_eq!(pull_request_number(&payload), Some(12345));
    }

    #[test]
    fn test_pull_request_number_from_issue_event() {
        let payload = json!({ "issue": { "number": 7 } });
        assert_eq!(pull_request_number(&payload), Some(7));
    }

    #[test]
    fn test_pull_request_number_absent_for_push_event() {
        let payload = json!({ "head_commit": { "id": "abc" } });
        assert_eq!(pull_request_number(&payload), None);
    }

    #[test]
    fn test_short_sha() {
        let config = Config {
            report_file: PathBuf::from("results.json"),
            comment_title: defaults::DEFAULT_COMMENT_TITLE.to_string(),
            report_url: None,
            github_token: None,
            api_url: defaults::DEFAULT_API_URL.to_string(),
            repository: Some("some-owner/some-repo".to_string()),
            commit_sha: Some("1234567890abcdef".to_string()),
            pull_request: Some(12345),
        };

        assert_eq!(config.short_sha(), Some("1234567".to_string()));
    }
}
