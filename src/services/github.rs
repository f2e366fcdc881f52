//! GitHub pull request comment service.
//!
//! Creates or updates the summary comment through the GitHub REST API.
//! Comments managed by this action carry a hidden HTML marker so repeated
//! runs update one comment instead of stacking new ones.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Hidden marker identifying comments managed by this action.
pub const COMMENT_MARKER: &str = "<!-- playwright-report-summary -->";

/// HTTP connect timeout for GitHub API calls.
const HTTP_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);
/// HTTP total timeout for GitHub API calls.
const HTTP_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// An issue comment as returned by the REST API.
#[derive(Debug, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
}

/// Client for upserting the summary comment on a pull request.
pub struct CommentClient {
    client: reqwest::Client,
    token: SecretString,
    api_url: String,
    repository: String,
}

impl CommentClient {
    /// Build a client with timeouts against the given API base and repository.
    pub fn new(token: SecretString, api_url: String, repository: String) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::GitHub(format!("Failed to build HTTP client: {}", e)))?;

        Ok(CommentClient {
            client,
            token,
            api_url,
            repository,
        })
    }

    /// Create or update the summary comment on a pull request.
    ///
    /// Returns the id of the created or updated comment.
    pub async fn upsert_comment(&self, pull_number: u64, body: &str) -> AppResult<u64> {
        let marked = mark_body(body);

        match self.find_marked_comment(pull_number).await? {
            Some(comment_id) => {
                info!("Updating existing comment {}", comment_id);
                self.update_comment(comment_id, &marked).await
            }
            None => {
                info!("Creating new comment on PR #{}", pull_number);
                self.create_comment(pull_number, &marked).await
            }
        }
    }

    /// Find a previously created comment by its marker.
    async fn find_marked_comment(&self, pull_number: u64) -> AppResult<Option<u64>> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments?per_page=100",
            self.api_url, self.repository, pull_number
        );

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| AppError::GitHub(format!("Failed to list comments: {}", e)))?;
        let response = self.check_status(response, &url)?;

        let comments: Vec<IssueComment> = response
            .json()
            .await
            .map_err(|e| AppError::GitHub(format!("Failed to decode comment list: {}", e)))?;

        Ok(find_marked(&comments))
    }

    /// Create a new comment on the pull request.
    async fn create_comment(&self, pull_number: u64, body: &str) -> AppResult<u64> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_url, self.repository, pull_number
        );

        let response = self
            .authorized(self.client.post(&url))
            .json(&json!({ "body": body }))
            .send()
            .await
            .map_err(|e| AppError::GitHub(format!("Failed to create comment: {}", e)))?;
        let response = self.check_status(response, &url)?;

        let comment: IssueComment = response
            .json()
            .await
            .map_err(|e| AppError::GitHub(format!("Failed to decode created comment: {}", e)))?;

        Ok(comment.id)
    }

    /// Replace the body of an existing comment.
    async fn update_comment(&self, comment_id: u64, body: &str) -> AppResult<u64> {
        let url = format!(
            "{}/repos/{}/issues/comments/{}",
            self.api_url, self.repository, comment_id
        );

        let response = self
            .authorized(self.client.patch(&url))
            .json(&json!({ "body": body }))
            .send()
            .await
            .map_err(|e| AppError::GitHub(format!("Failed to update comment: {}", e)))?;
        self.check_status(response, &url)?;

        Ok(comment_id)
    }

    /// Attach authentication and API headers to a request.
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(self.token.expose_secret())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "playwright-report-summary")
    }

    /// Turn a non-success response into a GitHub error.
    fn check_status(
        &self,
        response: reqwest::Response,
        url: &str,
    ) -> AppResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            warn!("GitHub API returned {} for {}", status, url);
            return Err(AppError::GitHub(format!("{} returned {}", url, status)));
        }
        Ok(response)
    }
}

/// Prefix a comment body with the hidden marker.
fn mark_body(body: &str) -> String {
    format!("{}\n\n{}", COMMENT_MARKER, body)
}

/// Find the id of the first comment carrying the marker.
fn find_marked(comments: &[IssueComment]) -> Option<u64> {
    comments
        .iter()
        .find(|comment| {
            comment
                .body
                .as_deref()
                .is_some_and(|body| body.contains(COMMENT_MARKER))
        })
        .map(|comment| comment.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_body_prefixes_marker() {
        let marked = mark_body("### Test Report");
        assert!(marked.starts_with(COMMENT_MARKER));
        assert!(marked.ends_with("### Test Report"));
    }

    #[test]
    fn test_find_marked_picks_managed_comment() {
        let comments = vec![
            IssueComment {
                id: 1,
                body: Some("LGTM!".to_string()),
            },
            IssueComment {
                id: 2,
                body: Some(mark_body("old summary")),
            },
            IssueComment {
                id: 3,
                body: None,
            },
        ];

        assert_eq!(find_marked(&comments), Some(2));
    }

    #[test]
    fn test_find_marked_handles_no_match() {
        let comments = vec![IssueComment {
            id: 1,
            body: Some("unrelated".to_string()),
        }];

        assert_eq!(find_marked(&comments), None);
    }
}
