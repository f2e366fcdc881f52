//! Domain error types for the report summary action.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Report text is not syntactically valid JSON
    #[error("Failed to decode report JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Report decoded but does not have the shape of a Playwright report
    #[error("Invalid report: {0}")]
    Validation(String),

    /// Report carries data outside the recognized classifications
    #[error("Report integrity error: {0}")]
    Integrity(String),

    /// Filesystem operation failed
    #[error("{0}")]
    FileSystem(String),

    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHub(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
