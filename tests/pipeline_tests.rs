//! Integration tests for the file-reading entry into the parse pipeline.

use std::io::Write;
use std::path::PathBuf;

use playwright_report_summary::error::AppError;
use playwright_report_summary::services::parse_report_file;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[tokio::test]
async fn test_parses_report_from_file() {
    let summary = parse_report_file(&fixture_path("report-valid.json"))
        .await
        .expect("fixture should parse");

    assert_eq!(summary.tests.len(), 14);
    assert_eq!(summary.version, "1.37.1");
}

/// A missing report file surfaces a filesystem error naming the path.
#[tokio::test]
async fn test_missing_file_reports_path() {
    let result = parse_report_file(&PathBuf::from("file-does-not-exist.json")).await;

    match result {
        Err(AppError::FileSystem(message)) => {
            assert!(message.contains("Failed to find report file at path file-does-not-exist.json"));
        }
        other => panic!("expected filesystem error, got {:?}", other.map(|_| ())),
    }
}

/// A file with broken JSON fails with a decode error, not a panic.
#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"{ not json").expect("write");

    let result = parse_report_file(file.path()).await;
    assert!(matches!(result, Err(AppError::Decode(_))));
}

/// A decodable but non-report file fails validation.
#[tokio::test]
async fn test_wrong_shape_is_a_validation_error() {
    let result = parse_report_file(&fixture_path("report-invalid.json")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}
