//! Playwright report summary action - main entry point.
//!
//! Reads the report file, aggregates it, renders the markdown summary and
//! upserts the pull request comment.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use playwright_report_summary::config::Config;
use playwright_report_summary::error::{AppError, AppResult};
use playwright_report_summary::services::{CommentClient, RenderOptions};
use playwright_report_summary::services::{parser, render};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (local runs)
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("Set the `report-file` input to the path of a Playwright JSON report.");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Execute the pipeline: parse, render, comment, set outputs.
async fn run(config: &Config) -> AppResult<()> {
    info!("Report file: {}", config.report_file.display());
    info!("Comment title: {}", config.comment_title);

    let summary = parser::parse_report_file(&config.report_file).await?;
    info!(
        "{} passed, {} failed, {} flaky, {} skipped in {:.0}ms",
        summary.passed.len(),
        summary.failed.len(),
        summary.flaky.len(),
        summary.skipped.len(),
        summary.duration
    );

    let options = RenderOptions {
        title: config.comment_title.clone(),
        report_url: config.report_url.clone(),
        commit: config.short_sha(),
    };
    let body = render::render_report_summary(&summary, &options);

    match (&config.github_token, &config.repository, config.pull_request) {
        (Some(token), Some(repository), Some(pull_number)) => {
            let client =
                CommentClient::new(token.clone(), config.api_url.clone(), repository.clone())?;
            let comment_id = client.upsert_comment(pull_number, &body).await?;
            info!("Comment id: {}", comment_id);
            set_output("comment-id", &comment_id.to_string())?;
        }
        _ => {
            warn!("No pull request context or token available; skipping comment");
            info!("Rendered summary:\n{}", body);
        }
    }

    Ok(())
}

/// Append a step output to the GITHUB_OUTPUT file.
fn set_output(name: &str, value: &str) -> AppResult<()> {
    let Some(path) = env::var_os("GITHUB_OUTPUT") else {
        debug!("GITHUB_OUTPUT not set; skipping output {}", name);
        return Ok(());
    };
    let path = PathBuf::from(path);

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            AppError::FileSystem(format!("Failed to open {}: {}", path.display(), e))
        })?;

    writeln!(file, "{}={}", name, value)
        .map_err(|e| AppError::FileSystem(format!("Failed to write {}: {}", path.display(), e)))
}
