//! # News Headlines
//!
//! Reads the front pages of local news outlets and appends one CSV row per
//! headline: date, outlet, title, page zone, section and URL.
//!
//! ## Features
//!
//! - Built-in profiles for QueDigital, 0223 and La Capital (Mar del Plata)
//! - Zone definitions are plain data and can be replaced from a YAML file
//! - A missing or broken zone costs only that zone's headlines
//! - Append-only CSV output with a single header row across runs
//!
//! ## Usage
//!
//! ```sh
//! news_headlines -o ./data/titulares.csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Settings**: defaults, then the YAML file, then command-line flags
//! 2. **Fetching**: one scoped HTTP session per outlet, one request each
//! 3. **Extraction**: every zone of the outlet's profile, in page order
//! 4. **Output**: records are appended to the sink one at a time

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod coordinator;
mod fetch;
mod models;
mod normalize;
mod outputs;
mod scrapers;
mod utils;
mod zones;

use cli::Cli;
use config::{ConfigError, Settings};
use coordinator::Coordinator;
use fetch::HttpFetcher;
use outputs::csv::CsvSink;
use utils::ensure_writable_parent;

fn init_tracing(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let log_file = OpenOptions::new().create(true).append(true).open(&settings.log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tfmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(UtcTime::rfc_3339());
    let file_layer = tfmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339());

    tracing_subscriber::registry().with(filter).with(stderr_layer).with(file_layer).try_init()?;
    Ok(())
}

/// Probe that the parent directory of `path` can be written to.
///
/// # Arguments
///
/// * `path` - File the run will create or append to (CSV sink or log file)
///
/// # Returns
///
/// `Ok(())` when the directory exists (or was created) and accepts a probe
/// file, [`ConfigError::UnwritablePath`] otherwise.
async fn ensure_destination(path: &Path) -> Result<(), ConfigError> {
    ensure_writable_parent(path)
        .await
        .map_err(|e| ConfigError::UnwritablePath { path: path.to_path_buf(), reason: e.to_string() })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    let settings = Settings::resolve(&args)?;

    ensure_destination(&settings.log_file).await?;
    init_tracing(&settings)?;
    info!("news_headlines starting up");
    debug!(output = %settings.output.display(), sources = ?settings.sources, "Resolved settings");

    // Early check: an unwritable destination stops the run before any fetch
    if let Err(e) = ensure_destination(&settings.output).await {
        error!(
            path = %settings.output.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(Box::<dyn Error>::from(e));
    }

    let sources = settings.build_sources()?;
    let fecha = Local::now().date_naive();
    let fetcher = HttpFetcher::new(settings.fetch.clone());
    let mut sink = CsvSink::new(&settings.output);

    let summary = Coordinator::new(sources, fecha).run(&fetcher, &mut sink).await?;

    for report in &summary.sources {
        info!(
            source = %report.source,
            scraped = report.scraped,
            written = report.written,
            failed_writes = report.failed_writes,
            faulted = report.faulted,
            "Source summary"
        );
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        written = summary.written(),
        failed_writes = summary.failed_writes(),
        path = %sink.path().display(),
        "Execution complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_destination_in_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("titulares.csv");
        ensure_destination(&path).await.unwrap();
        assert!(dir.path().join("data").is_dir());
    }

    #[tokio::test]
    async fn test_destination_under_a_file_is_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = ensure_destination(&blocker.join("titulares.csv")).await.unwrap_err();
        assert!(matches!(err, ConfigError::UnwritablePath { ref path, .. } if path.ends_with("titulares.csv")));

        // The same error must flow through `main`'s boxed error type.
        let boxed: Box<dyn Error> = err.into();
        assert!(boxed.to_string().contains("not writable"));
    }
}
