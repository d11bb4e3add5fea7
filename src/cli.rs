//! Command-line interface definitions for the headline scraper.
//!
//! Every option is optional: values given here override the settings file,
//! which in turn overrides the built-in defaults.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape every outlet into the default CSV
/// news_headlines
///
/// # Custom destination, only two outlets
/// news_headlines -o ./titulares.csv -s 0223 -s lacapital
///
/// # Settings file with profile overrides
/// news_headlines -c ./headlines.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// CSV file the headlines are appended to
    #[arg(short, long, env = "HEADLINES_CSV")]
    pub output: Option<PathBuf>,

    /// Log file, written alongside stderr
    #[arg(short, long, env = "HEADLINES_LOG")]
    pub log_file: Option<PathBuf>,

    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Outlet id to scrape (repeatable); defaults to every configured outlet
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}
