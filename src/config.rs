//! Run settings.
//!
//! Settings come from three layers, each overriding the previous one: the
//! built-in defaults, an optional YAML file and the command line. The YAML
//! file may also carry full [`SourceProfile`]s, which replace the built-in
//! profile with the same id (or add a new outlet).
//!
//! ```yaml
//! output: data/titulares.csv
//! log_file: logs/scraper.log
//! fetch:
//!   timeout_secs: 15
//! sources: [quedigital, "0223"]
//! profiles:
//!   - id: quedigital
//!     medio: QueDigital
//!     base_url: https://quedigital.com.ar
//!     zones:
//!       - kind: list
//!         name: destacados_principal
//!         locate: [{ by: selector, css: "div#featured" }]
//!         item: div.et-featured-post
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::fetch::FetchConfig;
use crate::scrapers::{ConfiguredSource, DEFAULT_ORDER, SourceExtractor, SourceProfile, builtin_profiles};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unknown source `{0}`")]
    UnknownSource(String),
    #[error("invalid profile `{id}`: {reason}")]
    InvalidProfile { id: String, reason: String },
    #[error("path {path} is not writable: {reason}")]
    UnwritablePath { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CSV destination.
    pub output: PathBuf,
    pub log_file: PathBuf,
    pub fetch: FetchConfig,
    /// Outlet ids, in run order.
    pub sources: Vec<String>,
    /// Profiles replacing or extending the built-in ones.
    pub profiles: Vec<SourceProfile>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("data/titulares.csv"),
            log_file: PathBuf::from("logs/scraper.log"),
            fetch: FetchConfig::default(),
            sources: DEFAULT_ORDER.iter().map(|id| id.to_string()).collect(),
            profiles: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let settings = Self::from_yaml(&yaml)?;
        debug!(path = %path.display(), profiles = settings.profiles.len(), "Loaded settings file");
        Ok(settings)
    }

    /// Defaults, then the settings file named by `cli` (if any), then the flags.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_cli(cli);
        Ok(settings)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.fetch.timeout_secs = timeout;
        }
        if !cli.sources.is_empty() {
            self.sources = cli.sources.clone();
        }
    }

    /// Build the extractors for [`sources`](Self::sources), in order.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownSource`] for an id with no profile, and
    /// [`ConfigError::InvalidProfile`] for a profile that does not build.
    pub fn build_sources(&self) -> Result<Vec<Box<dyn SourceExtractor>>, ConfigError> {
        let builtin = builtin_profiles();
        let mut sources: Vec<Box<dyn SourceExtractor>> = Vec::with_capacity(self.sources.len());

        for id in &self.sources {
            let profile = self
                .profiles
                .iter()
                .find(|p| &p.id == id)
                .or_else(|| builtin.iter().find(|p| &p.id == id))
                .cloned()
                .ok_or_else(|| ConfigError::UnknownSource(id.clone()))?;

            let source = ConfiguredSource::from_profile(profile)?;
            info!(source = %source.name(), zones = source.zone_names().len(), "Source configured");
            sources.push(Box::new(source));
        }
        Ok(sources)
    }
}
