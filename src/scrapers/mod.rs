//! Outlet front-page extractors.
//!
//! Each outlet is described by a [`SourceProfile`]: display name, base URL,
//! its section lookup table and the ordered list of zones to read. Profiles
//! are data, shipped in code for the outlets below and replaceable from the
//! settings file.
//!
//! # Supported Sources
//!
//! | Id | Outlet | Module | Zones |
//! |----|--------|--------|-------|
//! | `quedigital` | QueDigital | [`quedigital`] | destacados, recientes, especiales, inferior groups, más vistas, deportes, cultura |
//! | `0223` | 0223 | [`cerodosdostres`] | apertura, relleno, category grids, propiedades, más leídas, historias, columnas, liga |
//! | `lacapital` | La Capital | [`lacapital`] | apertura, bloque de notas, category grids, ranking |
//!
//! # Scraping
//!
//! [`scrape`] opens a fetch session, downloads the front page once, runs
//! every zone in declared order and drops the session before returning. A
//! failed fetch yields no records; a failed zone yields no records for that
//! zone only.

pub mod cerodosdostres;
pub mod lacapital;
pub mod quedigital;

use chrono::NaiveDate;
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use url::Url;

use crate::config::ConfigError;
use crate::fetch::{Fetcher, fetch_document};
use crate::models::HeadlineRecord;
use crate::normalize::SectionTable;
use crate::zones::{Zone, ZoneContext, ZoneSpec, run_zone};

/// Run order when no other is configured.
pub const DEFAULT_ORDER: [&str; 3] = [quedigital::ID, cerodosdostres::ID, lacapital::ID];

/// Declarative description of one outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProfile {
    pub id: String,
    /// Display name written to the `medio` column.
    pub medio: String,
    pub base_url: String,
    /// Overrides the configured `User-Agent` for this outlet.
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub sections: SectionTable,
    pub zones: Vec<ZoneSpec>,
}

/// Profiles shipped with the binary.
pub fn builtin_profiles() -> Vec<SourceProfile> {
    vec![quedigital::profile(), cerodosdostres::profile(), lacapital::profile()]
}

/// A front-page extractor for one outlet.
pub trait SourceExtractor {
    fn id(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    fn base_url(&self) -> &Url;

    fn user_agent(&self) -> Option<&str> {
        None
    }

    /// Run every zone, in order, against an already fetched front page.
    fn extract(&self, doc: &Html, fecha: NaiveDate) -> Vec<HeadlineRecord>;
}

/// [`SourceExtractor`] driven by a list of zones.
pub struct ConfiguredSource {
    id: String,
    medio: String,
    base_url: Url,
    user_agent: Option<String>,
    sections: SectionTable,
    zones: Vec<Box<dyn Zone>>,
}

impl ConfiguredSource {
    pub fn new(id: &str, medio: &str, base_url: Url, sections: SectionTable) -> Self {
        Self {
            id: id.to_string(),
            medio: medio.to_string(),
            base_url,
            user_agent: None,
            sections,
            zones: Vec::new(),
        }
    }

    pub fn with_zone(mut self, zone: impl Zone + 'static) -> Self {
        self.zones.push(Box::new(zone));
        self
    }

    pub fn from_profile(profile: SourceProfile) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&profile.base_url).map_err(|e| ConfigError::InvalidProfile {
            id: profile.id.clone(),
            reason: format!("base_url {}: {e}", profile.base_url),
        })?;
        if profile.zones.is_empty() {
            return Err(ConfigError::InvalidProfile { id: profile.id, reason: "no zones defined".to_string() });
        }

        let mut source = Self::new(&profile.id, &profile.medio, base_url, profile.sections);
        source.user_agent = profile.user_agent;
        for zone in profile.zones {
            source = source.with_zone(zone);
        }
        Ok(source)
    }

    pub fn zone_names(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.name()).collect()
    }
}

impl SourceExtractor for ConfiguredSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.medio
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    fn extract(&self, doc: &Html, fecha: NaiveDate) -> Vec<HeadlineRecord> {
        let ctx = ZoneContext { medio: &self.medio, base: &self.base_url, fecha, sections: &self.sections };
        let mut records = Vec::new();
        for zone in &self.zones {
            records.extend(run_zone(zone.as_ref(), doc, &ctx).into_records());
        }
        records
    }
}

/// Fetch `source`'s front page and extract its headlines.
///
/// The fetch session lives only for this call. Fetch failures are logged
/// and produce an empty result; they are not retried.
///
/// # Arguments
///
/// * `source` - Outlet to scrape
/// * `fetcher` - Opens the scoped HTTP session
/// * `fecha` - Date stamped on every record
///
/// # Returns
///
/// The outlet's records in zone order, empty when the page could not be
/// fetched.
#[instrument(level = "info", skip_all, fields(source = %source.name(), id = source.id()))]
pub async fn scrape<F: Fetcher>(source: &dyn SourceExtractor, fetcher: &F, fecha: NaiveDate) -> Vec<HeadlineRecord> {
    info!(url = %source.base_url(), "Scraping started");

    let session = match fetcher.open_session(source.user_agent()) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Could not open fetch session");
            return Vec::new();
        }
    };

    let doc = match fetch_document(&session, source.base_url()).await {
        Ok(doc) => doc,
        Err(e) => {
            error!(error = %e, "Could not fetch front page");
            return Vec::new();
        }
    };
    let records = source.extract(&doc, fecha);
    info!(count = records.len(), "Scraping finished");
    records
}
