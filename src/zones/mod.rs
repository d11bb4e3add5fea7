//! Zone extractors.
//!
//! A zone is one visually distinct region of an outlet's front page: the
//! lead story, a ranking, a category grid, filler blocks. Each zone is
//! located and read independently, and each one reports an explicit
//! [`ZoneOutcome`] so that a missing or broken zone never affects its
//! siblings.
//!
//! # Zone kinds
//!
//! | Kind | Module | Typical use |
//! |------|--------|-------------|
//! | `lead` | [`lead`] | Apertura: main story plus secondary list |
//! | `ranked` | [`ranked`] | "Más leídas" ordered lists |
//! | `grid` | [`grid`] | Category sections keyed by their outbound link |
//! | `blocks` | [`blocks`] | Repeated filler blocks sharing a class |
//! | `list` | [`list`] | Plain containers of article cards |
//!
//! All kinds are plain data ([`ZoneSpec`]) so outlet profiles can be edited
//! in the YAML settings file when a site changes its markup.
//!
//! # Failure isolation
//!
//! [`run_zone`] is the zone boundary. A missing container becomes
//! [`ZoneError::Absent`] (logged as a warning); a bad selector or a panic
//! inside the extractor is logged as an error. In every case the zone simply
//! contributes no records. Inside multi-article zones a candidate lacking a
//! title or a resolvable link is dropped on its own and its siblings are
//! still read.

pub mod article;
pub mod blocks;
pub mod grid;
pub mod lead;
pub mod list;
pub mod locate;
pub mod ranked;

use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::NaiveDate;
use scraper::Html;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::models::HeadlineRecord;
use crate::normalize::{NormalizeError, SectionTable, clean_text, infer_section, resolve_url, section_from_url};
use article::Candidate;

pub use blocks::BlocksZone;
pub use grid::GridZone;
pub use lead::LeadZone;
pub use list::ListZone;
pub use ranked::RankedZone;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// The zone's container is not on the page.
    #[error("container not found: {0}")]
    Absent(String),
    /// A selector in the zone definition does not parse.
    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: String, reason: String },
    /// The extractor panicked.
    #[error("unexpected fault: {0}")]
    Fault(String),
}

/// Why a single candidate was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    #[error("empty title")]
    MissingTitle,
    #[error("no link")]
    MissingLink,
    #[error(transparent)]
    Url(#[from] NormalizeError),
    #[error("not an absolute http(s) URL: {0}")]
    NotAbsolute(String),
}

/// Result of running one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneOutcome {
    /// At least one record, in page order.
    Records(Vec<HeadlineRecord>),
    /// The zone was found but yielded nothing.
    Empty,
    Failed(ZoneError),
}

impl ZoneOutcome {
    pub fn into_records(self) -> Vec<HeadlineRecord> {
        match self {
            ZoneOutcome::Records(records) => records,
            ZoneOutcome::Empty | ZoneOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Everything a zone needs besides the document.
#[derive(Debug, Clone, Copy)]
pub struct ZoneContext<'a> {
    pub medio: &'a str,
    pub base: &'a Url,
    pub fecha: NaiveDate,
    pub sections: &'a SectionTable,
}

/// Section source for one record.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionHint<'a> {
    /// Overrides everything, e.g. a ranking's own label.
    pub fixed: Option<&'a str>,
    /// Used when neither labels nor the URL path give a section.
    pub fallback: Option<&'a str>,
}

impl<'a> ZoneContext<'a> {
    /// Validate a candidate and build its record.
    ///
    /// Section priority: fixed label, category tag, kicker, URL path, zone
    /// fallback, outlet default.
    pub fn build(
        &self,
        zona: &str,
        candidate: &Candidate,
        hint: SectionHint<'_>,
    ) -> Result<HeadlineRecord, ArticleError> {
        let titular = clean_text(&candidate.titular);
        if titular.is_empty() {
            return Err(ArticleError::MissingTitle);
        }
        let Some(href) = candidate.href.as_deref().filter(|h| !h.trim().is_empty()) else {
            return Err(ArticleError::MissingLink);
        };
        let url = resolve_url(self.base, Some(href))?;

        let labelled = hint.fixed.map(str::to_string).or_else(|| candidate.category.clone()).or_else(|| candidate.kicker.clone());
        let seccion = match (labelled, hint.fallback) {
            (Some(label), _) => label,
            (None, Some(fallback)) => {
                section_from_url(url.as_str(), self.base, self.sections).unwrap_or_else(|| fallback.to_string())
            }
            (None, None) => infer_section(url.as_str(), self.base, self.sections),
        };

        HeadlineRecord::new(self.fecha, self.medio, titular, zona, seccion, &url)
            .ok_or_else(|| ArticleError::NotAbsolute(url.to_string()))
    }

    /// Like [`build`](Self::build), dropping the candidate with a debug trace on failure.
    pub fn accept(&self, zona: &str, candidate: &Candidate, hint: SectionHint<'_>) -> Option<HeadlineRecord> {
        match self.build(zona, candidate, hint) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(zone = zona, error = %e, title = %candidate.titular, "Dropped candidate");
                None
            }
        }
    }
}

/// A page region extractor.
pub trait Zone {
    /// Name used in logs and as the base of `zona_portada`.
    fn name(&self) -> &str;

    /// Read the zone's records from `doc`.
    fn extract(&self, doc: &Html, ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError>;
}

/// Run `zone` behind the isolation boundary and log its outcome.
///
/// A missing container is logged as a warning; a bad selector or a panic in
/// the extractor as an error.
///
/// # Arguments
///
/// * `zone` - Zone to extract
/// * `doc` - Parsed front page
/// * `ctx` - Outlet, base URL, date and section table for the records
///
/// # Returns
///
/// The zone's [`ZoneOutcome`]. Never panics.
#[instrument(level = "info", skip_all, fields(zone = zone.name()))]
pub fn run_zone(zone: &dyn Zone, doc: &Html, ctx: &ZoneContext<'_>) -> ZoneOutcome {
    let name = zone.name();
    let result = catch_unwind(AssertUnwindSafe(|| zone.extract(doc, ctx)))
        .unwrap_or_else(|payload| Err(ZoneError::Fault(panic_message(payload.as_ref()))));

    match result {
        Ok(records) if records.is_empty() => {
            info!(source = ctx.medio, zone = name, count = 0, "Zone yielded no headlines");
            ZoneOutcome::Empty
        }
        Ok(records) => {
            info!(source = ctx.medio, zone = name, count = records.len(), "Zone extracted");
            ZoneOutcome::Records(records)
        }
        Err(e @ ZoneError::Absent(_)) => {
            warn!(source = ctx.medio, zone = name, error = %e, "Zone not found");
            ZoneOutcome::Failed(e)
        }
        Err(e) => {
            error!(source = ctx.medio, zone = name, error = %e, "Zone extraction failed");
            ZoneOutcome::Failed(e)
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Declarative zone definition, as stored in outlet profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneSpec {
    Lead(LeadZone),
    Ranked(RankedZone),
    Grid(GridZone),
    Blocks(BlocksZone),
    List(ListZone),
}

impl Zone for ZoneSpec {
    fn name(&self) -> &str {
        match self {
            ZoneSpec::Lead(z) => z.name(),
            ZoneSpec::Ranked(z) => z.name(),
            ZoneSpec::Grid(z) => z.name(),
            ZoneSpec::Blocks(z) => z.name(),
            ZoneSpec::List(z) => z.name(),
        }
    }

    fn extract(&self, doc: &Html, ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError> {
        match self {
            ZoneSpec::Lead(z) => z.extract(doc, ctx),
            ZoneSpec::Ranked(z) => z.extract(doc, ctx),
            ZoneSpec::Grid(z) => z.extract(doc, ctx),
            ZoneSpec::Blocks(z) => z.extract(doc, ctx),
            ZoneSpec::List(z) => z.extract(doc, ctx),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a plain-text subscriber and return what it logged, one
    /// entry per line.
    pub fn captured_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8_lossy(&capture.0.lock().unwrap()).into_owned();
        (out, text.lines().map(str::to_string).collect())
    }

    pub fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    pub fn fecha() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()
    }

    pub fn sections() -> SectionTable {
        SectionTable::new("General", &[("policiales", "Policiales"), ("deportes", "Deportes")])
    }

    pub fn ctx<'a>(base: &'a Url, sections: &'a SectionTable) -> ZoneContext<'a> {
        ZoneContext { medio: "Ejemplo", base, fecha: fecha(), sections }
    }

    /// Titles and zone names of the records, for compact assertions.
    pub fn summary(records: &[HeadlineRecord]) -> Vec<(String, String)> {
        records.iter().map(|r| (r.zona_portada().to_string(), r.titular().to_string())).collect()
    }

    /// A zone that always panics.
    pub struct Exploding;

    impl Zone for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }

        fn extract(&self, _doc: &Html, _ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError> {
            panic!("selector engine blew up")
        }
    }
}
