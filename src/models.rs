//! Data model for extracted front-page headlines.
//!
//! A [`HeadlineRecord`] is the single output unit of a run. Records are only
//! built through [`HeadlineRecord::new`], which refuses empty titles and
//! relative or unparseable URLs, so any record that exists is complete.
//!
//! The Spanish field names match the column names of the CSV sink, which
//! downstream spreadsheets already depend on.

use chrono::NaiveDate;
use url::Url;

/// Output columns, in the order they are written.
pub const COLUMNS: [&str; 6] = ["fecha", "medio", "titular", "zona_portada", "seccion", "url"];

/// One headline as it appeared on an outlet's front page.
///
/// # Fields
///
/// * `fecha` - Run date (not the article's publication date)
/// * `medio` - Outlet display name
/// * `titular` - Cleaned headline text, never empty
/// * `zona_portada` - Page zone, with an ordinal suffix where the zone repeats
/// * `seccion` - Category label, explicit or inferred from the URL
/// * `url` - Absolute article URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRecord {
    fecha: NaiveDate,
    medio: String,
    titular: String,
    zona_portada: String,
    seccion: String,
    url: String,
}

impl HeadlineRecord {
    /// Build a record, or `None` when the title is blank or the URL is not absolute.
    pub fn new(
        fecha: NaiveDate,
        medio: impl Into<String>,
        titular: impl Into<String>,
        zona_portada: impl Into<String>,
        seccion: impl Into<String>,
        url: &Url,
    ) -> Option<Self> {
        let titular = titular.into();
        if titular.trim().is_empty() || url.cannot_be_a_base() || url.host_str().is_none() {
            return None;
        }
        Some(Self {
            fecha,
            medio: medio.into(),
            titular,
            zona_portada: zona_portada.into(),
            seccion: seccion.into(),
            url: url.to_string(),
        })
    }

    pub fn medio(&self) -> &str {
        &self.medio
    }

    pub fn titular(&self) -> &str {
        &self.titular
    }

    pub fn zona_portada(&self) -> &str {
        &self.zona_portada
    }

    pub fn seccion(&self) -> &str {
        &self.seccion
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Field values in [`COLUMNS`] order, ready for a tabular sink.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.fecha.format("%Y-%m-%d").to_string(),
            self.medio.clone(),
            self.titular.clone(),
            self.zona_portada.clone(),
            self.seccion.clone(),
            self.url.clone(),
        ]
    }
}
