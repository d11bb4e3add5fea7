//! Field normalisation shared by every zone extractor.
//!
//! These are pure functions: whitespace cleanup of extracted text, resolution
//! of `href` attributes against an outlet's base URL, and inference of a
//! section label from the first segment of an article's URL path.

use std::collections::BTreeMap;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::utils::title_case;

/// Leading ranking numeral left in "most read" titles by some markup.
static LEADING_RANK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)[\s.)\-:º°]*").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed URL: {0}")]
    MalformedUrl(String),
}

/// Per-outlet lookup table from URL path segment to display section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTable {
    /// Label used when the URL path is empty.
    #[serde(default = "default_section")]
    pub default: String,
    /// Known path segments, matched case-insensitively.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

fn default_section() -> String {
    "General".to_string()
}

impl Default for SectionTable {
    fn default() -> Self {
        Self { default: default_section(), entries: BTreeMap::new() }
    }
}

impl SectionTable {
    pub fn new(default: &str, entries: &[(&str, &str)]) -> Self {
        Self {
            default: default.to_string(),
            entries: entries
                .iter()
                .map(|(segment, label)| (segment.to_lowercase(), label.to_string()))
                .collect(),
        }
    }

    pub fn lookup(&self, segment: &str) -> Option<&str> {
        self.entries.get(&segment.to_lowercase()).map(String::as_str)
    }
}

/// Collapse whitespace runs into single spaces and trim both ends.
///
/// Entities are already decoded by the HTML parser, and non-breaking spaces
/// count as whitespace, so the result is plain display text. Idempotent.
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().join(" ")
}

/// Join a possibly relative `href` against `base`.
///
/// Absolute `href`s come back unchanged apart from standard URL
/// normalisation.
///
/// # Errors
///
/// [`NormalizeError::MalformedUrl`] when `href` is absent, blank, or cannot be
/// joined.
pub fn resolve_url(base: &Url, href: Option<&str>) -> Result<Url, NormalizeError> {
    let href = href.map(str::trim).filter(|h| !h.is_empty());
    let Some(href) = href else {
        return Err(NormalizeError::MalformedUrl("missing href".to_string()));
    };
    base.join(href).map_err(|e| NormalizeError::MalformedUrl(format!("{href}: {e}")))
}

/// First path segment of `url` once `base` is stripped, if any.
fn first_segment(url: &str, base: &Url) -> Option<String> {
    let base_str = base.as_str().trim_end_matches('/');
    let path = match url.strip_prefix(base_str) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '?', '#']) => rest.to_string(),
        _ => match Url::parse(url) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => url.to_string(),
        },
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').find(|s| !s.trim().is_empty()).map(str::to_string)
}

/// Section label for a URL path, or `None` when the path is empty.
pub fn section_from_url(url: &str, base: &Url, table: &SectionTable) -> Option<String> {
    let segment = first_segment(url, base)?;
    if let Some(label) = table.lookup(&segment) {
        return Some(label.to_string());
    }
    let words = segment.replace(['-', '_'], " ");
    let label = title_case(&words);
    (!label.is_empty()).then_some(label)
}

/// Infer a section from the URL path.
///
/// Mapped segments return their table value, unmapped ones are title-cased
/// with `-` and `_` read as spaces, and an empty path gives the table's
/// default.
pub fn infer_section(url: &str, base: &Url, table: &SectionTable) -> String {
    section_from_url(url, base, table).unwrap_or_else(|| table.default.clone())
}

/// Remove a leading ranking numeral such as `"1"` or `"3. "` from a title.
///
/// A title that is nothing but digits is returned untouched.
pub fn strip_leading_rank(title: &str) -> String {
    let stripped = LEADING_RANK.replace(title, "");
    if stripped.trim().is_empty() { title.to_string() } else { stripped.into_owned() }
}

/// Remove the leading numeral of a ranked title only when it repeats `rank`.
///
/// Ranked lists sometimes render the position inside the title element
/// (`"1matan a comerciante"` at position 1); a headline that merely starts
/// with a number (`"3 detenidos"` at position 1, `"4x4 volcó"`) is kept.
///
/// # Arguments
///
/// * `title` - Cleaned title text
/// * `rank` - 1-based position of the item in its list
pub fn strip_rank(title: &str, rank: usize) -> String {
    let repeats_rank = LEADING_RANK
        .captures(title)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .is_some_and(|n| n == rank);
    if repeats_rank { strip_leading_rank(title) } else { title.to_string() }
}
