//! Small string and file system helpers.
//!
//! - Word capitalisation for section labels inferred from URL paths
//! - Slugs for zone names derived from on-page block headings
//! - String truncation for log lines
//! - Writable-path probing before a run starts

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;

use itertools::Itertools;
use tokio::fs;
use tracing::{info, instrument};

/// Capitalize the first character of a string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(upcase("policiales"), "Policiales");
/// assert_eq!(upcase(""), "");
/// ```
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Capitalize every whitespace-separated word.
pub fn title_case(s: &str) -> String {
    s.split_whitespace().map(upcase).join(" ")
}

/// Turn a block heading into a zone-name slug.
///
/// Lowercases the text, drops punctuation and joins words with `_`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_label("Columnas"), "columnas");
/// assert_eq!(slugify_label("Lo más  visto!"), "lo_más_visto");
/// ```
pub fn slugify_label(label: &str) -> String {
    label
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && !c.is_whitespace() && c != '_', "")
        .split_whitespace()
        .join("_")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure the parent directory of `path` exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
/// Used before a run starts so that an unwritable sink or log destination
/// stops the process before any outlet is scraped.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&dir).await?;

    let probe_path = dir.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
