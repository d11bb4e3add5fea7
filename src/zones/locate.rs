//! Container location heuristics.
//!
//! Site markup is not a stable contract, so every zone names its container
//! through a list of [`Locator`]s kept in the outlet profile. Locators are
//! tried in order and the first one that matches anything wins; results of
//! different locators are never merged.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::ZoneError;
use crate::normalize::clean_text;

/// One way of finding a zone's container(s) on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// Every element matching a CSS selector.
    Selector { css: String },
    /// Elements matching `container` that hold a link whose `href` is exactly `href`.
    LinkPath { container: String, href: String },
    /// Elements matching `container` whose `heading` text equals `text` (case-insensitive).
    Heading { container: String, heading: String, text: String },
}

impl Locator {
    pub fn css(css: &str) -> Self {
        Locator::Selector { css: css.to_string() }
    }

    pub fn link_path(container: &str, href: &str) -> Self {
        Locator::LinkPath { container: container.to_string(), href: href.to_string() }
    }

    pub fn heading(container: &str, heading: &str, text: &str) -> Self {
        Locator::Heading { container: container.to_string(), heading: heading.to_string(), text: text.to_string() }
    }

    /// All containers this heuristic finds below `root`, in document order.
    pub fn find_all<'a>(&self, root: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>, ZoneError> {
        match self {
            Locator::Selector { css } => select_all(root, css),
            Locator::LinkPath { container, href } => {
                let anchors = parse_selector("a[href]")?;
                Ok(select_all(root, container)?
                    .into_iter()
                    .filter(|c| c.select(&anchors).any(|a| a.value().attr("href") == Some(href.as_str())))
                    .collect())
            }
            Locator::Heading { container, heading, text } => {
                let heading = parse_selector(heading)?;
                let wanted = clean_text(text).to_lowercase();
                Ok(select_all(root, container)?
                    .into_iter()
                    .filter(|c| c.select(&heading).any(|h| element_text(h).to_lowercase() == wanted))
                    .collect())
            }
        }
    }
}

/// Containers from the first locator that finds any.
pub fn locate_all<'a>(doc: &'a Html, locators: &[Locator]) -> Result<Vec<ElementRef<'a>>, ZoneError> {
    for locator in locators {
        let found = locator.find_all(doc.root_element())?;
        if !found.is_empty() {
            return Ok(found);
        }
    }
    Ok(Vec::new())
}

/// First container from the first locator that finds any.
pub fn locate_first<'a>(doc: &'a Html, locators: &[Locator]) -> Result<Option<ElementRef<'a>>, ZoneError> {
    Ok(locate_all(doc, locators)?.into_iter().next())
}

pub fn parse_selector(css: &str) -> Result<Selector, ZoneError> {
    Selector::parse(css).map_err(|e| ZoneError::Selector { css: css.to_string(), reason: e.to_string() })
}

/// Descendants of `el` matching `css`.
pub fn select_all<'a>(el: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, ZoneError> {
    let selector = parse_selector(css)?;
    Ok(el.select(&selector).collect())
}

/// First descendant of `el` matching `css`.
pub fn select_first<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>, ZoneError> {
    let selector = parse_selector(css)?;
    Ok(el.select(&selector).next())
}

/// Cleaned text content of an element.
pub fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}
