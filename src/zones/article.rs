//! Reading a single article element into a [`Candidate`].

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use super::ZoneError;
use super::locate::{element_text, parse_selector, select_first};

/// How an article element carries its title, link and labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSpec {
    /// Title selectors, tried in order.
    pub title: Vec<String>,
    /// Elements lacking this descendant are not articles.
    pub marker: Option<String>,
    /// Link used when the title is not wrapped in (or wrapping) an anchor.
    pub link: Option<String>,
    /// Explicit on-page category tag.
    pub category: Option<String>,
    /// Volanta / kicker label.
    pub kicker: Option<String>,
}

impl Default for ArticleSpec {
    fn default() -> Self {
        Self { title: vec!["h2".to_string()], marker: None, link: None, category: None, kicker: None }
    }
}

/// Raw fields read from one article, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub titular: String,
    pub href: Option<String>,
    pub category: Option<String>,
    pub kicker: Option<String>,
}

impl ArticleSpec {
    pub fn titles(selectors: &[&str]) -> Self {
        Self { title: selectors.iter().map(|s| s.to_string()).collect(), ..Self::default() }
    }

    pub fn marker(mut self, css: &str) -> Self {
        self.marker = Some(css.to_string());
        self
    }

    pub fn link(mut self, css: &str) -> Self {
        self.link = Some(css.to_string());
        self
    }

    pub fn category(mut self, css: &str) -> Self {
        self.category = Some(css.to_string());
        self
    }

    pub fn kicker(mut self, css: &str) -> Self {
        self.kicker = Some(css.to_string());
        self
    }

    /// Whether `el` carries the configured marker (always true without one).
    pub fn is_article(&self, el: ElementRef<'_>) -> Result<bool, ZoneError> {
        match &self.marker {
            Some(css) => Ok(select_first(el, css)?.is_some()),
            None => Ok(true),
        }
    }

    /// Read `el`, or `None` when no title element is present.
    ///
    /// The link is taken from the title itself when it is an anchor, then from
    /// an anchor enclosing the title, then from an anchor inside the title,
    /// and finally from the fallback `link` selector.
    pub fn read(&self, el: ElementRef<'_>) -> Result<Option<Candidate>, ZoneError> {
        let Some(title) = self.find_title(el)? else {
            return Ok(None);
        };

        let href = match title_anchor(el, title)? {
            Some(anchor) => anchor.value().attr("href").map(str::to_string),
            None => match &self.link {
                Some(css) => select_first(el, css)?.and_then(|a| a.value().attr("href")).map(str::to_string),
                None => None,
            },
        };

        Ok(Some(Candidate {
            titular: element_text(title),
            href,
            category: self.label(el, self.category.as_deref())?,
            kicker: self.label(el, self.kicker.as_deref())?,
        }))
    }

    fn find_title<'a>(&self, el: ElementRef<'a>) -> Result<Option<ElementRef<'a>>, ZoneError> {
        for css in &self.title {
            let selector = parse_selector(css)?;
            if let Some(found) = el.select(&selector).next() {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn label(&self, el: ElementRef<'_>, css: Option<&str>) -> Result<Option<String>, ZoneError> {
        let Some(css) = css else {
            return Ok(None);
        };
        Ok(select_first(el, css)?.map(element_text).filter(|t| !t.is_empty()))
    }
}

fn has_href(el: &ElementRef<'_>) -> bool {
    el.value().name() == "a" && el.value().attr("href").is_some_and(|h| !h.trim().is_empty())
}

/// Anchor that links the title, searching no higher than `article`.
fn title_anchor<'a>(article: ElementRef<'a>, title: ElementRef<'a>) -> Result<Option<ElementRef<'a>>, ZoneError> {
    if has_href(&title) {
        return Ok(Some(title));
    }
    let enclosing = title
        .ancestors()
        .take_while(|node| node.id() != article.id())
        .filter_map(ElementRef::wrap)
        .find(has_href);
    if enclosing.is_some() {
        return Ok(enclosing);
    }
    if has_href(&article) && title.id() != article.id() {
        return Ok(Some(article));
    }
    Ok(select_first(title, "a[href]")?.filter(has_href))
}
