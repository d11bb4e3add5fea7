//! Ranked "most read" lists.

use scraper::Html;
use serde::{Deserialize, Serialize};

use super::article::ArticleSpec;
use super::locate::{Locator, element_text, locate_first, select_all, select_first};
use super::{SectionHint, Zone, ZoneContext, ZoneError};
use crate::models::HeadlineRecord;
use crate::normalize::strip_rank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedZone {
    pub name: String,
    pub locate: Vec<Locator>,
    /// Inner list container; the zone is absent when it is missing.
    #[serde(default)]
    pub list: Option<String>,
    pub item: String,
    /// Element holding the rank number; otherwise rank is the item position.
    #[serde(default)]
    pub counter: Option<String>,
    #[serde(default)]
    pub article: ArticleSpec,
    /// Zone name becomes `<name>_<rank>`.
    #[serde(default)]
    pub rank_suffix: bool,
    /// Section for every item, e.g. "Más Leídas".
    #[serde(default)]
    pub section: Option<String>,
}

impl RankedZone {
    pub fn new(name: &str, locate: Vec<Locator>, item: &str, article: ArticleSpec) -> Self {
        Self {
            name: name.to_string(),
            locate,
            list: None,
            item: item.to_string(),
            counter: None,
            article,
            rank_suffix: false,
            section: None,
        }
    }

    pub fn list(mut self, css: &str) -> Self {
        self.list = Some(css.to_string());
        self
    }

    pub fn counter(mut self, css: &str) -> Self {
        self.counter = Some(css.to_string());
        self
    }

    pub fn rank_suffix(mut self) -> Self {
        self.rank_suffix = true;
        self
    }

    pub fn section(mut self, label: &str) -> Self {
        self.section = Some(label.to_string());
        self
    }
}

impl Zone for RankedZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, doc: &Html, ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError> {
        let Some(container) = locate_first(doc, &self.locate)? else {
            return Err(ZoneError::Absent(self.name.clone()));
        };
        let list = match &self.list {
            Some(css) => select_first(container, css)?.ok_or_else(|| ZoneError::Absent(format!("{} ({css})", self.name)))?,
            None => container,
        };

        let hint = SectionHint { fixed: self.section.as_deref(), fallback: None };
        let mut records = Vec::new();
        for (i, item) in select_all(list, &self.item)?.into_iter().enumerate() {
            let Some(mut candidate) = self.article.read(item)? else {
                continue;
            };

            let rank = match &self.counter {
                Some(css) => select_first(item, css)?
                    .map(element_text)
                    .and_then(|t| t.trim_end_matches(['.', 'º', '°']).parse::<usize>().ok()),
                None => None,
            }
            .unwrap_or(i + 1);
            // A separate counter element means the title carries no rank artifact.
            if self.counter.is_none() {
                candidate.titular = strip_rank(&candidate.titular, rank);
            }

            let zona = if self.rank_suffix { format!("{}_{}", self.name, rank) } else { self.name.clone() };
            records.extend(ctx.accept(&zona, &candidate, hint));
        }
        Ok(records)
    }
}
