//! Lead ("apertura") zones: one main story plus a list of secondary ones.

use scraper::Html;
use serde::{Deserialize, Serialize};

use super::article::ArticleSpec;
use super::locate::{Locator, locate_first, select_all, select_first};
use super::{SectionHint, Zone, ZoneContext, ZoneError};
use crate::models::HeadlineRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadZone {
    pub name: String,
    pub locate: Vec<Locator>,
    /// Main article inside the container.
    #[serde(default)]
    pub primary: Option<String>,
    /// Secondary articles inside the container.
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub article: ArticleSpec,
    /// Skip secondaries whose title repeats the main article's.
    #[serde(default)]
    pub dedupe_primary: bool,
    /// Section forced on the main article.
    #[serde(default)]
    pub primary_section: Option<String>,
    #[serde(default)]
    pub default_section: Option<String>,
}

impl LeadZone {
    pub fn new(name: &str, locate: Vec<Locator>, article: ArticleSpec) -> Self {
        Self {
            name: name.to_string(),
            locate,
            primary: None,
            secondary: None,
            article,
            dedupe_primary: false,
            primary_section: None,
            default_section: None,
        }
    }

    pub fn primary(mut self, css: &str) -> Self {
        self.primary = Some(css.to_string());
        self
    }

    pub fn secondary(mut self, css: &str) -> Self {
        self.secondary = Some(css.to_string());
        self
    }

    pub fn dedupe_primary(mut self) -> Self {
        self.dedupe_primary = true;
        self
    }

    pub fn primary_section(mut self, label: &str) -> Self {
        self.primary_section = Some(label.to_string());
        self
    }
}

impl Zone for LeadZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, doc: &Html, ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError> {
        let Some(container) = locate_first(doc, &self.locate)? else {
            return Err(ZoneError::Absent(self.name.clone()));
        };

        let mut records = Vec::new();
        let mut main_title = None;

        if let Some(css) = &self.primary
            && let Some(el) = select_first(container, css)?
            && let Some(candidate) = self.article.read(el)?
        {
            let hint = SectionHint { fixed: self.primary_section.as_deref(), fallback: self.default_section.as_deref() };
            if let Some(record) = ctx.accept(&format!("{}_principal", self.name), &candidate, hint) {
                main_title = Some(record.titular().to_string());
                records.push(record);
            }
        }

        if let Some(css) = &self.secondary {
            let hint = SectionHint { fixed: None, fallback: self.default_section.as_deref() };
            for (i, el) in select_all(container, css)?.into_iter().enumerate() {
                let Some(candidate) = self.article.read(el)? else {
                    continue;
                };
                let Some(record) = ctx.accept(&format!("{}_secundaria_{}", self.name, i + 1), &candidate, hint) else {
                    continue;
                };
                if self.dedupe_primary && main_title.as_deref() == Some(record.titular()) {
                    continue;
                }
                records.push(record);
            }
        }

        Ok(records)
    }
}
