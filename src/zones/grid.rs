//! Category grids keyed by the section's outbound link.
//!
//! Outlets render each category block as a generic grid whose only stable
//! feature is the "see more" link to the category page, so the grid is
//! normally located with [`Locator::LinkPath`].

use scraper::Html;
use serde::{Deserialize, Serialize};

use super::article::ArticleSpec;
use super::locate::{Locator, locate_first, select_all};
use super::{SectionHint, Zone, ZoneContext, ZoneError};
use crate::models::HeadlineRecord;

fn default_item() -> String {
    "article".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridZone {
    pub name: String,
    pub locate: Vec<Locator>,
    #[serde(default = "default_item")]
    pub item: String,
    #[serde(default)]
    pub article: ArticleSpec,
    #[serde(default)]
    pub default_section: Option<String>,
}

impl GridZone {
    /// Grid found by the first `container` holding a link to `path`.
    pub fn by_link(name: &str, container: &str, path: &str, article: ArticleSpec) -> Self {
        Self {
            name: name.to_string(),
            locate: vec![Locator::link_path(container, path)],
            item: default_item(),
            article,
            default_section: None,
        }
    }

    /// Add a fallback heuristic, tried after the ones already configured.
    pub fn or_locate(mut self, locator: Locator) -> Self {
        self.locate.push(locator);
        self
    }

    pub fn default_section(mut self, label: &str) -> Self {
        self.default_section = Some(label.to_string());
        self
    }
}

impl Zone for GridZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, doc: &Html, ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError> {
        let Some(grid) = locate_first(doc, &self.locate)? else {
            return Err(ZoneError::Absent(self.name.clone()));
        };

        let hint = SectionHint { fixed: None, fallback: self.default_section.as_deref() };
        let mut records = Vec::new();
        // Ordinals count every item so they match the visual slot on the page.
        for (i, item) in select_all(grid, &self.item)?.into_iter().enumerate() {
            if !self.article.is_article(item)? {
                continue;
            }
            if let Some(candidate) = self.article.read(item)? {
                records.extend(ctx.accept(&format!("{}_{}", self.name, i + 1), &candidate, hint));
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    const PAGE: &str = r#"
      <html><body>
        <div class="grid">
          <div class="titulo_bloque"><a href="/deportes">Deportes</a></div>
          <article><div class="nota__titulo"><a href="/deportes/n1"><h2 class="nota__titulo-item">Gol de último minuto</h2></a></div></article>
          <article class="publicidad"><img src="banner.gif"></article>
          <article><div class="nota__titulo"><a href="/"><h2 class="nota__titulo-item">Portada</h2></a></div></article>
        </div>
        <div class="grid">
          <h3>Policiales</h3>
          <article><div class="nota__titulo"><a href="/p/1"><h2 class="nota__titulo-item">Choque</h2></a></div></article>
        </div>
      </body></html>"#;

    fn nota() -> ArticleSpec {
        ArticleSpec::titles(&["h2.nota__titulo-item"]).marker("div.nota__titulo")
    }

    #[test]
    fn test_grid_by_link_path() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = GridZone::by_link("deportes", "div.grid", "/deportes", nota()).default_section("Deportes");
        let records = zone.extract(&doc, &ctx(&base, &sections)).unwrap();

        assert_eq!(
            summary(&records),
            vec![
                ("deportes_1".to_string(), "Gol de último minuto".to_string()),
                ("deportes_3".to_string(), "Portada".to_string()),
            ]
        );
        // root link: no path to infer from, zone default applies
        assert_eq!(records[1].seccion(), "Deportes");
    }

    #[test]
    fn test_heading_fallback_when_link_missing() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = GridZone::by_link("policiales", "div.grid", "/policiales", nota())
            .or_locate(Locator::heading("div.grid", "h3", "Policiales"));
        let records = zone.extract(&doc, &ctx(&base, &sections)).unwrap();
        assert_eq!(summary(&records), vec![("policiales_1".to_string(), "Choque".to_string())]);
    }

    #[test]
    fn test_grid_absent() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = GridZone::by_link("edicion5", "div.grid", "/edicion5", nota());
        assert_eq!(zone.extract(&doc, &ctx(&base, &sections)), Err(ZoneError::Absent("edicion5".into())));
    }
}
