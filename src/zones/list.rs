//! Plain containers of article cards.
//!
//! The simplest zone: every container the locators find is scanned for
//! items, and every item that reads as an article becomes a record. With
//! no `item` selector the container itself is the article (one-story
//! highlight boxes).

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use super::article::ArticleSpec;
use super::locate::{Locator, locate_all, select_all};
use super::{SectionHint, Zone, ZoneContext, ZoneError};
use crate::models::HeadlineRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListZone {
    pub name: String,
    pub locate: Vec<Locator>,
    /// Item selector inside each container; `None` reads the container itself.
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub article: ArticleSpec,
    /// Zone names by container position; further containers get `<name>_<n>`.
    #[serde(default)]
    pub container_names: Vec<String>,
    /// Suffix each record's zone with its position in the container.
    #[serde(default)]
    pub numbered: bool,
    #[serde(default)]
    pub default_section: Option<String>,
}

impl ListZone {
    pub fn new(name: &str, locate: Vec<Locator>, item: Option<&str>, article: ArticleSpec) -> Self {
        Self {
            name: name.to_string(),
            locate,
            item: item.map(str::to_string),
            article,
            container_names: Vec::new(),
            numbered: false,
            default_section: None,
        }
    }

    pub fn container_names(mut self, names: &[&str]) -> Self {
        self.container_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn numbered(mut self) -> Self {
        self.numbered = true;
        self
    }

    fn container_name(&self, index: usize) -> String {
        if self.container_names.is_empty() {
            return self.name.clone();
        }
        self.container_names.get(index).cloned().unwrap_or_else(|| format!("{}_{}", self.name, index + 1))
    }

    fn items<'a>(&self, container: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>, ZoneError> {
        match &self.item {
            Some(css) => select_all(container, css),
            None => Ok(vec![container]),
        }
    }
}

impl Zone for ListZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, doc: &Html, ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError> {
        let containers = locate_all(doc, &self.locate)?;
        if containers.is_empty() {
            return Err(ZoneError::Absent(self.name.clone()));
        }

        let hint = SectionHint { fixed: None, fallback: self.default_section.as_deref() };
        let mut records = Vec::new();
        for (ci, container) in containers.into_iter().enumerate() {
            let zone_name = self.container_name(ci);
            for (i, item) in self.items(container)?.into_iter().enumerate() {
                if !self.article.is_article(item)? {
                    continue;
                }
                let Some(candidate) = self.article.read(item)? else {
                    continue;
                };
                let zona = if self.numbered { format!("{}_{}", zone_name, i + 1) } else { zone_name.clone() };
                records.extend(ctx.accept(&zona, &candidate, hint));
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
        <section class="recent-module">
          <div class="recent-post"><h2><a href="/policiales/a">Primera</a></h2></div>
          <div class="recent-post"><h2>Sin enlace</h2></div>
          <div class="recent-post"><p>Publicidad</p></div>
          <div class="recent-post"><h2><a href="https://example.com/deportes/b">Segunda</a></h2></div>
        </section>
        <section class="recent-module">
          <div class="recent-post"><h2><a href="/c">Tercera</a></h2></div>
        </section>
        <section class="recent-module">
          <div class="recent-post"><h2><a href="/d">Cuarta</a></h2></div>
        </section>
        <div class="super-destacada">
          <h1 class="widgettitle">Lo destacado</h1>
          <h1><a href="/politica/e">Quinta</a></h1>
        </div>
      </body></html>"#;

    fn recientes() -> ListZone {
        ListZone::new("recientes", vec![Locator::css("section.recent-module")], Some("div.recent-post"), ArticleSpec::default())
            .container_names(&["recientes_superior", "recientes_inferior"])
    }

    #[test]
    fn test_named_containers_and_bad_items_skipped() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let records = recientes().extract(&doc, &ctx(&base, &sections)).unwrap();

        assert_eq!(
            summary(&records),
            vec![
                ("recientes_superior".to_string(), "Primera".to_string()),
                ("recientes_superior".to_string(), "Segunda".to_string()),
                ("recientes_inferior".to_string(), "Tercera".to_string()),
                ("recientes_3".to_string(), "Cuarta".to_string()),
            ]
        );
        assert_eq!(records[0].seccion(), "Policiales");
        assert_eq!(records[1].seccion(), "Deportes");
    }

    #[test]
    fn test_numbered_items() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = ListZone::new("recientes", vec![Locator::css("section.recent-module")], Some("div.recent-post"), ArticleSpec::default())
            .numbered();
        let records = zone.extract(&doc, &ctx(&base, &sections)).unwrap();
        assert_eq!(records[0].zona_portada(), "recientes_1");
        assert_eq!(records[1].zona_portada(), "recientes_4");
    }

    #[test]
    fn test_container_as_article() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = ListZone::new(
            "super-destacada",
            vec![Locator::css("div.super-destacada")],
            None,
            ArticleSpec::titles(&["h1:not([class])"]),
        );
        let records = zone.extract(&doc, &ctx(&base, &sections)).unwrap();
        assert_eq!(summary(&records), vec![("super-destacada".to_string(), "Quinta".to_string())]);
        assert_eq!(records[0].seccion(), "Politica");
    }

    #[test]
    fn test_absent_container() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document("<html><body></body></html>");
        let err = recientes().extract(&doc, &ctx(&base, &sections)).unwrap_err();
        assert_eq!(err, ZoneError::Absent("recientes".to_string()));
    }
}
