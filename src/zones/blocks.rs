//! Repeated filler blocks.
//!
//! Home pages pad the space between named sections with blocks that share
//! a class and hold a handful of assorted stories. Every block is read;
//! records are named `<name>_<block>_<item>`, or `<label>_<item>` when the
//! block carries its own heading.

use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::article::ArticleSpec;
use super::locate::{Locator, element_text, locate_all, select_all, select_first};
use super::{SectionHint, Zone, ZoneContext, ZoneError};
use crate::models::HeadlineRecord;
use crate::utils::slugify_label;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocksZone {
    pub name: String,
    pub locate: Vec<Locator>,
    /// Inner container holding the items; blocks without it are skipped.
    #[serde(default)]
    pub list: Option<String>,
    pub item: String,
    /// Block heading that names the block's records.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub article: ArticleSpec,
    /// Include the block position in zone names.
    #[serde(default = "yes")]
    pub numbered_blocks: bool,
}

fn yes() -> bool {
    true
}

impl BlocksZone {
    pub fn new(name: &str, locate: Vec<Locator>, item: &str, article: ArticleSpec) -> Self {
        Self {
            name: name.to_string(),
            locate,
            list: None,
            item: item.to_string(),
            label: None,
            article,
            numbered_blocks: true,
        }
    }

    pub fn list(mut self, css: &str) -> Self {
        self.list = Some(css.to_string());
        self
    }

    pub fn label(mut self, css: &str) -> Self {
        self.label = Some(css.to_string());
        self
    }

    /// Single-block zones: records are `<name>_<item>`.
    pub fn single(mut self) -> Self {
        self.numbered_blocks = false;
        self
    }
}

impl Zone for BlocksZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, doc: &Html, ctx: &ZoneContext<'_>) -> Result<Vec<HeadlineRecord>, ZoneError> {
        let blocks = locate_all(doc, &self.locate)?;
        if blocks.is_empty() {
            return Err(ZoneError::Absent(self.name.clone()));
        }

        let mut records = Vec::new();
        for (bi, block) in blocks.into_iter().enumerate() {
            let prefix = match &self.label {
                Some(css) => select_first(block, css)?.map(element_text).map(|t| slugify_label(&t)),
                None => None,
            }
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| {
                if self.numbered_blocks { format!("{}_{}", self.name, bi + 1) } else { self.name.clone() }
            });

            let list = match &self.list {
                Some(css) => match select_first(block, css)? {
                    Some(list) => list,
                    None => {
                        debug!(zone = %self.name, block = bi + 1, "Block without item list");
                        continue;
                    }
                },
                None => block,
            };

            let hint = SectionHint { fixed: None, fallback: None };
            for (i, item) in select_all(list, &self.item)?.into_iter().enumerate() {
                if !self.article.is_article(item)? {
                    continue;
                }
                if let Some(candidate) = self.article.read(item)? {
                    records.extend(ctx.accept(&format!("{}_{}", prefix, i + 1), &candidate, hint));
                }
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
        <div class="relleno"><div class="bloque-notas">
          <article class="nota--relleno">
            <div class="nota__volantaTop"><a href="/x"><p>Turismo</p></a></div>
            <div class="nota__volanta"><a href="/y"><p>Verano</p></a></div>
            <a href="/turismo/a1"><h2 class="nota__titulo-item">Temporada récord</h2></a>
          </article>
          <article class="nota--relleno">
            <div class="nota__volanta"><a href="/y"><p>Verano</p></a></div>
            <a href="/turismo/a2"><h2 class="nota__titulo-item">Playas llenas</h2></a>
          </article>
        </div></div>
        <div class="relleno"><p>vacío</p></div>
        <div class="relleno"><div class="bloque-notas">
          <article class="nota--relleno"><a href="/deportes/c1"><h2 class="nota__titulo-item">Tercera</h2></a></article>
        </div></div>
        <div class="bloque-3Notas">
          <div class="titulo_bloque"><a href="/columnas">Columnas</a></div>
          <div class="grid"><div class="item-4"><article class="nota--gral"><a href="/opinion/1"><h2 class="nota__titulo-item">Opinión</h2></a></article></div></div>
        </div>
        <div class="bloque-3Notas">
          <div class="grid"><div class="item-4"><article class="nota--gral"><a href="/virales/1"><h2 class="nota__titulo-item">Viral</h2></a></article></div></div>
        </div>
      </body></html>"#;

    fn nota() -> ArticleSpec {
        ArticleSpec::titles(&["h2.nota__titulo-item"]).category("div.nota__volantaTop a p").kicker("div.nota__volanta a p")
    }

    #[test]
    fn test_relleno_blocks() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = BlocksZone::new("relleno", vec![Locator::css("div.relleno")], "article.nota--relleno", nota())
            .list("div.bloque-notas");
        let records = zone.extract(&doc, &ctx(&base, &sections)).unwrap();

        assert_eq!(
            summary(&records),
            vec![
                ("relleno_1_1".to_string(), "Temporada récord".to_string()),
                ("relleno_1_2".to_string(), "Playas llenas".to_string()),
                ("relleno_3_1".to_string(), "Tercera".to_string()),
            ]
        );
        assert_eq!(records[0].seccion(), "Turismo");
        assert_eq!(records[1].seccion(), "Verano");
        assert_eq!(records[2].seccion(), "Deportes");
    }

    #[test]
    fn test_labelled_blocks() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = BlocksZone::new("bloque_3notas", vec![Locator::css("div.bloque-3Notas")], "div.item-4", nota())
            .list("div.grid")
            .label("div.titulo_bloque a");
        let records = zone.extract(&doc, &ctx(&base, &sections)).unwrap();

        assert_eq!(
            summary(&records),
            vec![("columnas_1".to_string(), "Opinión".to_string()), ("bloque_3notas_2_1".to_string(), "Viral".to_string())]
        );
    }

    #[test]
    fn test_single_block_naming() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document(PAGE);
        let zone = BlocksZone::new("bloque_sabana", vec![Locator::css("div.relleno")], "article", nota())
            .list("div.bloque-notas")
            .single();
        let records = zone.extract(&doc, &ctx(&base, &sections)).unwrap();
        assert_eq!(records[0].zona_portada(), "bloque_sabana_1");
    }

    #[test]
    fn test_no_blocks_is_absent() {
        let (base, sections) = (base(), sections());
        let doc = Html::parse_document("<html></html>");
        let zone = BlocksZone::new("d_4notas", vec![Locator::css("div.d_4Notas")], "article", nota());
        assert!(matches!(zone.extract(&doc, &ctx(&base, &sections)), Err(ZoneError::Absent(_))));
    }
}
