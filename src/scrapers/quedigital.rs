//! QueDigital front page.
//!
//! [QueDigital](https://quedigital.com.ar) runs a WordPress theme: stories
//! are `h2 > a` cards grouped in widget sidebars, so most zones are plain
//! lists keyed by the sidebar id or the module class.

use super::SourceProfile;
use crate::normalize::SectionTable;
use crate::zones::article::ArticleSpec;
use crate::zones::locate::Locator;
use crate::zones::{ListZone, RankedZone, ZoneSpec};

pub const ID: &str = "quedigital";

const WIDGET: &str = "div.widget_singlepostwidget";

fn sections() -> SectionTable {
    SectionTable::new(
        "General",
        &[
            ("politica", "Política"),
            ("policiales", "Policiales"),
            ("sociedad", "Sociedad"),
            ("economia", "Economía"),
            ("deportes", "Deportes"),
            ("cultura", "Cultura"),
            ("opinion", "Opinión"),
            ("salud", "Salud"),
            ("educacion", "Educación"),
        ],
    )
}

/// One of the stacked "grupo" sidebars below the fold.
fn grupo(name: &str, sidebar: &str) -> ZoneSpec {
    ZoneSpec::List(ListZone::new(
        name,
        vec![Locator::css(&format!("div#{sidebar}"))],
        Some(WIDGET),
        ArticleSpec::titles(&["h2.titulogrupo"]).link("a[href]"),
    ))
}

pub fn profile() -> SourceProfile {
    let zones = vec![
        ZoneSpec::List(ListZone::new(
            "destacados_principal",
            vec![Locator::css("div#featured")],
            Some("div.et-featured-post"),
            ArticleSpec::default(),
        )),
        ZoneSpec::List(
            ListZone::new("recientes", vec![Locator::css("section.recent-module")], Some("div.recent-post"), ArticleSpec::default())
                .container_names(&["recientes_superior", "recientes_inferior"]),
        ),
        ZoneSpec::List(ListZone::new(
            "especiales",
            vec![Locator::css("div.especiales")],
            Some(WIDGET),
            ArticleSpec::titles(&["h2.titulogrupo", "h2"]).link("a[href]").category("div.categ"),
        )),
        ZoneSpec::List(ListZone::new(
            "super-destacada",
            vec![Locator::css("div.super-destacada")],
            None,
            ArticleSpec::titles(&["h1:not([class])"]),
        )),
        grupo("doble_inferior", "sidebar-grupo-doble-inferior"),
        grupo("cuadruple_inferior", "sidebar-grupo-cuadruple-inferior"),
        grupo("triple_inferior", "sidebar-grupo-triple-inferior"),
        ZoneSpec::Ranked(RankedZone::new(
            "mas_vistas",
            vec![Locator::css("div.widget.popular-posts")],
            "li",
            ArticleSpec::titles(&["a.wpp-post-title"]),
        )),
        ZoneSpec::List(ListZone::new(
            "deportes",
            vec![Locator::css("section.recent-deportes")],
            Some("div.recent-deporte"),
            ArticleSpec::default(),
        )),
        ZoneSpec::List(ListZone::new(
            "cultura",
            vec![Locator::css("section.recent-cultura")],
            Some("div.recent-cul"),
            ArticleSpec::default(),
        )),
    ];

    SourceProfile {
        id: ID.to_string(),
        medio: "QueDigital".to_string(),
        base_url: "https://quedigital.com.ar".to_string(),
        user_agent: None,
        sections: sections(),
        zones,
    }
}
