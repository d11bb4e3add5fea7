//! La Capital (Mar del Plata) front page.
//!
//! The home page groups stories in `section.seccion` blocks titled with an
//! `h2.seccion-titulo`; the grids are found by their category link and fall
//! back to the visible title when the link changes.

use super::SourceProfile;
use crate::normalize::SectionTable;
use crate::zones::article::ArticleSpec;
use crate::zones::locate::Locator;
use crate::zones::{GridZone, LeadZone, ListZone, RankedZone, ZoneSpec};

pub const ID: &str = "lacapital";

const SECTION: &str = "section.seccion";

fn card() -> ArticleSpec {
    ArticleSpec::titles(&["h2.titulo", "h2", "h3"]).link("a[href]").kicker("span.volanta")
}

fn grid(name: &str, path: &str, title: &str) -> ZoneSpec {
    ZoneSpec::Grid(
        GridZone::by_link(name, SECTION, path, card())
            .or_locate(Locator::heading(SECTION, "h2.seccion-titulo", title))
            .default_section(title),
    )
}

fn sections() -> SectionTable {
    SectionTable::new(
        "General",
        &[
            ("mar-del-plata", "Mar del Plata"),
            ("argentina", "Argentina"),
            ("policiales", "Policiales"),
            ("deportes", "Deportes"),
            ("espectaculos", "Espectáculos"),
            ("politica", "Política"),
            ("la-ciudad", "La Ciudad"),
        ],
    )
}

pub fn profile() -> SourceProfile {
    let zones = vec![
        ZoneSpec::Lead(
            LeadZone::new("apertura", vec![Locator::css("section.apertura"), Locator::css("div.apertura")], card())
                .primary("article.nota-principal")
                .secondary("article.nota-secundaria")
                .dedupe_primary(),
        ),
        ZoneSpec::List(
            ListZone::new("bloque_notas", vec![Locator::css("div.bloque-notas")], Some("article"), card()).numbered(),
        ),
        grid("mar_del_plata", "/mar-del-plata", "Mar del Plata"),
        grid("argentina", "/argentina", "Argentina"),
        grid("policiales", "/policiales", "Policiales"),
        grid("deportes", "/deportes", "Deportes"),
        grid("espectaculos", "/espectaculos", "Espectáculos"),
        ZoneSpec::Ranked(RankedZone::new(
            "Ranking",
            vec![Locator::css("div.mas-leidas ol"), Locator::css("div.ranking ol")],
            "li",
            ArticleSpec::titles(&["a"]),
        )),
    ];

    SourceProfile {
        id: ID.to_string(),
        medio: "La Capital".to_string(),
        base_url: "https://www.lacapitalmdp.com/".to_string(),
        user_agent: None,
        sections: sections(),
        zones,
    }
}
