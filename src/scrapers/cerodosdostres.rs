//! 0223 front page.
//!
//! Every story on [0223](https://www.0223.com.ar) is an `article.nota--*`
//! card with the same inner structure, so all zones share [`nota`]. Category
//! grids carry no stable class of their own and are found through their
//! "see more" link.

use super::SourceProfile;
use crate::normalize::SectionTable;
use crate::zones::article::ArticleSpec;
use crate::zones::locate::Locator;
use crate::zones::{BlocksZone, GridZone, LeadZone, RankedZone, ZoneSpec};

pub const ID: &str = "0223";

/// Card layout shared by every zone.
///
/// The top kicker (`volantaTop`) is an explicit category and wins over the
/// regular kicker.
fn nota() -> ArticleSpec {
    ArticleSpec::titles(&["h2.nota__titulo-item"])
        .marker("div.nota__titulo")
        .link("a.nota__media--link")
        .category("div.nota__volantaTop a p")
        .kicker("div.nota__volanta a p")
}

fn grid(name: &str, path: &str) -> ZoneSpec {
    ZoneSpec::Grid(GridZone::by_link(name, "div.grid", path, nota()))
}

fn sections() -> SectionTable {
    SectionTable::new(
        "General",
        &[
            ("mar-del-plata", "Mar del Plata"),
            ("mas-alla-de-la-ciudad", "Argentina"),
            ("seguridad", "Seguridad"),
            ("deportes", "Deportes"),
            ("arte-espectaculos", "Espectáculos"),
            ("propiedades", "Propiedades"),
            ("edicion5", "Edición 5"),
            ("historias-de-aca", "Historias de acá"),
            ("politica", "Política"),
        ],
    )
}

pub fn profile() -> SourceProfile {
    let zones = vec![
        ZoneSpec::Lead(
            LeadZone::new("apertura", vec![Locator::css("div.apertura")], nota())
                .primary("div.nota-en-desktop article.nota--gral")
                .secondary("div.notas-secundarias article.nota--gral")
                .dedupe_primary(),
        ),
        ZoneSpec::Blocks(
            BlocksZone::new("relleno", vec![Locator::css("div.relleno")], "article.nota--relleno", nota())
                .list("div.bloque-notas"),
        ),
        grid("mar_del_plata", "/mar-del-plata"),
        grid("argentina", "/mas-alla-de-la-ciudad"),
        grid("seguridad", "/seguridad"),
        grid("deportes", "/deportes"),
        ZoneSpec::Lead(
            LeadZone::new("propiedades", vec![Locator::css("div.bloque-prop")], nota())
                .primary("article.nota--especial")
                .secondary("article.nota--linea"),
        ),
        grid("espectaculos", "/arte-espectaculos"),
        ZoneSpec::Ranked(
            RankedZone::new("mas_leidas", vec![Locator::css("div.mas_leidas")], "article.nota--linea", nota())
                .list("div.bloque-notas-desktop")
                .counter("div.nota__contador")
                .rank_suffix()
                .section("Más Leídas"),
        ),
        ZoneSpec::Lead(
            LeadZone::new("historias_aca", vec![Locator::css("div.bloque-historiasAca")], nota())
                .primary("article.nota--especial")
                .secondary("article.nota--linea"),
        ),
        grid("edicion5", "/edicion5"),
        ZoneSpec::Blocks(
            BlocksZone::new("bloque_3notas", vec![Locator::css("div.bloque-3Notas")], "div.item-4", nota())
                .list("div.grid")
                .label("div.titulo_bloque a"),
        ),
        ZoneSpec::Blocks(
            BlocksZone::new("bloque_sabana", vec![Locator::css("div.bloque_sabana")], "article.nota--relleno", nota())
                .list("div.bloque-notas")
                .single(),
        ),
        ZoneSpec::Lead(
            LeadZone::new("liga_profesional", vec![Locator::css("div.bloque-mundial div.mundial-notasFijas")], nota())
                .primary("article.nota--gral")
                .secondary("article:not(.nota--gral)")
                .primary_section("Liga Profesional"),
        ),
        ZoneSpec::Blocks(
            BlocksZone::new("d_4notas", vec![Locator::css("div.d_4Notas")], "article.nota--relleno", nota())
                .list("div.grid.relleno")
                .single(),
        ),
    ];

    SourceProfile {
        id: ID.to_string(),
        medio: "0223".to_string(),
        base_url: "https://www.0223.com.ar".to_string(),
        user_agent: None,
        sections: sections(),
        zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::{ConfiguredSource, SourceExtractor};
    use crate::zones::testing::fecha;
    use scraper::Html;

    const FRONT_PAGE: &str = r#"
      <html><body>
        <div class="apertura">
          <div class="nota-en-desktop">
            <article class="nota--gral">
              <div class="nota__volanta"><a href="/v"><p>Tránsito</p></a></div>
              <div class="nota__titulo"><a href="/mar-del-plata/corte-costa"><h2 class="nota__titulo-item">Corte en la costa</h2></a></div>
            </article>
          </div>
          <div class="notas-secundarias">
            <article class="nota--gral">
              <div class="nota__titulo"><a href="/mar-del-plata/corte-costa"><h2 class="nota__titulo-item">Corte en la costa</h2></a></div>
            </article>
            <article class="nota--gral">
              <a class="nota__media--link" href="/seguridad/robo-puerto"><img src="r.jpg"></a>
              <div class="nota__titulo"><h2 class="nota__titulo-item">Robo en el puerto</h2></div>
            </article>
          </div>
        </div>
        <div class="grid">
          <div class="titulo_bloque"><a href="/deportes">Deportes</a></div>
          <article><div class="nota__titulo"><a href="/deportes/aldosivi"><h2 class="nota__titulo-item">Aldosivi ganó</h2></a></div></article>
          <article class="publicidad"><img src="ad.gif"></article>
          <article><div class="nota__titulo"><a href="/deportes/peninsula"><h2 class="nota__titulo-item">Peñarol perdió</h2></a></div></article>
        </div>
        <div class="mas_leidas"><div class="bloque-notas-desktop">
          <article class="nota--linea"><div class="nota__contador">1</div>
            <div class="nota__titulo"><a href="/seguridad/choque"><h2 class="nota__titulo-item">Choque fatal</h2></a></div></article>
          <article class="nota--linea"><div class="nota__contador">2</div>
            <div class="nota__titulo"><a href="/mar-del-plata/lluvia"><h2 class="nota__titulo-item">Alerta por lluvias</h2></a></div></article>
        </div></div>
        <div class="bloque-3Notas">
          <div class="titulo_bloque"><a href="/columnas">Columnas</a></div>
          <div class="grid"><div class="item-4"><article class="nota--gral">
            <div class="nota__titulo"><a href="/opinion/columna"><h2 class="nota__titulo-item">Una columna</h2></a></div>
          </article></div></div>
        </div>
        <div class="bloque-mundial"><div class="mundial-notasFijas">
          <article class="nota--gral"><div class="nota__titulo"><a href="/deportes/fecha-7"><h2 class="nota__titulo-item">Se juega la fecha 7</h2></a></div></article>
          <article class="nota--linea"><div class="nota__titulo"><a href="/deportes/tabla"><h2 class="nota__titulo-item">Así está la tabla</h2></a></div></article>
        </div></div>
      </body></html>"#;

    #[test]
    fn test_front_page_zones() {
        let source = ConfiguredSource::from_profile(profile()).unwrap();
        let doc = Html::parse_document(FRONT_PAGE);
        let records = source.extract(&doc, fecha());

        let got: Vec<_> = records.iter().map(|r| (r.zona_portada(), r.titular(), r.seccion())).collect();
        assert_eq!(
            got,
            vec![
                ("apertura_principal", "Corte en la costa", "Tránsito"),
                ("apertura_secundaria_2", "Robo en el puerto", "Seguridad"),
                ("deportes_1", "Aldosivi ganó", "Deportes"),
                ("deportes_3", "Peñarol perdió", "Deportes"),
                ("mas_leidas_1", "Choque fatal", "Más Leídas"),
                ("mas_leidas_2", "Alerta por lluvias", "Más Leídas"),
                ("columnas_1", "Una columna", "Opinion"),
                ("liga_profesional_principal", "Se juega la fecha 7", "Liga Profesional"),
                ("liga_profesional_secundaria_1", "Así está la tabla", "Deportes"),
            ]
        );
        assert_eq!(records[1].url(), "https://www.0223.com.ar/seguridad/robo-puerto");
        assert!(records.iter().all(|r| r.medio() == "0223"));
    }

    #[test]
    fn test_block_ordinals_count_empty_slots() {
        let source = ConfiguredSource::from_profile(profile()).unwrap();
        let doc = Html::parse_document(
            r#"<div class="bloque-3Notas">
                 <div class="titulo_bloque"><a href="/columnas">Columnas</a></div>
                 <div class="grid">
                   <div class="item-4"><div class="publicidad"><img src="ad.gif"></div></div>
                   <div class="item-4"><article class="nota--gral">
                     <div class="nota__titulo"><a href="/opinion/columna"><h2 class="nota__titulo-item">Una columna</h2></a></div>
                   </article></div>
                 </div>
               </div>"#,
        );
        let records = source.extract(&doc, fecha());

        let got: Vec<_> = records.iter().map(|r| (r.zona_portada(), r.titular())).collect();
        assert_eq!(got, vec![("columnas_2", "Una columna")]);
    }

    #[test]
    fn test_zone_order_matches_page_layout() {
        let source = ConfiguredSource::from_profile(profile()).unwrap();
        assert_eq!(
            source.zone_names(),
            vec![
                "apertura",
                "relleno",
                "mar_del_plata",
                "argentina",
                "seguridad",
                "deportes",
                "propiedades",
                "espectaculos",
                "mas_leidas",
                "historias_aca",
                "edicion5",
                "bloque_3notas",
                "bloque_sabana",
                "liga_profesional",
                "d_4notas",
            ]
        );
    }
}
