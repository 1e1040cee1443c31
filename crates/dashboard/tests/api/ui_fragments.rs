use crate::helpers::{echo_map_store, get, spawn_app, MockMapStore};
use axum::http::StatusCode;
use clima::MapFileError;
use std::sync::Arc;

#[tokio::test]
async fn dashboard_starts_with_nothing_selected() {
    let mut maps = MockMapStore::new();
    maps.expect_publish().times(0);
    let test_app = spawn_app(Arc::new(maps)).await;

    let (status, html) = get(&test_app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Clima</title>"));
    assert!(html.contains("Selecione uma cidade"));
    assert!(html.contains(r#"<option value="Porto Alegre">Porto Alegre</option>"#));
    assert!(html.contains("Variável escolhida"));
    for value in ["Temperatura", "Vento", "Precipitacao"] {
        assert!(html.contains(&format!(r#"value="{}""#, value)), "{value}");
    }
    assert!(!html.contains("checked"));
    assert!(html.contains(r#"<div id="city-views"></div>"#));
    assert!(html.contains(r#"<div id="chart" class="chart-region"></div>"#));
}

#[tokio::test]
async fn city_fragment_renders_newest_page_and_map() {
    let mut maps = MockMapStore::new();
    maps.expect_publish()
        .withf(|name, _| name == "porto-alegre.html")
        .times(1)
        .returning(|_, document| Ok(document));
    let test_app = spawn_app(Arc::new(maps)).await;

    let (status, html) = get(&test_app, "/fragments/city?city=Porto%20Alegre").await;

    assert_eq!(status, StatusCode::OK);
    for label in [
        "Data",
        "Temp. Média",
        "Temp. Min",
        "Temp. Max",
        "Precipitação",
        "Veloc. Vento",
        "Pressão",
        "Tempo de Sol",
    ] {
        assert!(html.contains(&format!("<th>{}</th>", label)), "{label}");
    }
    // header row plus one page of days
    assert_eq!(html.matches("<tr").count(), 31);
    assert!(html.contains("<td>06-11-2023</td>"));
    assert!(!html.contains("01-01-2023"));
    assert!(html.contains("Página 1 de 11 (310 dias)"));
    assert!(!html.contains("snow") && !html.contains("wpgt"));

    assert!(html.contains("<iframe"));
    assert!(html.contains("setView([-29.9153435, -51.2601959], 10)"));
    assert!(html.contains("light_all"));
}

#[tokio::test]
async fn clearing_the_city_changes_nothing() {
    let mut maps = MockMapStore::new();
    maps.expect_publish().times(0);
    let test_app = spawn_app(Arc::new(maps)).await;

    for uri in ["/fragments/city", "/fragments/city?city=", "/fragments/table?page=2"] {
        let (status, html) = get(&test_app, uri).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
        assert!(html.is_empty());
    }
}

#[tokio::test]
async fn unknown_city_renders_empty_state() {
    let mut maps = MockMapStore::new();
    maps.expect_publish().times(0);
    let test_app = spawn_app(Arc::new(maps)).await;

    let (status, html) = get(&test_app, "/fragments/city?city=Gotham").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Nenhum dado disponível"));
    assert!(!html.contains("<table"));
}

#[tokio::test]
async fn table_pages_swap_only_the_table() {
    let mut maps = MockMapStore::new();
    maps.expect_publish().times(0);
    let test_app = spawn_app(Arc::new(maps)).await;

    let (status, html) = get(&test_app, "/fragments/table?city=Porto%20Alegre&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td>07-10-2023</td>"));
    assert!(html.contains("Página 2 de 11"));
    assert!(!html.contains("<iframe"));

    // past the end clamps to the last page
    let (_, last) = get(&test_app, "/fragments/table?city=Porto%20Alegre&page=99").await;
    assert!(last.contains("Página 11 de 11"));
    assert!(last.contains("<td>01-01-2023</td>"));
    assert_eq!(last.matches("<tr").count(), 11);
}

#[tokio::test]
async fn map_failure_keeps_the_table() {
    let mut maps = MockMapStore::new();
    maps.expect_publish()
        .times(1)
        .returning(|name, _| Err(MapFileError::InvalidName(name.to_string())));
    let test_app = spawn_app(Arc::new(maps)).await;

    let (status, html) = get(&test_app, "/fragments/city?city=Porto%20Alegre").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td>06-11-2023</td>"));
    assert!(html.contains("Mapa de Porto Alegre indisponível"));
    assert!(!html.contains("<iframe"));
}

#[tokio::test]
async fn temperature_chart_has_three_lines() {
    let test_app = spawn_app(Arc::new(echo_map_store())).await;

    let (status, html) = get(&test_app, "/fragments/chart?variable=Temperatura").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"<path class="series""#).count(), 3);
    assert_eq!(html.matches(r#"data-points="310""#).count(), 3);
    for (label, color) in [
        ("Temperatura Média", "blue"),
        ("Temperatura Máxima", "red"),
        ("Temperatura Mínima", "green"),
    ] {
        assert!(html.contains(&format!(r#"data-label="{}""#, label)), "{label}");
        assert!(html.contains(&format!(r#"stroke="{}" stroke-width="2""#, color)), "{color}");
    }
    assert!(!html.contains(r#"class="bar""#));
}

#[tokio::test]
async fn wind_chart_has_one_line() {
    let test_app = spawn_app(Arc::new(echo_map_store())).await;

    let (_, html) = get(&test_app, "/fragments/chart?variable=Vento").await;

    assert_eq!(html.matches(r#"<path class="series""#).count(), 1);
    assert!(html.contains(r#"data-label="Velocidade do Vento""#));
}

#[tokio::test]
async fn precipitation_chart_draws_bars() {
    let test_app = spawn_app(Arc::new(echo_map_store())).await;

    let (status, html) = get(&test_app, "/fragments/chart?variable=Precipitacao").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("chart-bar"));
    // every day has a value, zero included
    assert_eq!(html.matches(r#"<rect class="bar""#).count(), 310);
    assert!(!html.contains("<path"));
    assert!(html.contains("Precipitação"));
}

#[tokio::test]
async fn chart_selection_edge_cases() {
    let test_app = spawn_app(Arc::new(echo_map_store())).await;

    let (status, html) = get(&test_app, "/fragments/chart").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(html.is_empty());

    let (status, html) = get(&test_app, "/fragments/chart?variable=Umidade").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Nenhum dado disponível"));

    // a repeated unknown value still renders empty
    let (_, again) = get(&test_app, "/fragments/chart?variable=Umidade").await;
    assert_eq!(again, html);
}
