use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::render::MapView;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const POSITRON_URL: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
const POSITRON_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

/// Tile layer for a named basemap style. Unknown names fall back to positron.
fn tile_layer(tiles: &str) -> (&'static str, &'static str) {
    match tiles {
        "openstreetmap" => (
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        ),
        _ => (POSITRON_URL, POSITRON_ATTRIBUTION),
    }
}

/// Standalone Leaflet document for a map view.
pub fn map_document(view: &MapView) -> String {
    let (url, attribution) = tile_layer(view.tiles);
    let script = format!(
        "var map = L.map('map').setView([{lat}, {lon}], {zoom});\n\
         L.tileLayer({url}, {{attribution: {attribution}, subdomains: 'abcd', maxZoom: 20}}).addTo(map);",
        lat = view.center.latitude,
        lon = view.center.longitude,
        zoom = view.zoom,
        url = serde_json::Value::from(url),
        attribution = serde_json::Value::from(attribution),
    );

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" href=(LEAFLET_CSS);
                script src=(LEAFLET_JS) {}
                style { "html, body, #map { height: 100%; width: 100%; margin: 0; }" }
            }
            body {
                div id="map" data-lat=(view.center.latitude) data-lon=(view.center.longitude) data-zoom=(view.zoom) {}
                script { (PreEscaped(script)) }
            }
        }
    }
    .into_string()
}

/// Embeds a published map document.
pub fn city_map(view: &MapView, document: &str) -> Markup {
    html! {
        div class="city-map" {
            iframe title={ "Mapa de " (view.city.label()) } srcdoc=(document) width="100%" height="600" {}
        }
    }
}

pub fn map_unavailable(view: &MapView) -> Markup {
    html! {
        div class="city-map notification is-warning is-light" {
            (format!("Mapa de {} indisponível no momento.", view.city))
        }
    }
}
