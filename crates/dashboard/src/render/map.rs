use clima_core::{City, GeoPoint};

use super::RenderOutcome;
use crate::Selection;

pub const MAP_ZOOM: u8 = 10;

/// Basemap tile style.
pub const MAP_TILES: &str = "cartodb positron";

/// Interactive map centred on the chosen city.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub city: City,
    pub center: GeoPoint,
    pub zoom: u8,
    pub tiles: &'static str,
}

impl MapView {
    /// File name the map document is published under.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.city.slug())
    }
}

pub fn render_map(city: Selection<City>) -> RenderOutcome<MapView> {
    match city {
        Selection::Unselected => RenderOutcome::NoChange,
        Selection::Selected(city) => RenderOutcome::Render(MapView {
            city,
            center: city.point(),
            zoom: MAP_ZOOM,
            tiles: MAP_TILES,
        }),
    }
}
