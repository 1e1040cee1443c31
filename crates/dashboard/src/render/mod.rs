//! Pure functions from (selection, dataset) to what a dashboard region shows.
//!
//! Nothing here performs I/O; the map document is written by the route
//! handler from the [`MapView`] returned here.

mod chart;
mod map;
mod table;

pub use chart::{render_chart, Chart, ChartKind, Series};
pub use map::{render_map, MapView, MAP_TILES, MAP_ZOOM};
pub use table::{format_date, render_table, TableRow, TableView, PAGE_SIZE};

use clima_core::City;

use crate::{Dataset, Selection};

/// Result of recomputing a region.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome<T> {
    /// Nothing selected: leave whatever is on screen as it is.
    NoChange,
    /// Clear the region and show the empty state.
    Empty,
    Render(T),
}

impl<T> RenderOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RenderOutcome<U> {
        match self {
            RenderOutcome::NoChange => RenderOutcome::NoChange,
            RenderOutcome::Empty => RenderOutcome::Empty,
            RenderOutcome::Render(value) => RenderOutcome::Render(f(value)),
        }
    }
}

/// Table and map shown together for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityView {
    pub table: TableView,
    pub map: MapView,
}

pub fn render_city(
    city: Selection<City>,
    dataset: &Dataset,
    page: usize,
) -> RenderOutcome<CityView> {
    match (render_table(city, dataset, page), render_map(city)) {
        (RenderOutcome::Render(table), RenderOutcome::Render(map)) => {
            RenderOutcome::Render(CityView { table, map })
        }
        (RenderOutcome::NoChange, _) | (_, RenderOutcome::NoChange) => RenderOutcome::NoChange,
        _ => RenderOutcome::Empty,
    }
}
