use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use log::error;
use maud::{html, Markup};
use serde::Deserialize;

use crate::{
    render::{render_chart, render_city, render_table, RenderOutcome},
    templates::{
        city_map, empty_state, map_document, map_unavailable, observations_table, weather_chart,
    },
    AppState, SelectionState,
};

#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
    /// 1-based; anything that is not a number means the first page.
    pub page: Option<String>,
}

impl CityQuery {
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub variable: Option<String>,
}

/// NoChange answers 204 so htmx leaves the target untouched.
fn fragment(outcome: RenderOutcome<Markup>) -> Response {
    match outcome {
        RenderOutcome::NoChange => StatusCode::NO_CONTENT.into_response(),
        RenderOutcome::Empty => Html(empty_state().into_string()).into_response(),
        RenderOutcome::Render(markup) => Html(markup.into_string()).into_response(),
    }
}

/// Handler for the table and map region (GET /fragments/city)
pub async fn city_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Response {
    let mut selection = SelectionState::new();
    if let Err(e) = selection.set_city(query.city.as_deref()) {
        state.unrecognized.warn_once(&e);
        return fragment(RenderOutcome::Empty);
    }

    let view = match render_city(selection.city(), &state.dataset, query.page()) {
        RenderOutcome::Render(view) => view,
        RenderOutcome::NoChange => return fragment(RenderOutcome::NoChange),
        RenderOutcome::Empty => return fragment(RenderOutcome::Empty),
    };

    let map = match state
        .map_files
        .publish(&view.map.file_name(), map_document(&view.map))
        .await
    {
        Ok(document) => city_map(&view.map, &document),
        Err(e) => {
            error!("error publishing map for {}: {}", view.map.city, e);
            map_unavailable(&view.map)
        }
    };

    fragment(RenderOutcome::Render(html! {
        (observations_table(&view.table))
        (map)
    }))
}

/// Handler for table pagination (GET /fragments/table), swaps only the table
pub async fn table_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> Response {
    let mut selection = SelectionState::new();
    if let Err(e) = selection.set_city(query.city.as_deref()) {
        state.unrecognized.warn_once(&e);
        return fragment(RenderOutcome::Empty);
    }

    fragment(
        render_table(selection.city(), &state.dataset, query.page())
            .map(|view| observations_table(&view)),
    )
}

/// Handler for the chart region (GET /fragments/chart)
pub async fn chart_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Response {
    let mut selection = SelectionState::new();
    if let Err(e) = selection.set_variable(query.variable.as_deref()) {
        state.unrecognized.warn_once(&e);
        return fragment(RenderOutcome::Empty);
    }

    fragment(render_chart(selection.variable(), &state.dataset).map(|chart| weather_chart(&chart)))
}
