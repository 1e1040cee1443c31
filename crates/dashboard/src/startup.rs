use crate::{
    chart_handler, city_handler, dashboard_handler, table_handler, Dataset, LocalMapFiles,
    MapFiles, UnrecognizedLog,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use clima_core::City;
use clima_provider::{Period, WeatherProvider};
use log::info;
use std::{sync::Arc, time::Duration};
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    /// Loaded once at startup and only read afterwards.
    pub dataset: Arc<Dataset>,
    pub map_files: Arc<dyn MapFiles>,
    pub unrecognized: Arc<UnrecognizedLog>,
}

/// Fetches the dashboard's dataset. Any failure here stops startup.
pub async fn build_app_state(
    provider: &dyn WeatherProvider,
    period: Period,
    fetch_timeout: Duration,
    static_dir: String,
    map_dir: String,
) -> Result<AppState, anyhow::Error> {
    let city = City::PortoAlegre;
    let dataset = Dataset::load_with_timeout(provider, city.point(), period, fetch_timeout)
        .await
        .map_err(|e| anyhow!("error loading weather data for {}: {}", city, e))?;
    info!(
        "dataset ready: {} days for {} ({} to {})",
        dataset.len(),
        city,
        period.start(),
        period.end()
    );

    let map_files = Arc::new(LocalMapFiles::new(map_dir));
    info!("map documents are written to {}", map_files.map_dir());

    Ok(AppState {
        static_dir,
        dataset: Arc::new(dataset),
        map_files,
        unrecognized: Arc::new(UnrecognizedLog::default()),
    })
}

pub fn app(app_state: AppState) -> Router {
    let serve_static = ServeDir::new(&app_state.static_dir);

    Router::new()
        .route("/", get(dashboard_handler))
        // HTMX fragment routes
        .route("/fragments/city", get(city_handler))
        .route("/fragments/table", get(table_handler))
        .route("/fragments/chart", get(chart_handler))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .nest_service("/static", serve_static)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
