use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use clima::{app, AppState, Dataset, MapFileError, MapFiles, UnrecognizedLog};
use clima_core::{City, GeoPoint};
use clima_provider::{DailyRow, Period, ProviderError, WeatherProvider};
use hyper::{header, Method};
use mockall::mock;
use std::sync::Arc;
use time::macros::date;
use tower::ServiceExt;

mock! {
    pub Provider {}

    #[async_trait]
    impl WeatherProvider for Provider {
        async fn daily(&self, point: GeoPoint, period: Period) -> Result<Vec<DailyRow>, ProviderError>;
    }
}

mock! {
    pub MapStore {}

    #[async_trait]
    impl MapFiles for MapStore {
        async fn publish(&self, name: &str, document: String) -> Result<String, MapFileError>;
        fn map_dir(&self) -> String;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub fn dashboard_period() -> Period {
    Period::new(date!(2023 - 01 - 01), date!(2023 - 11 - 06)).unwrap()
}

/// One fully populated row per day of `period`.
pub fn daily_rows(period: Period) -> Vec<DailyRow> {
    period
        .days()
        .enumerate()
        .map(|(i, day)| {
            let mut row = DailyRow::empty(day);
            row.tavg = Some(22.0 + (i % 8) as f64);
            row.tmin = Some(16.0);
            row.tmax = Some(31.5);
            row.prcp = Some(if i % 4 == 0 { 7.5 } else { 0.0 });
            row.snow = Some(0.0);
            row.wdir = Some(135.0);
            row.wspd = Some(9.0 + (i % 5) as f64);
            row.wpgt = Some(30.0);
            row.pres = Some(1014.5);
            row.tsun = if i % 2 == 0 { Some(540.0) } else { None };
            row
        })
        .collect()
}

/// Provider answering the dashboard period with a full year of rows.
pub fn provider_with_full_period() -> MockProvider {
    let mut provider = MockProvider::new();
    provider
        .expect_daily()
        .withf(|point, period| *point == City::PortoAlegre.point() && *period == dashboard_period())
        .times(1)
        .returning(|_, period| Ok(daily_rows(period)));
    provider
}

/// Map store that hands back what it was given.
pub fn echo_map_store() -> MockMapStore {
    let mut maps = MockMapStore::new();
    maps.expect_publish().returning(|_, document| Ok(document));
    maps.expect_map_dir().return_const("/tmp/clima-maps".to_string());
    maps
}

pub async fn spawn_app(map_files: Arc<dyn MapFiles>) -> TestApp {
    let provider = provider_with_full_period();
    let dataset = Dataset::load(&provider, City::PortoAlegre.point(), dashboard_period())
        .await
        .expect("dataset loads from mock provider");

    let state = AppState {
        static_dir: "./static".to_string(),
        dataset: Arc::new(dataset),
        map_files,
        unrecognized: Arc::new(UnrecognizedLog::default()),
    };

    TestApp { app: app(state) }
}

pub async fn get(test_app: &TestApp, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
