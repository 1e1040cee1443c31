use crate::helpers::{daily_rows, dashboard_period, provider_with_full_period, MockProvider};
use async_trait::async_trait;
use clima::{build_app_state, DataUnavailable, Dataset};
use clima_core::{City, GeoPoint};
use clima_provider::{DailyRow, Period, ProviderError, WeatherProvider};
use std::time::Duration;
use tempfile::TempDir;
use time::macros::date;

#[tokio::test]
async fn porto_alegre_2023_loads_one_record_per_day() {
    let provider = provider_with_full_period();

    let dataset = Dataset::load(
        &provider,
        GeoPoint::new(-29.9153435, -51.2601959),
        dashboard_period(),
    )
    .await
    .unwrap();

    assert_eq!(dataset.len(), 310);
    assert_eq!(dataset.records()[0].date, date!(2023 - 01 - 01));
    assert_eq!(dataset.records()[309].date, date!(2023 - 11 - 06));
    // sunshine is only reported every other day
    assert_eq!(dataset.records()[1].sunshine_minutes, None);
    assert_eq!(dataset.records()[0].sunshine_minutes, Some(540.0));
}

#[tokio::test]
async fn loading_twice_yields_equal_datasets() {
    let mut provider = MockProvider::new();
    provider
        .expect_daily()
        .times(2)
        .returning(|_, period| Ok(daily_rows(period)));

    let point = City::PortoAlegre.point();
    let first = Dataset::load(&provider, point, dashboard_period()).await.unwrap();
    let second = Dataset::load(&provider, point, dashboard_period()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn provider_failure_is_data_unavailable() {
    let mut provider = MockProvider::new();
    provider.expect_daily().times(1).returning(|point, period| {
        Err(ProviderError::NoStationsNearby {
            point,
            radius_km: period.days().count() as f64,
        })
    });

    let err = Dataset::load(&provider, City::PortoAlegre.point(), dashboard_period())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DataUnavailable::Provider(ProviderError::NoStationsNearby { .. })
    ));
}

#[tokio::test]
async fn rows_outside_the_period_are_unavailable() {
    let mut provider = MockProvider::new();
    provider.expect_daily().times(1).returning(|_, _| {
        let old = Period::new(date!(2020 - 01 - 01), date!(2020 - 01 - 31)).unwrap();
        Ok(daily_rows(old))
    });

    let err = Dataset::load(&provider, City::PortoAlegre.point(), dashboard_period())
        .await
        .unwrap_err();

    assert!(matches!(err, DataUnavailable::NoObservations { .. }));
}

struct SlowProvider;

#[async_trait]
impl WeatherProvider for SlowProvider {
    async fn daily(&self, _point: GeoPoint, _period: Period) -> Result<Vec<DailyRow>, ProviderError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn slow_provider_times_out() {
    let err = Dataset::load_with_timeout(
        &SlowProvider,
        City::PortoAlegre.point(),
        dashboard_period(),
        Duration::from_millis(20),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DataUnavailable::Timeout(_)));
}

#[tokio::test]
async fn startup_aborts_when_data_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let mut provider = MockProvider::new();
    provider.expect_daily().times(1).returning(|point, period| {
        Err(ProviderError::NoData {
            point,
            start: period.start(),
            end: period.end(),
        })
    });

    let result = build_app_state(
        &provider,
        dashboard_period(),
        Duration::from_secs(5),
        "./static".to_string(),
        dir.path().to_string_lossy().into_owned(),
    )
    .await;

    let err = result.err().expect("startup should fail");
    assert!(err.to_string().contains("error loading weather data for Porto Alegre"));
}

#[tokio::test]
async fn startup_builds_state_from_provider() {
    let dir = TempDir::new().unwrap();
    let provider = provider_with_full_period();

    let state = build_app_state(
        &provider,
        dashboard_period(),
        Duration::from_secs(5),
        "./static".to_string(),
        dir.path().join("maps").to_string_lossy().into_owned(),
    )
    .await
    .unwrap();

    assert_eq!(state.dataset.len(), 310);
    assert!(dir.path().join("maps").is_dir());
}
