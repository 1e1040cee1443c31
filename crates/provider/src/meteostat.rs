use async_trait::async_trait;
use clima_core::GeoPoint;
use log::{debug, info, warn};

use crate::{
    merge_nearest, nearby_stations, parse_daily_csv, parse_stations, DailyRow, HttpFetcher,
    Period, ProviderError, WeatherProvider,
};

pub const DEFAULT_BASE_URL: &str = "https://bulk.meteostat.net/v2";

/// Search radius around a point, matching Meteostat's point defaults.
pub const DEFAULT_RADIUS_KM: f64 = 35.0;

/// Number of stations combined for a point.
pub const DEFAULT_MAX_STATIONS: usize = 4;

/// Daily history for a point from Meteostat's bulk data.
///
/// Stations near the point are ranked by distance and their daily files are
/// merged field by field, nearest value first.
pub struct MeteostatProvider {
    fetcher: HttpFetcher,
    base_url: String,
    radius_km: f64,
    max_stations: usize,
}

impl MeteostatProvider {
    pub fn new(fetcher: HttpFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            radius_km: DEFAULT_RADIUS_KM,
            max_stations: DEFAULT_MAX_STATIONS,
        }
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_max_stations(mut self, max_stations: usize) -> Self {
        self.max_stations = max_stations;
        self
    }

    fn stations_url(&self) -> String {
        format!("{}/stations/lite.json.gz", self.base_url)
    }

    fn daily_url(&self, station: &str) -> String {
        format!("{}/daily/{}.csv.gz", self.base_url, station)
    }
}

/// Rows a station contributes, or `None` when its file could not be fetched
/// or parsed. A bad station is skipped so the others can still fill the series.
fn station_rows(
    station: &str,
    download: Result<Vec<u8>, ProviderError>,
    period: &Period,
) -> Option<Vec<DailyRow>> {
    match download.and_then(|bytes| parse_daily_csv(&bytes, station, period)) {
        Ok(rows) => {
            debug!("station {} has {} rows in period", station, rows.len());
            Some(rows)
        }
        Err(e) => {
            warn!("skipping station {}: {}", station, e);
            None
        }
    }
}

#[async_trait]
impl WeatherProvider for MeteostatProvider {
    async fn daily(&self, point: GeoPoint, period: Period) -> Result<Vec<DailyRow>, ProviderError> {
        let listing = self.fetcher.fetch_gzip(&self.stations_url()).await?;
        let stations = parse_stations(&listing)?;
        debug!("station listing has {} entries", stations.len());

        let candidates =
            nearby_stations(stations, point, &period, self.radius_km, self.max_stations);
        if candidates.is_empty() {
            return Err(ProviderError::NoStationsNearby {
                point,
                radius_km: self.radius_km,
            });
        }

        let mut by_distance = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let station = &candidate.station;
            info!(
                "using station {} ({}) at {:.1} km",
                station.id,
                station.display_name(),
                candidate.distance_km
            );

            let download = self.fetcher.fetch_gzip(&self.daily_url(&station.id)).await;
            if let Some(rows) = station_rows(&station.id, download, &period) {
                by_distance.push(rows);
            }
        }

        let rows = merge_nearest(by_distance);
        if rows.is_empty() {
            return Err(ProviderError::NoData {
                point,
                start: period.start(),
                end: period.end(),
            });
        }
        Ok(rows)
    }
}
