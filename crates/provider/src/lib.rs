//! Daily weather history from Meteostat's bulk data.
//!
//! [`MeteostatProvider`] resolves a [`clima_core::GeoPoint`] to nearby
//! stations and merges their daily rows into one series for the point.

mod daily;
mod error;
mod fetcher;
mod meteostat;
mod provider;
mod stations;

pub use daily::{merge_nearest, parse_daily_csv, DailyRow};
pub use error::ProviderError;
pub use fetcher::{HttpFetcher, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
pub use meteostat::{MeteostatProvider, DEFAULT_BASE_URL, DEFAULT_MAX_STATIONS, DEFAULT_RADIUS_KM};
pub use provider::{Period, WeatherProvider};
pub use stations::{nearby_stations, parse_stations, Station, StationCandidate};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");
