use clima_core::GeoPoint;
use haversine::{distance, Location as HaversineLocation, Units};
use serde::Deserialize;
use std::collections::HashMap;
use time::Date;

use crate::{iso_date, Period, ProviderError};

/// A weather station from Meteostat's `stations/lite` listing.
///
/// Only the fields needed to pick stations for a point are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct Station {
    pub id: String,
    #[serde(default)]
    pub name: HashMap<String, String>,
    pub location: Location,
    pub inventory: Inventory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
    pub daily: DateRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRange {
    #[serde(default, with = "iso_date::option")]
    pub start: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub end: Option<Date>,
}

impl Station {
    /// English name when available, otherwise the station id.
    pub fn display_name(&self) -> &str {
        self.name
            .get("en")
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }

    pub fn distance_km(&self, point: GeoPoint) -> f64 {
        distance(
            HaversineLocation {
                latitude: point.latitude,
                longitude: point.longitude,
            },
            HaversineLocation {
                latitude: self.location.latitude,
                longitude: self.location.longitude,
            },
            Units::Kilometers,
        )
    }
}

/// A station selected for a point, with its distance to that point.
#[derive(Debug, Clone)]
pub struct StationCandidate {
    pub station: Station,
    pub distance_km: f64,
}

pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>, ProviderError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Stations with daily data overlapping `period` within `radius_km` of
/// `point`, nearest first, at most `limit` of them.
pub fn nearby_stations(
    stations: Vec<Station>,
    point: GeoPoint,
    period: &Period,
    radius_km: f64,
    limit: usize,
) -> Vec<StationCandidate> {
    let mut candidates: Vec<StationCandidate> = stations
        .into_iter()
        .filter(|s| period.overlaps(s.inventory.daily.start, s.inventory.daily.end))
        .map(|station| StationCandidate {
            distance_km: station.distance_km(point),
            station,
        })
        .filter(|c| c.distance_km <= radius_km)
        .collect();

    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    candidates.truncate(limit);
    candidates
}
