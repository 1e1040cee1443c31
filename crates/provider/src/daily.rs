use serde::Deserialize;
use std::collections::BTreeMap;
use time::Date;

use crate::{iso_date, Period, ProviderError};

/// One row of Meteostat's daily bulk schema, using its raw column names.
///
/// The bulk CSV has no header; columns are, in order:
/// `date, tavg, tmin, tmax, prcp, snow, wdir, wspd, wpgt, pres, tsun`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRow {
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Average air temperature, °C
    pub tavg: Option<f64>,
    /// Minimum air temperature, °C
    pub tmin: Option<f64>,
    /// Maximum air temperature, °C
    pub tmax: Option<f64>,
    /// Daily precipitation total, mm
    pub prcp: Option<f64>,
    /// Snow depth, mm
    pub snow: Option<f64>,
    /// Average wind direction, degrees
    pub wdir: Option<f64>,
    /// Average wind speed, km/h
    pub wspd: Option<f64>,
    /// Peak wind gust, km/h
    pub wpgt: Option<f64>,
    /// Average sea-level air pressure, hPa
    pub pres: Option<f64>,
    /// Daily sunshine total, minutes
    pub tsun: Option<f64>,
}

impl DailyRow {
    /// A row with a date and nothing recorded.
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            tavg: None,
            tmin: None,
            tmax: None,
            prcp: None,
            snow: None,
            wdir: None,
            wspd: None,
            wpgt: None,
            pres: None,
            tsun: None,
        }
    }

    /// Fills every absent field with the value from `other`.
    fn fill_from(&mut self, other: &DailyRow) {
        self.tavg = self.tavg.or(other.tavg);
        self.tmin = self.tmin.or(other.tmin);
        self.tmax = self.tmax.or(other.tmax);
        self.prcp = self.prcp.or(other.prcp);
        self.snow = self.snow.or(other.snow);
        self.wdir = self.wdir.or(other.wdir);
        self.wspd = self.wspd.or(other.wspd);
        self.wpgt = self.wpgt.or(other.wpgt);
        self.pres = self.pres.or(other.pres);
        self.tsun = self.tsun.or(other.tsun);
    }
}

/// Parses a decompressed daily bulk file, keeping only rows inside `period`.
pub fn parse_daily_csv(
    bytes: &[u8],
    station: &str,
    period: &Period,
) -> Result<Vec<DailyRow>, ProviderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.deserialize::<DailyRow>() {
        let row = record.map_err(|source| ProviderError::CsvParse {
            station: station.to_string(),
            source,
        })?;
        if period.contains(row.date) {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Resolves rows from several stations into one series for a point.
///
/// `by_distance` must be ordered nearest station first. For every date, each
/// field takes the first value present, walking the stations in that order.
/// The output is sorted by date with one row per date.
pub fn merge_nearest(by_distance: Vec<Vec<DailyRow>>) -> Vec<DailyRow> {
    let mut merged: BTreeMap<Date, DailyRow> = BTreeMap::new();
    for rows in by_distance {
        for row in rows {
            merged
                .entry(row.date)
                .and_modify(|existing| existing.fill_from(&row))
                .or_insert(row);
        }
    }
    merged.into_values().collect()
}
