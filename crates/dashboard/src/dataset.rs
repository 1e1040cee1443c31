use std::{collections::BTreeMap, time::Duration};

use clima_core::GeoPoint;
use clima_provider::{DailyRow, Period, ProviderError, WeatherProvider};
use log::{info, warn};
use time::Date;

/// One day of observations for the dashboard's point.
///
/// `None` means nothing was recorded that day, which is not the same as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    pub date: Date,
    pub avg_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub pressure: Option<f64>,
    pub sunshine_minutes: Option<f64>,
}

impl ObservationRecord {
    pub fn absent(date: Date) -> Self {
        Self {
            date,
            avg_temp: None,
            min_temp: None,
            max_temp: None,
            precipitation: None,
            wind_speed: None,
            pressure: None,
            sunshine_minutes: None,
        }
    }
}

/// The provider column mapping. `snow`, `wdir` and `wpgt` have no column and are dropped.
impl From<&DailyRow> for ObservationRecord {
    fn from(row: &DailyRow) -> Self {
        Self {
            date: row.date,
            avg_temp: row.tavg,
            min_temp: row.tmin,
            max_temp: row.tmax,
            precipitation: row.prcp,
            wind_speed: row.wspd,
            pressure: row.pres,
            sunshine_minutes: row.tsun,
        }
    }
}

/// Columns kept from the provider, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    AvgTemp,
    MinTemp,
    MaxTemp,
    Precipitation,
    WindSpeed,
    Pressure,
    SunshineMinutes,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Date,
        Column::AvgTemp,
        Column::MinTemp,
        Column::MaxTemp,
        Column::Precipitation,
        Column::WindSpeed,
        Column::Pressure,
        Column::SunshineMinutes,
    ];

    /// Provider field the column is read from.
    pub fn raw_name(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::AvgTemp => "tavg",
            Column::MinTemp => "tmin",
            Column::MaxTemp => "tmax",
            Column::Precipitation => "prcp",
            Column::WindSpeed => "wspd",
            Column::Pressure => "pres",
            Column::SunshineMinutes => "tsun",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Date => "Data",
            Column::AvgTemp => "Temp. Média",
            Column::MinTemp => "Temp. Min",
            Column::MaxTemp => "Temp. Max",
            Column::Precipitation => "Precipitação",
            Column::WindSpeed => "Veloc. Vento",
            Column::Pressure => "Pressão",
            Column::SunshineMinutes => "Tempo de Sol",
        }
    }

    /// Numeric value of the column for a record; `Date` has none.
    pub fn value(&self, record: &ObservationRecord) -> Option<f64> {
        match self {
            Column::Date => None,
            Column::AvgTemp => record.avg_temp,
            Column::MinTemp => record.min_temp,
            Column::MaxTemp => record.max_temp,
            Column::Precipitation => record.precipitation,
            Column::WindSpeed => record.wind_speed,
            Column::Pressure => record.pressure,
            Column::SunshineMinutes => record.sunshine_minutes,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DataUnavailable {
    #[error("weather provider failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("weather provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("no observations between {start} and {end}")]
    NoObservations { start: Date, end: Date },
}

/// Daily observations for one point, one record per calendar day of the
/// period, in ascending date order. Never modified after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    point: GeoPoint,
    period: Period,
    records: Vec<ObservationRecord>,
}

impl Dataset {
    /// Applies the column mapping to raw provider rows.
    ///
    /// Rows outside the period are discarded and the first row wins for a
    /// repeated date. Days the provider did not report become absent records.
    pub fn from_rows(
        point: GeoPoint,
        period: Period,
        rows: &[DailyRow],
    ) -> Result<Self, DataUnavailable> {
        let mut by_date: BTreeMap<Date, ObservationRecord> = BTreeMap::new();
        for row in rows.iter().filter(|row| period.contains(row.date)) {
            by_date
                .entry(row.date)
                .or_insert_with(|| ObservationRecord::from(row));
        }

        if by_date.is_empty() {
            return Err(DataUnavailable::NoObservations {
                start: period.start(),
                end: period.end(),
            });
        }

        let reported = by_date.len();
        let records: Vec<ObservationRecord> = period
            .days()
            .map(|day| {
                by_date
                    .remove(&day)
                    .unwrap_or_else(|| ObservationRecord::absent(day))
            })
            .collect();

        if reported < records.len() {
            warn!(
                "provider reported {} of {} days, missing days are left empty",
                reported,
                records.len()
            );
        }

        Ok(Self {
            point,
            period,
            records,
        })
    }

    /// A dataset with no records.
    pub fn empty(point: GeoPoint, period: Period) -> Self {
        Self {
            point,
            period,
            records: Vec::new(),
        }
    }

    pub async fn load(
        provider: &dyn WeatherProvider,
        point: GeoPoint,
        period: Period,
    ) -> Result<Self, DataUnavailable> {
        info!(
            "fetching daily observations at {} from {} to {}",
            point,
            period.start(),
            period.end()
        );
        let rows = provider.daily(point, period).await?;
        let dataset = Self::from_rows(point, period, &rows)?;
        info!("loaded {} daily observations", dataset.len());
        Ok(dataset)
    }

    /// [`Dataset::load`] bounded by `timeout`.
    pub async fn load_with_timeout(
        provider: &dyn WeatherProvider,
        point: GeoPoint,
        period: Period,
        timeout: Duration,
    ) -> Result<Self, DataUnavailable> {
        tokio::time::timeout(timeout, Self::load(provider, point, period))
            .await
            .map_err(|_| DataUnavailable::Timeout(timeout))?
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newest first, for display. The store itself keeps ascending order.
    pub fn descending(&self) -> Vec<&ObservationRecord> {
        self.records.iter().rev().collect()
    }

    pub fn dates(&self) -> Vec<Date> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn column(&self, column: Column) -> Vec<Option<f64>> {
        self.records.iter().map(|r| column.value(r)).collect()
    }
}
