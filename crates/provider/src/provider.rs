use async_trait::async_trait;
use clima_core::GeoPoint;
use time::Date;

use crate::{DailyRow, ProviderError};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: Date,
    end: Date,
}

impl Period {
    pub fn new(start: Date, end: Date) -> Result<Self, ProviderError> {
        if start > end {
            return Err(ProviderError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// True when an inventory range shares a day with this period. Unknown bounds never overlap.
    pub fn overlaps(&self, start: Option<Date>, end: Option<Date>) -> bool {
        match (start, end) {
            (Some(start), Some(end)) => start <= self.end && end >= self.start,
            _ => false,
        }
    }

    /// Every calendar day of the period, in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.next_day().filter(|next| *next <= end)
        })
    }
}

/// Source of daily weather history for a geographic point.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Daily rows inside `period`, ordered by date, one row per date.
    async fn daily(&self, point: GeoPoint, period: Period) -> Result<Vec<DailyRow>, ProviderError>;
}
