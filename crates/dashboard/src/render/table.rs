use clima_core::City;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use super::RenderOutcome;
use crate::{Column, Dataset, ObservationRecord, Selection};

/// Rows per table page.
pub const PAGE_SIZE: usize = 30;

const DISPLAY_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year]");

/// Dates are shown as `dd-mm-yyyy`.
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE)
        .unwrap_or_else(|_| date.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub date: String,
    /// One cell per non-date column, `None` where nothing was recorded.
    pub cells: Vec<Option<String>>,
}

/// One page of the observations table, newest day first.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub city: City,
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
    /// 1-based, always within `1..=page_count`.
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
}

impl TableView {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

fn row_for(record: &ObservationRecord) -> TableRow {
    TableRow {
        date: format_date(record.date),
        cells: Column::ALL
            .iter()
            .filter(|c| **c != Column::Date)
            .map(|c| c.value(record).map(|v| v.to_string()))
            .collect(),
    }
}

/// Tabular view of the whole dataset for the chosen city.
///
/// `page` is clamped into range, so a stale link past the end shows the last page.
pub fn render_table(
    city: Selection<City>,
    dataset: &Dataset,
    page: usize,
) -> RenderOutcome<TableView> {
    let city = match city {
        Selection::Unselected => return RenderOutcome::NoChange,
        Selection::Selected(city) => city,
    };
    if dataset.is_empty() {
        return RenderOutcome::Empty;
    }

    let total_rows = dataset.len();
    let page_count = total_rows.div_ceil(PAGE_SIZE).max(1);
    let page = page.clamp(1, page_count);

    let rows = dataset
        .descending()
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(row_for)
        .collect();

    RenderOutcome::Render(TableView {
        city,
        columns: Column::ALL.iter().map(Column::label).collect(),
        rows,
        page,
        page_count,
        total_rows,
    })
}
