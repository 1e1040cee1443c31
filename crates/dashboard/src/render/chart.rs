use time::Date;

use super::RenderOutcome;
use crate::{ChartVariable, Choice, Column, Dataset, Selection};

const BLUE: &str = "blue";
const RED: &str = "red";
const GREEN: &str = "green";
const BAR_FILL: &str = "#636efa";
const LINE_WIDTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// One plotted series, with a value (or a gap) per dataset record.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub color: &'static str,
    pub width: u8,
    pub values: Vec<Option<f64>>,
}

impl Series {
    fn line(label: &'static str, color: &'static str, values: Vec<Option<f64>>) -> Self {
        Self {
            label,
            color,
            width: LINE_WIDTH,
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub variable: ChartVariable,
    pub kind: ChartKind,
    pub title: &'static str,
    pub unit: &'static str,
    pub dates: Vec<Date>,
    pub series: Vec<Series>,
}

impl Chart {
    /// Smallest and largest recorded value across all series. Bar charts
    /// always include zero.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied());
        let first = values.next()?;
        let (mut min, mut max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if self.kind == ChartKind::Bar {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        Some((min, max))
    }
}

/// Chart of the chosen variable over the whole dataset, oldest day first.
pub fn render_chart(variable: Selection<ChartVariable>, dataset: &Dataset) -> RenderOutcome<Chart> {
    let variable = match variable {
        Selection::Unselected => return RenderOutcome::NoChange,
        Selection::Selected(variable) => variable,
    };
    if dataset.is_empty() {
        return RenderOutcome::Empty;
    }

    let (kind, unit, series) = match variable {
        ChartVariable::Temperature => (
            ChartKind::Line,
            "°C",
            vec![
                Series::line("Temperatura Média", BLUE, dataset.column(Column::AvgTemp)),
                Series::line("Temperatura Máxima", RED, dataset.column(Column::MaxTemp)),
                Series::line("Temperatura Mínima", GREEN, dataset.column(Column::MinTemp)),
            ],
        ),
        ChartVariable::Wind => (
            ChartKind::Line,
            "km/h",
            vec![Series::line(
                "Velocidade do Vento",
                BLUE,
                dataset.column(Column::WindSpeed),
            )],
        ),
        ChartVariable::Precipitation => (
            ChartKind::Bar,
            "mm",
            vec![Series {
                label: "Precipitação",
                color: BAR_FILL,
                width: 0,
                values: dataset.column(Column::Precipitation),
            }],
        ),
    };

    RenderOutcome::Render(Chart {
        variable,
        kind,
        title: variable.label(),
        unit,
        dates: dataset.dates(),
        series,
    })
}
