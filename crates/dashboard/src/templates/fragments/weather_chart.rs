use maud::{html, Markup};
use time::{macros::format_description, Date};

use crate::render::{Chart, ChartKind, Series};

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 420.0;
const LEFT: f64 = 60.0;
const RIGHT: f64 = 170.0;
const TOP: f64 = 40.0;
const BOTTOM: f64 = 40.0;

/// Maps data coordinates into the plot area.
struct Frame {
    count: usize,
    min: f64,
    max: f64,
}

impl Frame {
    fn new(chart: &Chart) -> Self {
        let (mut min, mut max) = chart.value_range().unwrap_or((0.0, 1.0));
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        Self {
            count: chart.dates.len(),
            min,
            max,
        }
    }

    fn plot_width(&self) -> f64 {
        WIDTH - LEFT - RIGHT
    }

    fn plot_bottom(&self) -> f64 {
        HEIGHT - BOTTOM
    }

    /// Centre of the i-th slot.
    fn x(&self, i: usize) -> f64 {
        LEFT + self.slot() * (i as f64 + 0.5)
    }

    fn slot(&self) -> f64 {
        self.plot_width() / self.count.max(1) as f64
    }

    fn y(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        self.plot_bottom() - (value - self.min) / span * (self.plot_bottom() - TOP)
    }
}

/// SVG path data for a line series. Absent values break the line.
fn line_path(frame: &Frame, values: &[Option<f64>]) -> String {
    let mut d = String::new();
    let mut pen_down = false;
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => {
                let cmd = if pen_down { 'L' } else { 'M' };
                d.push_str(&format!("{}{:.1},{:.1} ", cmd, frame.x(i), frame.y(*v)));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    d.trim_end().to_string()
}

fn month_ticks(dates: &[Date]) -> Vec<(usize, String)> {
    let fmt = format_description!("[month]/[year]");
    dates
        .iter()
        .enumerate()
        .filter(|(i, d)| *i == 0 || d.day() == 1)
        .filter_map(|(i, d)| d.format(fmt).ok().map(|label| (i, label)))
        .collect()
}

fn line_series(frame: &Frame, series: &Series) -> Markup {
    html! {
        path class="series" d=(line_path(frame, &series.values))
            fill="none" stroke=(series.color) stroke-width=(series.width)
            data-label=(series.label) data-points=(series.values.len()) {}
    }
}

fn bar_series(frame: &Frame, series: &Series) -> Markup {
    let base = frame.y(0.0_f64.clamp(frame.min, frame.max));
    let width = (frame.slot() * 0.8).max(0.5);
    html! {
        g class="series" fill=(series.color) data-label=(series.label) data-points=(series.values.len()) {
            @for (i, value) in series.values.iter().enumerate() {
                @if let Some(v) = value {
                    @let top = frame.y(*v).min(base);
                    @let height = (frame.y(*v) - base).abs();
                    rect class="bar"
                        x=(format!("{:.1}", frame.x(i) - width / 2.0))
                        y=(format!("{:.1}", top))
                        width=(format!("{:.2}", width))
                        height=(format!("{:.1}", height)) {}
                }
            }
        }
    }
}

fn axes(frame: &Frame, chart: &Chart) -> Markup {
    let mid = (frame.min + frame.max) / 2.0;
    html! {
        g class="axes" {
            line class="axis" x1=(LEFT) y1=(TOP) x2=(LEFT) y2=(frame.plot_bottom()) {}
            line class="axis" x1=(LEFT) y1=(frame.plot_bottom()) x2=(WIDTH - RIGHT) y2=(frame.plot_bottom()) {}
            @for tick in [frame.min, mid, frame.max] {
                text class="tick-label" x=(LEFT - 6.0) y=(format!("{:.1}", frame.y(tick))) text-anchor="end" dominant-baseline="middle" {
                    (format!("{:.1}", tick))
                }
            }
            text class="tick-label" x=(LEFT) y=(TOP - 8.0) { (chart.unit) }
            @for (i, label) in month_ticks(&chart.dates) {
                text class="tick-label" x=(format!("{:.1}", frame.x(i))) y=(frame.plot_bottom() + 18.0) text-anchor="middle" {
                    (label)
                }
            }
        }
    }
}

fn legend(chart: &Chart) -> Markup {
    let x = WIDTH - RIGHT + 16.0;
    html! {
        g class="legend" {
            @for (i, series) in chart.series.iter().enumerate() {
                @let y = TOP + 20.0 * i as f64;
                @match chart.kind {
                    ChartKind::Line => {
                        line x1=(x) y1=(y) x2=(x + 18.0) y2=(y) stroke=(series.color) stroke-width=(series.width) {}
                    }
                    ChartKind::Bar => {
                        rect class="swatch" x=(x) y=(y - 5.0) width="18" height="10" fill=(series.color) {}
                    }
                }
                text class="legend-label" x=(x + 24.0) y=(y) dominant-baseline="middle" { (series.label) }
            }
        }
    }
}

/// Inline SVG rendering of a chart model.
pub fn weather_chart(chart: &Chart) -> Markup {
    let frame = Frame::new(chart);
    let kind = match chart.kind {
        ChartKind::Line => "line",
        ChartKind::Bar => "bar",
    };
    html! {
        svg xmlns="http://www.w3.org/2000/svg"
            class={ "weather-chart chart-" (kind) }
            viewBox=(format!("0 0 {} {}", WIDTH, HEIGHT))
            role="img" aria-label=(chart.title) {
            text class="chart-title" x=(LEFT) y="20" { (chart.title) }
            (axes(&frame, chart))
            @for series in &chart.series {
                @match chart.kind {
                    ChartKind::Line => { (line_series(&frame, series)) }
                    ChartKind::Bar => { (bar_series(&frame, series)) }
                }
            }
            (legend(chart))
        }
    }
}
