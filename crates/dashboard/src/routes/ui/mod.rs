mod dashboard;
mod fragments;

pub use dashboard::dashboard_handler;
pub use fragments::{chart_handler, city_handler, table_handler, ChartQuery, CityQuery};
