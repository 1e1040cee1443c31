mod city_map;
mod empty_state;
mod observations_table;
mod weather_chart;

pub use city_map::{city_map, map_document, map_unavailable};
pub use empty_state::empty_state;
pub use observations_table::{observations_table, TABLE_ID};
pub use weather_chart::weather_chart;
