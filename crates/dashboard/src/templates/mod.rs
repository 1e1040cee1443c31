pub mod components;
pub mod fragments;
pub mod layouts;
pub mod pages;

pub use fragments::{
    city_map, empty_state, map_document, map_unavailable, observations_table, weather_chart,
};
pub use layouts::PageConfig;
pub use pages::dashboard_page;
