mod selectors;

pub use selectors::{city_select, variable_radios, CHART_ID, CITY_VIEWS_ID};
