//! Clima dashboard: a single page showing a year of daily weather for a
//! municipality as a paginated table, a map and a chart.
//!
//! The dataset is fetched once at startup. Every later interaction is a pure
//! function of the current selection and that dataset, served as htmx
//! fragments.

mod dataset;
mod map_store;
pub mod render;
pub mod routes;
mod selection;
mod startup;
pub mod templates;
mod utils;

pub use dataset::{Column, DataUnavailable, Dataset, ObservationRecord};
pub use map_store::{LocalMapFiles, MapFileError, MapFiles};
pub use routes::*;
pub use selection::{
    ChartVariable, Choice, Selection, SelectionState, UnrecognizedLog, UnrecognizedSelection,
};
pub use startup::{app, build_app_state, AppState};
pub use utils::{create_folder, get_config_info, get_log_level, setup_logger, Cli};
