//! Clima Core Library
//!
//! Shared pieces for the provider and dashboard crates:
//! - Configuration loading (XDG-compliant)
//! - File system utilities
//! - The closed set of supported cities and their coordinates

mod config;
pub mod fs;
mod geo;

pub use config::{find_config_file, get_xdg_cache_dir, load_config, ConfigSource};
pub use fs::create_dir_all;
pub use geo::{City, GeoPoint};

/// Application name used for XDG paths
pub const APP_NAME: &str = "clima";

/// Default dashboard port
pub const DEFAULT_DASHBOARD_PORT: u16 = 8080;

/// Default bound on the startup data fetch, in seconds
pub const DEFAULT_FETCH_TIMEOUT: u64 = 120;

/// Default number of retries for a transient provider failure
pub const DEFAULT_MAX_RETRIES: u32 = 3;
