use anyhow::anyhow;
use clap::Parser;
use clima_core::{
    create_dir_all, find_config_file, get_xdg_cache_dir, load_config, ConfigSource,
    DEFAULT_DASHBOARD_PORT, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_RETRIES,
};
use clima_provider::{Period, DEFAULT_BASE_URL, DEFAULT_MAX_STATIONS, DEFAULT_RADIUS_KM};
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::{warn, LevelFilter};
use std::{env, time::Duration};
use time::{
    format_description::well_known::Iso8601, macros::format_description, Date, OffsetDateTime,
};

/// Create a folder, logging instead of failing when it cannot be made
pub fn create_folder(root_path: &str) {
    if let Err(e) = create_dir_all(root_path) {
        warn!("error creating folder {}: {}", root_path, e);
    }
}

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Clima - daily weather history dashboard for a municipality"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CLIMA_CONFIG, ./clima.toml,
    /// $XDG_CONFIG_HOME/clima/clima.toml, /etc/clima/clima.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CLIMA_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "CLIMA_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CLIMA_PORT")]
    pub port: Option<String>,

    /// First day of the observation period (YYYY-MM-DD)
    #[arg(short, long, env = "CLIMA_START")]
    pub start: Option<String>,

    /// Last day of the observation period (YYYY-MM-DD), inclusive
    #[arg(short, long, env = "CLIMA_END")]
    pub end: Option<String>,

    /// Base URL of the Meteostat bulk data service
    #[arg(long, env = "CLIMA_PROVIDER_URL")]
    pub provider_url: Option<String>,

    /// Search radius for weather stations around the city, in kilometers
    #[arg(long, env = "CLIMA_RADIUS_KM")]
    pub radius_km: Option<f64>,

    /// Number of nearby stations merged into the daily series
    #[arg(long, env = "CLIMA_MAX_STATIONS")]
    pub max_stations: Option<usize>,

    /// Seconds to wait for the startup data fetch
    #[arg(long, env = "CLIMA_FETCH_TIMEOUT")]
    pub fetch_timeout: Option<u64>,

    /// Retries for a transient provider failure
    #[arg(long, env = "CLIMA_MAX_RETRIES")]
    pub max_retries: Option<u32>,

    /// Directory for generated map documents
    #[arg(short, long, env = "CLIMA_MAP_DIR")]
    pub map_dir: Option<String>,

    /// Directory containing UI static files
    #[arg(short, long, env = "CLIMA_UI_DIR")]
    pub ui_dir: Option<String>,
}

const DATE_ARG: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

fn parse_date(name: &str, raw: &str) -> anyhow::Result<Date> {
    Date::parse(raw.trim(), DATE_ARG).map_err(|e| anyhow!("invalid {} date {:?}: {}", name, raw, e))
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_DASHBOARD_PORT.to_string())
    }

    /// Observation period, 2023-01-01 through 2023-11-06 unless configured
    pub fn period(&self) -> anyhow::Result<Period> {
        let start = parse_date("start", self.start.as_deref().unwrap_or("2023-01-01"))?;
        let end = parse_date("end", self.end.as_deref().unwrap_or("2023-11-06"))?;
        Period::new(start, end).map_err(|e| anyhow!("invalid period: {}", e))
    }

    pub fn provider_url(&self) -> String {
        self.provider_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
            .filter(|km| km.is_finite() && *km > 0.0)
            .unwrap_or(DEFAULT_RADIUS_KM)
    }

    pub fn max_stations(&self) -> usize {
        self.max_stations
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_STATIONS)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT))
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn map_dir(&self) -> String {
        self.map_dir.clone().unwrap_or_else(|| {
            get_xdg_cache_dir()
                .join("maps")
                .to_string_lossy()
                .into_owned()
        })
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CLIMA_CONFIG", "clima.toml")
    };

    // The logger is not installed yet
    if let Some(path) = source.path() {
        eprintln!("Loading config from: {}", path.display());
    }

    let file_config: Cli = match load_config(&source) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring config file: {}", e);
            Cli::default()
        }
    };

    merge(cli_args, file_config)
}

/// CLI args (and env vars, handled by clap) override the config file
fn merge(cli_args: Cli, file_config: Cli) -> Cli {
    Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        domain: cli_args.domain.or(file_config.domain),
        port: cli_args.port.or(file_config.port),
        start: cli_args.start.or(file_config.start),
        end: cli_args.end.or(file_config.end),
        provider_url: cli_args.provider_url.or(file_config.provider_url),
        radius_km: cli_args.radius_km.or(file_config.radius_km),
        max_stations: cli_args.max_stations.or(file_config.max_stations),
        fetch_timeout: cli_args.fetch_timeout.or(file_config.fetch_timeout),
        max_retries: cli_args.max_retries.or(file_config.max_retries),
        map_dir: cli_args.map_dir.or(file_config.map_dir),
        ui_dir: cli_args.ui_dir.or(file_config.ui_dir),
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
