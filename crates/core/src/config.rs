//! Configuration loading utilities
//!
//! Supports loading configuration from multiple sources in priority order:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Config file (searched in standard locations)
//! 4. Built-in defaults (lowest priority)

use std::{env, fs, path::PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Describes where a configuration was loaded from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Explicit path provided via CLI or env var
    Explicit(PathBuf),
    /// Found in current working directory
    CurrentDir(PathBuf),
    /// Found in XDG config home (~/.config/clima/)
    XdgConfig(PathBuf),
    /// Found in system config (/etc/clima/)
    System(PathBuf),
    /// No config file found, using defaults
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in standard locations
///
/// Search order:
/// 1. Environment variable (e.g., CLIMA_CONFIG)
/// 2. Current directory (clima.toml)
/// 3. XDG config home ($XDG_CONFIG_HOME/clima/ or ~/.config/clima/)
/// 4. System config (/etc/clima/)
///
/// # Arguments
/// * `env_var` - Environment variable to check for explicit path
/// * `filename` - Config filename to search for (e.g., "clima.toml")
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    let candidates = [
        env::var(env_var).ok().map(|p| ConfigSource::Explicit(PathBuf::from(p))),
        Some(ConfigSource::CurrentDir(PathBuf::from(filename))),
        Some(ConfigSource::XdgConfig(get_xdg_config_path(filename))),
        Some(ConfigSource::System(
            PathBuf::from("/etc").join(APP_NAME).join(filename),
        )),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|source| source.path().is_some_and(|p| p.exists()))
        .unwrap_or(ConfigSource::Defaults)
}

fn get_xdg_config_path(filename: &str) -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join(filename)
}

/// Get the XDG cache directory for the application
///
/// The transient map documents live under `<cache>/maps`.
pub fn get_xdg_cache_dir() -> PathBuf {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

fn xdg_dir(xdg_var: &str, home_relative: &str) -> PathBuf {
    if let Ok(base) = env::var(xdg_var) {
        PathBuf::from(base).join(APP_NAME)
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(home_relative).join(APP_NAME)
    } else {
        // Fallback - relative to the working directory
        PathBuf::from(home_relative).join(APP_NAME)
    }
}

/// Load and parse a TOML configuration file
///
/// # Returns
/// * `Ok(config)` - Parsed config, or `T::default()` when there is no file
/// * `Err(e)` - Failed to read or parse the config file
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    let Some(path) = source.path() else {
        return Ok(T::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, Default, serde::Deserialize, PartialEq)]
    struct Sample {
        port: Option<String>,
        start: Option<String>,
    }

    #[test]
    fn test_config_source_display() {
        let source = ConfigSource::CurrentDir(PathBuf::from("test.toml"));
        assert_eq!(format!("{}", source), "test.toml");

        let source = ConfigSource::Defaults;
        assert_eq!(format!("{}", source), "(defaults)");
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        let config: Sample = load_config(&ConfigSource::Defaults).unwrap();
        assert_eq!(config, Sample::default());
    }

    #[test]
    fn test_load_config_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"9090\"\nstart = \"2023-01-01\"").unwrap();

        let source = ConfigSource::Explicit(file.path().to_path_buf());
        let config: Sample = load_config(&source).unwrap();
        assert_eq!(config.port.as_deref(), Some("9090"));
        assert_eq!(config.start.as_deref(), Some("2023-01-01"));
    }

    #[test]
    fn test_find_config_file_prefers_env_var() {
        let file = tempfile::NamedTempFile::new().unwrap();
        env::set_var("CLIMA_TEST_CONFIG", file.path());

        let source = find_config_file("CLIMA_TEST_CONFIG", "no-such-clima.toml");
        assert_eq!(source, ConfigSource::Explicit(file.path().to_path_buf()));

        env::remove_var("CLIMA_TEST_CONFIG");
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = ").unwrap();

        let source = ConfigSource::Explicit(file.path().to_path_buf());
        assert!(load_config::<Sample>(&source).is_err());
    }
}
