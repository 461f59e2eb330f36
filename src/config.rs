//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line overrides applied by the
//! CLI. Credentials for the remote source only ever come from the file or
//! the environment.

use crate::app::models::WindUnit;
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ARCHIVE_DIR, DEFAULT_FTPS_PORT, DEFAULT_MAX_RETRIES,
    DEFAULT_OBS_DIR, DEFAULT_REMOTE_DIR, DEFAULT_RETRY_DELAY_SECS, DEFAULT_STATIONS,
    DEFAULT_TEMP_DIR, DEFAULT_TIMEOUT_SECS, env_vars,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// How raw bulletins are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Read files already dropped into a local directory
    Directory,
    /// Download each file over FTPS with `lftp`
    Lftp,
}

/// Retrieval source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Source selection
    pub mode: RetrievalMode,

    /// Directory holding `SM`/`SI` files in directory mode
    pub directory: PathBuf,

    /// Remote FTPS host
    pub host: Option<String>,

    /// Remote FTPS port
    pub port: u16,

    /// Remote user name
    pub user: Option<String>,

    /// Remote password
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Remote directory holding the processed reports
    pub remote_dir: String,

    /// Scratch directory for downloads, cleaned before each attempt
    pub temp_dir: PathBuf,

    /// Download attempts before giving up
    pub max_retries: u32,

    /// Fixed delay between attempts, seconds
    pub retry_delay_secs: u64,

    /// Per-attempt time budget, seconds
    pub timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            mode: RetrievalMode::Directory,
            directory: PathBuf::from(DEFAULT_OBS_DIR),
            host: None,
            port: DEFAULT_FTPS_PORT,
            user: None,
            password: None,
            remote_dir: DEFAULT_REMOTE_DIR.to_string(),
            temp_dir: PathBuf::from(DEFAULT_TEMP_DIR),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RetrievalConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Observation archive settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Root directory of the JSON archive
    pub path: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ARCHIVE_DIR),
        }
    }
}

/// Decoding settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodingConfig {
    /// Wind unit assumed when the bulletin header carries no usable `iw`
    pub default_wind_unit: Option<WindUnit>,
}

/// Global configuration for SYNOP processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stations processed by batch operations
    pub stations: Vec<u32>,

    pub retrieval: RetrievalConfig,

    pub archive: ArchiveConfig,

    pub decoding: DecodingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations: DEFAULT_STATIONS.to_vec(),
            retrieval: RetrievalConfig::default(),
            archive: ArchiveConfig::default(),
            decoding: DecodingConfig::default(),
        }
    }
}

impl Config {
    /// Default configuration file location in the user's config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file '{}'", path.display()), e)
        })?;
        let config: Config = toml::from_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load defaults, then the config file if any, then environment variables
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override settings from environment variables looked up with `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = lookup(env_vars::FTP_HOST) {
            self.retrieval.host = Some(host);
        }
        if let Some(user) = lookup(env_vars::FTP_USER) {
            self.retrieval.user = Some(user);
        }
        if let Some(password) = lookup(env_vars::FTP_PASSWORD) {
            self.retrieval.password = Some(password);
        }
        if let Some(dir) = lookup(env_vars::OBS_DIR) {
            self.retrieval.directory = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(env_vars::ARCHIVE_DIR) {
            self.archive.path = PathBuf::from(dir);
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.stations.is_empty() {
            return Err(Error::configuration("Station list cannot be empty"));
        }
        if let Some(station) = self
            .stations
            .iter()
            .find(|station| !(10_000..=99_999).contains(*station))
        {
            return Err(Error::invalid_station(station.to_string()));
        }

        let retrieval = &self.retrieval;
        if retrieval.max_retries == 0 {
            return Err(Error::configuration("max_retries must be at least 1"));
        }
        if retrieval.timeout_secs == 0 {
            return Err(Error::configuration("timeout_secs must be greater than 0"));
        }
        if retrieval.mode == RetrievalMode::Lftp {
            if retrieval.host.as_deref().is_none_or(str::is_empty) {
                return Err(Error::configuration(format!(
                    "lftp retrieval requires a host (set {} or retrieval.host)",
                    env_vars::FTP_HOST
                )));
            }
            if retrieval.user.as_deref().is_none_or(str::is_empty) {
                return Err(Error::configuration(format!(
                    "lftp retrieval requires a user (set {} or retrieval.user)",
                    env_vars::FTP_USER
                )));
            }
        }

        Ok(())
    }

    /// Replace the station list
    pub fn with_stations(mut self, stations: Vec<u32>) -> Self {
        self.stations = stations;
        self
    }

    /// Read bulletins from a local directory
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.retrieval.mode = RetrievalMode::Directory;
        self.retrieval.directory = directory.into();
        self
    }

    /// Store archived observations under `path`
    pub fn with_archive_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive.path = path.into();
        self
    }

    /// Assume `unit` when the header has no wind indicator
    pub fn with_default_wind_unit(mut self, unit: WindUnit) -> Self {
        self.decoding.default_wind_unit = Some(unit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.stations, vec![78350, 78351, 78352, 78353, 78354, 78355]);
        assert_eq!(config.retrieval.mode, RetrievalMode::Directory);
        assert_eq!(config.retrieval.port, 990);
        assert_eq!(config.retrieval.max_retries, 3);
        assert_eq!(config.retrieval.timeout(), Duration::from_secs(90));
        assert!(config.retrieval.password.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
stations = [78355]

[retrieval]
mode = "lftp"
host = "ftp.example.org"
user = "synop"
retry_delay_secs = 1

[decoding]
default_wind_unit = "knots"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.stations, vec![78355]);
        assert_eq!(config.retrieval.mode, RetrievalMode::Lftp);
        assert_eq!(config.retrieval.host.as_deref(), Some("ftp.example.org"));
        assert_eq!(config.retrieval.retry_delay(), Duration::from_secs(1));
        assert_eq!(config.retrieval.max_retries, 3);
        assert_eq!(config.archive.path, PathBuf::from("./observations"));
        assert_eq!(config.decoding.default_wind_unit, Some(WindUnit::Knots));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "stations = \"not a list\"").unwrap();

        let result = Config::from_file(&path);
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::from_file(Path::new("/nonexistent/synop/config.toml"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SYNOP_FTP_HOST", "ftp.example.org"),
            ("SYNOP_FTP_USER", "synop"),
            ("SYNOP_FTP_PASSWORD", "secret"),
            ("SYNOP_OBS_DIR", "/data/obs"),
            ("SYNOP_ARCHIVE_DIR", "  "),
        ]);

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.retrieval.host.as_deref(), Some("ftp.example.org"));
        assert_eq!(config.retrieval.user.as_deref(), Some("synop"));
        assert_eq!(config.retrieval.password.as_deref(), Some("secret"));
        assert_eq!(config.retrieval.directory, PathBuf::from("/data/obs"));
        // Blank values are ignored
        assert_eq!(config.archive.path, PathBuf::from("./observations"));
    }

    #[test]
    fn test_validation_rules() {
        assert!(Config::default().with_stations(vec![]).validate().is_err());
        assert!(matches!(
            Config::default().with_stations(vec![783]).validate(),
            Err(Error::InvalidStation { .. })
        ));

        let mut config = Config::default();
        config.retrieval.max_retries = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.retrieval.mode = RetrievalMode::Lftp;
        assert!(config.validate().is_err());
        config.retrieval.host = Some("ftp.example.org".to_string());
        assert!(config.validate().is_err());
        config.retrieval.user = Some("synop".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let mut config = Config::default();
        config.retrieval.password = Some("secret".to_string());

        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("secret"));
    }
}
