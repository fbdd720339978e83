//! # Configuration
//!
//! Settings loaded once at startup from `heladeria.toml`.
//!
//! ## Configuration Sources (Priority Order)
//! 1. `RUST_LOG` (log filter only)
//! 2. Config file (`<config_dir>/heladeria.toml`)
//! 3. Defaults (this file)
//!
//! ## Example File
//! ```toml
//! [store]
//! path = "/home/me/.local/share/heladeria/heladeria.db"
//!
//! [register]
//! date_basis = "local"
//! currency_symbol = "$"
//!
//! [logging]
//! filter = "info,heladeria=debug,sqlx=warn"
//! ```
//!
//! Configuration is read-only after startup.

use chrono::{Local, NaiveDate, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "heladeria.toml";

/// Store file name inside the platform data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "heladeria.db";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,heladeria=debug,sqlx=warn";

/// Errors reading the configuration file or resolving platform paths.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine the {0} directory")]
    NoPlatformDir(&'static str),

    #[error("Could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub register: RegisterConfig,
    pub logging: LoggingConfig,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file. Defaults to `<data_dir>/heladeria.db`.
    pub path: Option<PathBuf>,
}

/// `[register]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// Which calendar decides "today" for new sales.
    pub date_basis: DateBasis,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig {
            date_basis: DateBasis::Utc,
            currency_symbol: "$".to_string(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Calendar used to stamp sales and to pick "today" for the register close.
///
/// ## Why It Matters
/// ```text
/// 23:30 local (UTC-5) on 2024-07-01
///   Utc   → sale booked under 2024-07-02
///   Local → sale booked under 2024-07-01
/// ```
/// `Utc` matches files written by earlier versions of the register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBasis {
    #[default]
    Utc,
    Local,
}

impl DateBasis {
    /// Today's date on this calendar.
    pub fn today(&self) -> NaiveDate {
        match self {
            DateBasis::Utc => Utc::now().date_naive(),
            DateBasis::Local => Local::now().date_naive(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads configuration from a file.
    ///
    /// ## Returns
    /// * `Ok(AppConfig::default())` - File doesn't exist
    /// * `Ok(config)` - File parsed
    /// * `Err(ConfigError)` - File unreadable or invalid
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = AppConfig::from_toml_str(&text, path)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Loads configuration, falling back to defaults with a warning.
    ///
    /// A broken config file never stops the register from starting.
    pub fn load_or_default(path: &Path) -> Self {
        match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring config file");
                AppConfig::default()
            }
        }
    }

    /// The store file to open.
    ///
    /// ## Platform-Specific Default
    /// - **Linux**: `~/.local/share/heladeria/heladeria.db`
    /// - **macOS**: `~/Library/Application Support/com.heladeria.heladeria/heladeria.db`
    /// - **Windows**: `%APPDATA%\heladeria\heladeria\data\heladeria.db`
    ///
    /// The data directory is created if it doesn't exist.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.store.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()?;
        let data_dir = dirs.data_dir();

        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::CreateDir {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DEFAULT_DB_FILE_NAME))
    }
}

/// Location of the config file for this platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "heladeria", "heladeria").ok_or(ConfigError::NoPlatformDir("home"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("heladeria-{}-{}", uuid::Uuid::new_v4(), name))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.register.date_basis, DateBasis::Utc);
        assert_eq!(config.register.currency_symbol, "$");
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            "[register]\ndate_basis = \"local\"\n",
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(config.register.date_basis, DateBasis::Local);
        assert_eq!(config.register.currency_symbol, "$");
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
            [store]
            path = "/srv/heladeria/shop.db"

            [register]
            date_basis = "utc"
            currency_symbol = "€"

            [logging]
            filter = "warn"
            "#,
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/srv/heladeria/shop.db")
        );
        assert_eq!(config.register.currency_symbol, "€");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_unknown_date_basis_is_parse_error() {
        let err = AppConfig::from_toml_str(
            "[register]\ndate_basis = \"martian\"\n",
            Path::new("inline"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = AppConfig::load(&scratch("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = scratch("broken.toml");
        std::fs::write(&path, "[store\npath = ").unwrap();

        assert!(AppConfig::load(&path).is_err());
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_date_basis_today() {
        let utc = DateBasis::Utc.today();
        let local = DateBasis::Local.today();
        // The two calendars never disagree by more than a day
        assert!((utc - local).num_days().abs() <= 1);
    }
}
