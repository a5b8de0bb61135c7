use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

const APP_DIR: &str = "forecast-diff";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn data_dir() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR);
    std::fs::create_dir_all(&data_dir).ok();
    data_dir
}

fn default_db_path() -> String {
    data_dir().join("forecasts.db").to_string_lossy().to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_dir() -> String {
    data_dir().join("logs").to_string_lossy().to_string()
}

fn default_log_file() -> String {
    "error.log".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bind_address: default_bind_address(),
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            request_timeout_secs: default_request_timeout(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads the config at `path`, writing a default one there first if it
    /// does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}
