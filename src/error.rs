use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid city: {0:?}")]
    InvalidCity(String),

    #[error("Invalid date range: {start} to {end}")]
    InvalidDate { start: NaiveDate, end: NaiveDate },

    #[error("Forecast retrieval failed: {0}")]
    ForecastRetrieval(String),

    #[error("Cannot diff forecasts with different measurement dates ({left} vs {right})")]
    InvalidDiff { left: NaiveDate, right: NaiveDate },

    #[error("Cannot diff two records for {measure_date} that are both {}", record_kind(.is_forecast))]
    AmbiguousDiff {
        measure_date: NaiveDate,
        is_forecast: bool,
    },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Cannot coerce {field}[{index}] from {value}")]
    Coercion {
        field: &'static str,
        index: usize,
        value: serde_json::Value,
    },

    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Whether a provider rejection refers to the requested date range.
    ///
    /// Open-Meteo answers out-of-range or inverted dates with an error body
    /// whose reason names the offending date parameter.
    pub fn is_date_rejection(&self) -> bool {
        match self {
            AppError::InvalidDate { .. } => true,
            AppError::ForecastRetrieval(reason) => reason
                .to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == "date"),
            _ => false,
        }
    }
}

fn record_kind(is_forecast: &bool) -> &'static str {
    if *is_forecast {
        "forecasts"
    } else {
        "observations"
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
