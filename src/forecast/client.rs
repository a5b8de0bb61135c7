use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Forecast;

use super::geocode::Geocoder;
use super::translator::{self, DAILY_FIELDS};

/// Converts a provider payload for a city into records.
pub type PayloadHandler = fn(&str, &Value) -> Result<Vec<Forecast>>;

/// Everything needed to request one city's daily data and read the answer.
#[derive(Clone)]
pub struct RequestConfig {
    pub api_url: String,
    pub params: Vec<(&'static str, String)>,
    pub handler: PayloadHandler,
}

pub struct ForecastClient {
    client: Client,
    geocoder: Geocoder,
    forecast_url: String,
}

impl ForecastClient {
    pub fn new(config: &Config) -> Result<Self> {
        for url in [&config.forecast_url, &config.geocoding_url] {
            Url::parse(url).map_err(|e| AppError::Config(format!("invalid URL {url:?}: {e}")))?;
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("forecast-diff/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            geocoder: Geocoder::new(client.clone(), &config.geocoding_url),
            client,
            forecast_url: config.forecast_url.clone(),
        })
    }

    /// Builds the Open-Meteo request for `city_name` between the two dates
    /// (inclusive), resolving the city to coordinates first.
    pub async fn request_config(
        &self,
        city_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RequestConfig> {
        if start_date > end_date {
            return Err(AppError::InvalidDate {
                start: start_date,
                end: end_date,
            });
        }

        let coordinates = self.geocoder.resolve(city_name).await?;

        let params = vec![
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
            ("timezone", "auto".to_string()),
            ("temperature_unit", "celsius".to_string()),
            ("windspeed_unit", "kmh".to_string()),
            ("precipitation_unit", "mm".to_string()),
            ("daily", DAILY_FIELDS.join(",")),
        ];

        Ok(RequestConfig {
            api_url: self.forecast_url.clone(),
            params,
            handler: translator::translate,
        })
    }

    /// Performs the request described by `config` and hands the body to its
    /// handler.
    pub async fn fetch(&self, city_name: &str, config: &RequestConfig) -> Result<Vec<Forecast>> {
        let response = self
            .client
            .get(&config.api_url)
            .query(&config.params)
            .send()
            .await
            .inspect_err(|e| tracing::error!("Forecast request for {:?} failed: {}", city_name, e))?;

        // Parameter errors come back as a JSON body with a 400 status, so the
        // body is read regardless of status.
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .inspect_err(|e| tracing::error!("Unreadable forecast response (HTTP {}): {}", status, e))?;

        let forecasts = (config.handler)(city_name, &payload)
            .inspect_err(|e| tracing::error!("Failed to translate forecast for {:?}: {}", city_name, e))?;

        tracing::debug!("Fetched {} daily records for {}", forecasts.len(), city_name);
        Ok(forecasts)
    }
}
