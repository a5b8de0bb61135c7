use chrono::NaiveDate;

use crate::config::Config;
use crate::db::Repository;
use crate::error::Result;
use crate::forecast::ForecastClient;
use crate::models::{Forecast, ForecastDiff};

pub struct App {
    pub repository: Repository,
    client: ForecastClient,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let repository = Repository::new(&config.db_path).await?;
        let client = ForecastClient::new(config)?;

        Ok(Self { repository, client })
    }

    pub fn with_parts(repository: Repository, client: ForecastClient) -> Self {
        Self { repository, client }
    }

    /// Fetches daily records for the city and, when `save` is set, stores
    /// them all in one transaction before returning them.
    pub async fn fetch_forecasts(
        &self,
        city_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        save: bool,
    ) -> Result<Vec<Forecast>> {
        let config = self
            .client
            .request_config(city_name, start_date, end_date)
            .await?;
        let forecasts = self.client.fetch(city_name, &config).await?;

        if save {
            let written = self
                .repository
                .insert_forecasts(forecasts.clone())
                .await
                .inspect_err(|e| tracing::error!("Failed to store forecasts for {:?}: {}", city_name, e))?;
            tracing::info!(
                "Stored {} records for {} ({} to {})",
                written,
                city_name,
                start_date,
                end_date
            );
        }

        Ok(forecasts)
    }

    /// Forecast minus observation for every date of the city that has both.
    pub async fn forecast_diffs(&self, city_name: &str) -> Result<Vec<ForecastDiff>> {
        let pairs = self.repository.get_forecast_pairs(city_name).await?;

        pairs
            .iter()
            .map(|(forecasted, measured)| forecasted.diff(measured))
            .collect()
    }
}
