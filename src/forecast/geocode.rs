//! City name to coordinates, via the Open-Meteo geocoding API.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<Coordinates>>,
}

pub struct Geocoder {
    client: Client,
    url: String,
}

impl Geocoder {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Coordinates of the best match for `city_name`.
    pub async fn resolve(&self, city_name: &str) -> Result<Coordinates> {
        if city_name.trim().is_empty() {
            return Err(AppError::InvalidCity(city_name.to_string()));
        }

        let response: GeocodingResponse = self
            .client
            .get(&self.url)
            .query(&[
                ("name", city_name),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .inspect_err(|e| tracing::error!("Geocoding request for {:?} failed: {}", city_name, e))?
            .json()
            .await
            .inspect_err(|e| tracing::error!("Unreadable geocoding response for {:?}: {}", city_name, e))?;

        let coordinates = response
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| AppError::InvalidCity(city_name.to_string()))?;

        tracing::debug!(
            "Resolved {:?} to ({}, {})",
            city_name,
            coordinates.latitude,
            coordinates.longitude
        );
        Ok(coordinates)
    }
}
