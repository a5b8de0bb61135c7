use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// One day of weather values for a city, as known on `request_date`.
///
/// Whether the record is a forecast or an observation follows from its two
/// dates: values for a day that had not happened yet at request time are a
/// forecast, everything else was measured.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub id: Option<i64>,
    pub city_name: String,
    pub request_date: NaiveDate,
    pub measure_date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub precipitation_sum: f64,
    pub windspeed_max: f64,
}

impl Forecast {
    pub fn new(
        city_name: impl Into<String>,
        request_date: NaiveDate,
        measure_date: NaiveDate,
        temp_min: f64,
        temp_max: f64,
        precipitation_sum: f64,
        windspeed_max: f64,
    ) -> Self {
        Self {
            id: None,
            city_name: city_name.into(),
            request_date,
            measure_date,
            temp_min,
            temp_max,
            precipitation_sum,
            windspeed_max,
        }
    }

    pub fn is_forecast(&self) -> bool {
        self.measure_date > self.request_date
    }

    /// Signed difference `forecast - observation` for every weather value.
    ///
    /// The operands may be passed in either order; their roles come from
    /// [`Forecast::is_forecast`]. Both must describe the same measurement date
    /// and exactly one of them must be a forecast.
    pub fn diff(&self, other: &Forecast) -> Result<ForecastDiff> {
        if self.measure_date != other.measure_date {
            return Err(AppError::InvalidDiff {
                left: self.measure_date,
                right: other.measure_date,
            });
        }

        if self.is_forecast() == other.is_forecast() {
            return Err(AppError::AmbiguousDiff {
                measure_date: self.measure_date,
                is_forecast: self.is_forecast(),
            });
        }

        let (forecasted, measured) = if self.is_forecast() {
            (self, other)
        } else {
            (other, self)
        };

        Ok(ForecastDiff {
            city_name: measured.city_name.clone(),
            measure_date: measured.measure_date,
            temp_min_diff: forecasted.temp_min - measured.temp_min,
            temp_max_diff: forecasted.temp_max - measured.temp_max,
            precipitation_diff: forecasted.precipitation_sum - measured.precipitation_sum,
            windspeed_max_diff: forecasted.windspeed_max - measured.windspeed_max,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDiff {
    pub city_name: String,
    pub measure_date: NaiveDate,
    pub temp_min_diff: f64,
    pub temp_max_diff: f64,
    pub precipitation_diff: f64,
    pub windspeed_max_diff: f64,
}
