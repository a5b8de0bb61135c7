use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::models::ForecastDiff;

use super::validation::{require_city, validate_fetch, ApiError};

#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    city_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    city_name: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub total_new: usize,
}

/// GET /api/v1/forecasts?city_name=...
///
/// Differences between forecasted and measured values for every date of the
/// city that has both, oldest first. Cities without data give `[]`.
pub async fn get_forecast_diffs(
    State(app): State<Arc<App>>,
    Query(query): Query<DiffQuery>,
) -> Result<Json<Vec<ForecastDiff>>, ApiError> {
    let city_name = require_city(query.city_name).map_err(|d| ApiError::Validation(vec![d]))?;

    let diffs = app.forecast_diffs(&city_name).await?;
    Ok(Json(diffs))
}

/// POST /api/v1/forecasts?city_name=...&start_date=...&end_date=...
///
/// Fetches and stores the city's daily data for the range, answering
/// `201 {"total_new": n}`.
pub async fn fetch_new_forecasts(
    State(app): State<Arc<App>>,
    Query(query): Query<FetchQuery>,
) -> Result<(StatusCode, Json<FetchResponse>), ApiError> {
    let params = validate_fetch(
        query.city_name,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;

    let forecasts = app
        .fetch_forecasts(&params.city_name, params.start_date, params.end_date, true)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FetchResponse {
            total_new: forecasts.len(),
        }),
    ))
}
