//! Validation error bodies for the HTTP surface.
//!
//! Failures are reported as `422 Unprocessable Entity` with one entry per
//! offending query field:
//!
//! ```json
//! {
//!   "detail": [
//!     { "loc": ["query", "city_name"], "type": "value_error.str", "msg": "invalid city" }
//!   ]
//! }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;

const CITY_NAME: &str = "city_name";
const START_DATE: &str = "start_date";
const END_DATE: &str = "end_date";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetail {
    pub loc: [&'static str; 2],
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub msg: String,
}

impl ValidationDetail {
    pub fn invalid_city() -> Self {
        Self {
            loc: ["query", CITY_NAME],
            kind: "value_error.str",
            msg: "invalid city".to_string(),
        }
    }

    pub fn invalid_date_format(field: &'static str) -> Self {
        Self {
            loc: ["query", field],
            kind: "value_error.date",
            msg: "invalid date format".to_string(),
        }
    }

    /// A range the provider cannot serve implicates both ends of it.
    pub fn invalid_date_range() -> Vec<Self> {
        [START_DATE, END_DATE]
            .into_iter()
            .map(|field| Self {
                loc: ["query", field],
                kind: "value_error.date",
                msg: "invalid date".to_string(),
            })
            .collect()
    }

    pub fn unknown(reason: &str) -> Self {
        Self {
            loc: ["unknown", "unknown"],
            kind: "value_error.unknown",
            msg: reason.to_lowercase(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidationBody {
    detail: Vec<ValidationDetail>,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<ValidationDetail>),
    Internal(AppError),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if matches!(err, AppError::InvalidCity(_)) {
            return ApiError::Validation(vec![ValidationDetail::invalid_city()]);
        }
        if err.is_date_rejection() {
            return ApiError::Validation(ValidationDetail::invalid_date_range());
        }
        match err {
            AppError::ForecastRetrieval(reason) => {
                ApiError::Validation(vec![ValidationDetail::unknown(&reason)])
            }
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ValidationBody { detail })).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!("Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub fn require_city(city_name: Option<String>) -> Result<String, ValidationDetail> {
    match city_name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ValidationDetail::invalid_city()),
    }
}

pub fn require_date(field: &'static str, value: Option<&str>) -> Result<NaiveDate, ValidationDetail> {
    value
        .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| ValidationDetail::invalid_date_format(field))
}

/// Validated parameters of a fetch request.
#[derive(Debug, PartialEq)]
pub struct FetchParams {
    pub city_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Checks every field and reports all failures together.
pub fn validate_fetch(
    city_name: Option<String>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<FetchParams, ApiError> {
    let city_name = require_city(city_name);
    let start_date = require_date(START_DATE, start_date);
    let end_date = require_date(END_DATE, end_date);

    match (city_name, start_date, end_date) {
        (Ok(city_name), Ok(start_date), Ok(end_date)) => Ok(FetchParams {
            city_name,
            start_date,
            end_date,
        }),
        (city_name, start_date, end_date) => {
            let detail = [city_name.err(), start_date.err(), end_date.err()]
                .into_iter()
                .flatten()
                .collect();
            Err(ApiError::Validation(detail))
        }
    }
}
