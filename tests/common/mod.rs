//! Mock Open-Meteo endpoints shared by the integration tests.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use forecast_diff::Config;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const NOVI_SAD_LAT: f64 = 45.25167;
pub const NOVI_SAD_LON: f64 = 19.83694;

pub fn test_config(server: &MockServer) -> Config {
    Config {
        db_path: ":memory:".to_string(),
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

/// Geocoding answer as Open-Meteo sends it, trimmed to a single match.
pub fn geocoding_hit(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "results": [{
            "id": 3194360,
            "name": name,
            "latitude": latitude,
            "longitude": longitude,
            "elevation": 80.0,
            "country_code": "RS",
            "timezone": "Europe/Belgrade",
            "country": "Serbia"
        }],
        "generationtime_ms": 0.7
    })
}

/// Daily payload for `days` consecutive dates from `start`.
pub fn daily_payload(start: NaiveDate, days: i64) -> Value {
    let dates: Vec<NaiveDate> = (0..days).map(|i| start + Duration::days(i)).collect();
    json!({
        "latitude": NOVI_SAD_LAT,
        "longitude": NOVI_SAD_LON,
        "timezone": "Europe/Belgrade",
        "daily_units": {
            "time": "iso8601",
            "temperature_2m_min": "°C",
            "temperature_2m_max": "°C",
            "precipitation_sum": "mm",
            "windspeed_10m_max": "km/h"
        },
        "daily": {
            "time": dates.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            "temperature_2m_min": (0..days).map(|i| 10.0 + i as f64).collect::<Vec<_>>(),
            "temperature_2m_max": (0..days).map(|i| 20.0 + i as f64).collect::<Vec<_>>(),
            "precipitation_sum": (0..days).map(|i| 0.5 * i as f64).collect::<Vec<_>>(),
            "windspeed_10m_max": (0..days).map(|i| 12.0 + i as f64).collect::<Vec<_>>(),
        }
    })
}

pub async fn mount_novi_sad(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Novi Sad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_hit(
            "Novi Sad",
            NOVI_SAD_LAT,
            NOVI_SAD_LON,
        )))
        .mount(server)
        .await;
}

pub async fn mount_unknown_city(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generationtime_ms": 0.4})))
        .mount(server)
        .await;
}

pub async fn mount_forecast(server: &MockServer, start: NaiveDate, end: NaiveDate) {
    let days = (end - start).num_days() + 1;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("start_date", start.to_string()))
        .and(query_param("end_date", end.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload(start, days)))
        .mount(server)
        .await;
}

pub async fn mount_forecast_error(server: &MockServer, reason: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": true,
            "reason": reason
        })))
        .mount(server)
        .await;
}
