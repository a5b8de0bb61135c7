//! Turns Open-Meteo `daily` payloads into [`Forecast`] records.

use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::Forecast;

const TIME: &str = "time";
const TEMP_MIN: &str = "temperature_2m_min";
const TEMP_MAX: &str = "temperature_2m_max";
const PRECIPITATION_SUM: &str = "precipitation_sum";
const WINDSPEED_MAX: &str = "windspeed_10m_max";

/// Daily variables requested from the provider, in request order.
pub const DAILY_FIELDS: [&str; 4] = [TEMP_MIN, TEMP_MAX, PRECIPITATION_SUM, WINDSPEED_MAX];

/// Translates a provider payload using today's date as the request date.
pub fn translate(city_name: &str, payload: &Value) -> Result<Vec<Forecast>> {
    translate_at(city_name, payload, Local::now().date_naive())
}

pub fn translate_at(city_name: &str, payload: &Value, request_date: NaiveDate) -> Result<Vec<Forecast>> {
    if payload.get("error").is_some_and(is_truthy) {
        let reason = payload
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(AppError::ForecastRetrieval(reason.to_string()));
    }

    let daily = payload
        .get("daily")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::InvalidPayload("missing \"daily\" object".to_string()))?;

    let times = series(daily, TIME)?;
    let len = times.len();
    let temp_min = parallel_series(daily, TEMP_MIN, len)?;
    let temp_max = parallel_series(daily, TEMP_MAX, len)?;
    let precipitation = parallel_series(daily, PRECIPITATION_SUM, len)?;
    let windspeed = parallel_series(daily, WINDSPEED_MAX, len)?;

    (0..len)
        .map(|i| -> Result<Forecast> {
            Ok(Forecast::new(
                city_name,
                request_date,
                coerce_date(TIME, i, &times[i])?,
                coerce_float(TEMP_MIN, i, &temp_min[i])?,
                coerce_float(TEMP_MAX, i, &temp_max[i])?,
                coerce_float(PRECIPITATION_SUM, i, &precipitation[i])?,
                coerce_float(WINDSPEED_MAX, i, &windspeed[i])?,
            ))
        })
        .collect()
}

fn series<'a>(daily: &'a Map<String, Value>, field: &str) -> Result<&'a Vec<Value>> {
    daily
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::InvalidPayload(format!("missing \"{field}\" series")))
}

fn parallel_series<'a>(daily: &'a Map<String, Value>, field: &str, len: usize) -> Result<&'a Vec<Value>> {
    let values = series(daily, field)?;
    if values.len() != len {
        return Err(AppError::InvalidPayload(format!(
            "\"{field}\" has {} values but \"{TIME}\" has {len}",
            values.len()
        )));
    }
    Ok(values)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn coerce_date(field: &'static str, index: usize, value: &Value) -> Result<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| coercion_error(field, index, value))
}

/// Finite numbers and numeric strings are accepted; an explicit null means
/// no reading and becomes `0.0`.
fn coerce_float(field: &'static str, index: usize, value: &Value) -> Result<f64> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n.as_f64().ok_or_else(|| coercion_error(field, index, value)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| coercion_error(field, index, value)),
        _ => Err(coercion_error(field, index, value)),
    }
}

fn coercion_error(field: &'static str, index: usize, value: &Value) -> AppError {
    AppError::Coercion {
        field,
        index,
        value: value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 3).unwrap()
    }

    fn payload(row: [Value; 5]) -> Value {
        let [time, min, max, precipitation, wind] = row;
        json!({
            "daily": {
                "time": [time],
                "temperature_2m_min": [min],
                "temperature_2m_max": [max],
                "precipitation_sum": [precipitation],
                "windspeed_10m_max": [wind],
            }
        })
    }

    #[test]
    fn translates_each_index_in_order() {
        let payload = json!({
            "latitude": 45.25,
            "longitude": 19.84,
            "daily": {
                "time": ["2023-05-02", "2023-05-03", "2023-05-04"],
                "temperature_2m_min": [8.1, 9.4, "10.25"],
                "temperature_2m_max": [19.0, 21.3, 22.8],
                "precipitation_sum": [0.0, 2.4, null],
                "windspeed_10m_max": [12.6, 9.7, 14.1],
            }
        });

        let forecasts = assert_ok!(translate_at("Novi Sad", &payload, today()));

        assert_eq!(forecasts.len(), 3);
        for (i, forecast) in forecasts.iter().enumerate() {
            assert_eq!(forecast.city_name, "Novi Sad");
            assert_eq!(forecast.request_date, today());
            assert_eq!(forecast.measure_date, NaiveDate::from_ymd_opt(2023, 5, 2 + i as u32).unwrap());
            assert_eq!(forecast.id, None);
        }
        assert!(!forecasts[0].is_forecast());
        assert!(!forecasts[1].is_forecast());
        assert!(forecasts[2].is_forecast());
        assert_eq!(forecasts[2].temp_min, 10.25);
        assert_eq!(forecasts[1].precipitation_sum, 2.4);
        assert_eq!(forecasts[2].precipitation_sum, 0.0);
    }

    #[test]
    fn translate_uses_todays_date() {
        let forecasts = translate("Novi Sad", &payload([
            json!("2023-05-01"),
            json!(1.0),
            json!(2.0),
            json!(3.0),
            json!(4.0),
        ]))
        .unwrap();

        assert_eq!(forecasts[0].request_date, Local::now().date_naive());
    }

    #[test]
    fn error_payload_is_a_retrieval_error() {
        let payload = json!({"error": true, "reason": "Some error reason."});

        let err = assert_err!(translate_at("Novi Sad", &payload, today()));
        assert!(matches!(err, AppError::ForecastRetrieval(reason) if reason == "Some error reason."));
    }

    #[test]
    fn error_payload_without_reason_is_unknown_error() {
        let err = assert_err!(translate_at("Novi Sad", &json!({"error": true}), today()));
        assert!(matches!(err, AppError::ForecastRetrieval(reason) if reason == "unknown error"));
    }

    #[test]
    fn falsy_error_flag_is_ignored() {
        let mut payload = payload([json!("2023-05-01"), json!(1), json!(2), json!(3), json!(4)]);
        payload["error"] = json!(false);

        assert_eq!(translate_at("Novi Sad", &payload, today()).unwrap().len(), 1);
    }

    #[test]
    fn empty_series_yield_no_records() {
        let payload = json!({
            "daily": {
                "time": [],
                "temperature_2m_min": [],
                "temperature_2m_max": [],
                "precipitation_sum": [],
                "windspeed_10m_max": [],
            }
        });

        assert!(translate_at("Novi Sad", &payload, today()).unwrap().is_empty());
    }

    #[test]
    fn missing_daily_is_invalid_payload() {
        let err = assert_err!(translate_at("Novi Sad", &json!({"latitude": 1.0}), today()));
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn missing_series_is_invalid_payload() {
        let mut payload = payload([json!("2023-05-01"), json!(1), json!(2), json!(3), json!(4)]);
        payload["daily"].as_object_mut().unwrap().remove(WINDSPEED_MAX);

        let err = assert_err!(translate_at("Novi Sad", &payload, today()));
        assert!(matches!(err, AppError::InvalidPayload(msg) if msg.contains(WINDSPEED_MAX)));
    }

    #[test]
    fn length_mismatch_is_invalid_payload() {
        let mut payload = payload([json!("2023-05-01"), json!(1), json!(2), json!(3), json!(4)]);
        payload["daily"][TEMP_MAX] = json!([2, 5]);

        let err = assert_err!(translate_at("Novi Sad", &payload, today()));
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn garbage_values_are_rejected_per_field() {
        let rows = [
            ([json!("abc"), json!("17.591"), json!("39.2"), json!("12"), json!("10")], TIME),
            ([json!("2023-05-01"), json!({"x": 1}), json!("42.1"), json!("5.39"), json!("5.15")], TEMP_MIN),
            ([json!("2023-05-02"), json!("7"), json!("Lorem Ipsum"), json!("20.3"), json!("3.71")], TEMP_MAX),
            ([json!("2023-05-03"), json!("24.2"), json!("32.55"), json!(true), json!("0")], PRECIPITATION_SUM),
            ([json!("2023-05-04"), json!("12.14"), json!("37.14"), json!("14.6"), json!([1])], WINDSPEED_MAX),
            ([json!("2023-05-05"), json!("NaN"), json!("30.1"), json!("0"), json!("4")], TEMP_MIN),
            ([json!("2023-05-06"), json!("3.2"), json!("inf"), json!("0"), json!("4")], TEMP_MAX),
            ([json!("2023-05-07"), json!("3.2"), json!("30.1"), json!("0"), json!("-infinity")], WINDSPEED_MAX),
        ];

        for (row, bad_field) in rows {
            let err = assert_err!(translate_at("Novi Sad", &payload(row), today()));
            match err {
                AppError::Coercion { field, index, .. } => {
                    assert_eq!(field, bad_field);
                    assert_eq!(index, 0);
                }
                other => panic!("expected coercion error for {bad_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn truthiness_matches_json_semantics() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!([])));
    }
}
