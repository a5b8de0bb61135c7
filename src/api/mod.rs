//! HTTP routes.
//!
//! - `GET /health` → liveness check
//! - `GET /api/v1/forecasts` → forecast vs measurement diffs for a city
//! - `POST /api/v1/forecasts` → fetch and store new data for a city

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::app::App;

pub mod forecasts;
pub mod validation;

pub fn router(app: Arc<App>) -> Router {
    let v1 = Router::new().route(
        "/forecasts",
        get(forecasts::get_forecast_diffs).post(forecasts::fetch_new_forecasts),
    );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1)
        .with_state(app)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
