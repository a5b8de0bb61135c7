//! Stores Open-Meteo daily weather for cities and reports how far the
//! forecasts were from what was later measured.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod models;

pub use app::App;
pub use config::Config;
pub use error::{AppError, Result};
