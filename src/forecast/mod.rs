mod client;
mod geocode;
mod translator;

pub use client::{ForecastClient, PayloadHandler, RequestConfig};
pub use geocode::{Coordinates, Geocoder};
pub use translator::{translate, translate_at, DAILY_FIELDS};
