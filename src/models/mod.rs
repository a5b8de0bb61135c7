mod forecast;

pub use forecast::{Forecast, ForecastDiff};
