pub const SCHEMA: &str = r#"
-- forecasts table: one row per city, measurement date and request date
CREATE TABLE IF NOT EXISTS forecasts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city_name TEXT NOT NULL,
    request_date TEXT NOT NULL,
    measure_date TEXT NOT NULL,
    temp_min REAL NOT NULL,
    temp_max REAL NOT NULL,
    precipitation_sum REAL NOT NULL,
    windspeed_max REAL NOT NULL,
    is_forecast INTEGER NOT NULL,
    UNIQUE(city_name, measure_date, request_date)
);

CREATE INDEX IF NOT EXISTS idx_forecasts_measure_date ON forecasts(measure_date);
CREATE INDEX IF NOT EXISTS idx_forecasts_city_measure ON forecasts(city_name, measure_date);
"#;
