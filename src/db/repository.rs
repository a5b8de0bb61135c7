use rusqlite::{params, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::Forecast;

use super::schema::SCHEMA;

const FORECAST_COLUMNS: &str = "id, city_name, request_date, measure_date, temp_min, temp_max, precipitation_sum, windspeed_max";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        Self::with_connection(conn).await
    }

    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::with_connection(conn).await
    }

    async fn with_connection(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Stores all records in a single transaction.
    ///
    /// A record for a (city, measure date, request date) that already exists
    /// takes the new values. Returns the number of rows written.
    pub async fn insert_forecasts(&self, forecasts: Vec<Forecast>) -> Result<usize> {
        let written = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let mut written = 0;
                {
                    let mut stmt = tx.prepare(
                        r#"INSERT INTO forecasts (city_name, request_date, measure_date, temp_min, temp_max,
                                                  precipitation_sum, windspeed_max, is_forecast)
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                           ON CONFLICT(city_name, measure_date, request_date) DO UPDATE SET
                               temp_min = excluded.temp_min,
                               temp_max = excluded.temp_max,
                               precipitation_sum = excluded.precipitation_sum,
                               windspeed_max = excluded.windspeed_max"#,
                    )?;
                    for forecast in &forecasts {
                        written += stmt.execute(params![
                            forecast.city_name,
                            forecast.request_date,
                            forecast.measure_date,
                            forecast.temp_min,
                            forecast.temp_max,
                            forecast.precipitation_sum,
                            forecast.windspeed_max,
                            forecast.is_forecast(),
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(written)
            })
            .await?;
        Ok(written)
    }

    pub async fn get_forecasts(&self, city_name: &str) -> Result<Vec<Forecast>> {
        let city_name = city_name.to_string();
        let forecasts = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {FORECAST_COLUMNS} FROM forecasts WHERE city_name = ?1 ORDER BY measure_date, request_date"
                ))?;
                let forecasts = stmt
                    .query_map(params![city_name], |row| forecast_from_row(row, 0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(forecasts)
            })
            .await?;
        Ok(forecasts)
    }

    /// Returns one (forecast, observation) pair per measurement date for the
    /// city, ordered by date.
    ///
    /// When a date has several forecasts or several observations, the one
    /// requested last is used on each side.
    pub async fn get_forecast_pairs(&self, city_name: &str) -> Result<Vec<(Forecast, Forecast)>> {
        let city_name = city_name.to_string();
        let pairs = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"WITH latest AS (
                           SELECT f.* FROM forecasts f
                           WHERE f.city_name = ?1
                             AND f.request_date = (
                                 SELECT MAX(g.request_date) FROM forecasts g
                                 WHERE g.city_name = f.city_name
                                   AND g.measure_date = f.measure_date
                                   AND g.is_forecast = f.is_forecast)
                       )
                       SELECT a.id, a.city_name, a.request_date, a.measure_date, a.temp_min, a.temp_max,
                              a.precipitation_sum, a.windspeed_max,
                              b.id, b.city_name, b.request_date, b.measure_date, b.temp_min, b.temp_max,
                              b.precipitation_sum, b.windspeed_max
                       FROM latest a
                       JOIN latest b ON a.measure_date = b.measure_date
                       WHERE a.is_forecast = 1 AND b.is_forecast = 0
                       ORDER BY a.measure_date"#,
                )?;
                let pairs = stmt
                    .query_map(params![city_name], |row| {
                        Ok((forecast_from_row(row, 0)?, forecast_from_row(row, 8)?))
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(pairs)
            })
            .await?;
        Ok(pairs)
    }

    pub async fn count_forecasts(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM forecasts", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}

fn forecast_from_row(row: &Row, offset: usize) -> rusqlite::Result<Forecast> {
    Ok(Forecast {
        id: row.get(offset)?,
        city_name: row.get(offset + 1)?,
        request_date: row.get(offset + 2)?,
        measure_date: row.get(offset + 3)?,
        temp_min: row.get(offset + 4)?,
        temp_max: row.get(offset + 5)?,
        precipitation_sum: row.get(offset + 6)?,
        windspeed_max: row.get(offset + 7)?,
    })
}
