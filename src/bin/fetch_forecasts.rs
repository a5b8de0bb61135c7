use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;

use forecast_diff::{logging, App, Config};

/// Fetches and stores new weather forecast data for the specified town or
/// city and within the specified start and end dates.
#[derive(Parser, Debug)]
#[command(name = "fetch-forecasts", version)]
struct Args {
    /// City or town whose weather is retrieved. Quote names with several words.
    #[arg(short, long)]
    city_name: String,

    /// First day to retrieve (YYYY-MM-DD)
    #[arg(short, long)]
    start_date: NaiveDate,

    /// Last day to retrieve (YYYY-MM-DD)
    #[arg(short, long)]
    end_date: NaiveDate,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the fetched records without storing them
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let _log_guard = logging::init(&config).context("failed to initialize logging")?;

    let app = App::new(&config).await.context("failed to initialize app")?;
    let forecasts = app
        .fetch_forecasts(&args.city_name, args.start_date, args.end_date, !args.no_save)
        .await
        .with_context(|| format!("failed to fetch forecasts for {}", args.city_name))?;

    if args.no_save {
        for forecast in &forecasts {
            println!(
                "{} {}: min {:.1}°C, max {:.1}°C, {:.1} mm, wind {:.1} km/h",
                forecast.measure_date,
                if forecast.is_forecast() { "forecast" } else { "measured" },
                forecast.temp_min,
                forecast.temp_max,
                forecast.precipitation_sum,
                forecast.windspeed_max
            );
        }
    }

    println!(
        "Successfully fetched {} forecasts between {} and {} for the city of {}.",
        forecasts.len(),
        args.start_date,
        args.end_date,
        args.city_name
    );

    Ok(())
}
