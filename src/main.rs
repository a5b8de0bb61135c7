use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use forecast_diff::{api, logging, App, Config};

/// Serves the forecast API.
#[derive(Parser, Debug)]
#[command(name = "forecast-server", version)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `bind_address` from the config
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let _log_guard = logging::init(&config).context("failed to initialize logging")?;

    // Opens the database and creates the schema if needed
    let app = App::new(&config).await.context("failed to initialize app")?;
    let router = api::router(Arc::new(app));

    let bind = args.bind.unwrap_or(config.bind_address);
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind:?}"))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    println!("Serving forecasts on http://{addr}");
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
