use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use climate_api::{AppState, ClimateApiConfig, SqliteStore, telemetry, web};

/// Read-only HTTP API over historical weather observations
#[derive(Debug, Parser)]
#[command(name = "climate_api", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the SQLite database URL
    #[arg(short, long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClimateApiConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.url = database;
    }
    config.validate()?;

    telemetry::init(&config.logging)?;

    let store = SqliteStore::open(&config.database)
        .await
        .with_context(|| format!("Failed to open observation store at {}", config.database.url))?;

    let state = AppState::new(Arc::new(store));
    web::run(&config.bind_address(), state)
        .await
        .context("Web server failed")?;

    Ok(())
}
