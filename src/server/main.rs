//! Cultural resources assessment server.
//!
//! Serves `POST /api/cultural-resources` for the report renderer.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use riogrande::api;
use riogrande::config::Config;
use riogrande::CulturalService;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Cultural resources assessment server")]
struct Args {
    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    let listen = args.listen.unwrap_or_else(|| config.server.listen.clone());

    info!("Rio Grande Due Diligence cultural resources server");
    info!("Tribal lands layer: {}", config.tribal.url);
    info!("NRHP layer: {}", config.nrhp.url);

    let service = Arc::new(CulturalService::from_config(&config)?);
    let app = api::router(service);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
