//! One-shot cultural resources assessment for a coordinate.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use riogrande::arcgis::{build_http_client, ArcGisLayer};
use riogrande::config::{Config, LayerConfig};
use riogrande::fixture::FixtureSource;
use riogrande::source::FeatureSource;
use riogrande::{Coordinate, CulturalService};

#[derive(Parser, Debug)]
#[command(name = "assess")]
#[command(about = "Assess cultural resources risk for a coordinate")]
struct Args {
    /// Latitude (WGS84)
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude (WGS84)
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Answer tribal land queries from an ArcGIS JSON feature set instead of the live layer
    #[arg(long)]
    tribal_fixture: Option<PathBuf>,

    /// Answer NRHP queries from an ArcGIS JSON feature set instead of the live layer
    #[arg(long)]
    nrhp_fixture: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let point = Coordinate::new(args.lat, args.lng).context("Invalid coordinate")?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let client = build_http_client(&config.upstream).context("Failed to create HTTP client")?;
    let tribal = layer_source("tribal", args.tribal_fixture.as_ref(), &client, &config.tribal)?;
    let nrhp = layer_source("nrhp", args.nrhp_fixture.as_ref(), &client, &config.nrhp)?;

    let service = Arc::new(CulturalService::new(
        tribal,
        nrhp,
        config.tribal.buffer_miles,
        config.nrhp.buffer_miles,
    ));

    info!("Assessing {}", point);
    let assessment = service.assess_isolated(point).await;

    println!("{}", serde_json::to_string_pretty(&assessment)?);

    Ok(())
}

fn layer_source(
    name: &str,
    fixture: Option<&PathBuf>,
    client: &reqwest::Client,
    layer: &LayerConfig,
) -> Result<Arc<dyn FeatureSource>> {
    match fixture {
        Some(path) => Ok(Arc::new(
            FixtureSource::load(name, path)
                .with_context(|| format!("Failed to load {} fixture", name))?,
        )),
        None => Ok(Arc::new(
            ArcGisLayer::new(name, client.clone(), layer)
                .with_context(|| format!("Invalid {} layer URL '{}'", name, layer.url))?,
        )),
    }
}
