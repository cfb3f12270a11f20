use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_TRIBAL_URL: &str =
    "https://biamaps.geoplatform.gov/server/rest/services/DivLTR/BIA_AIAN_National_LAR/MapServer/0";
pub const DEFAULT_NRHP_URL: &str =
    "https://mapservices.nps.gov/arcgis/rest/services/cultural_resources/nrhp_locations/MapServer/1";

#[derive(Debug, Deserialize, Clone)]
#[serde(from = "ConfigFile")]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub tribal: LayerConfig,
    pub nrhp: LayerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// One ArcGIS feature layer
#[derive(Debug, Clone)]
pub struct LayerConfig {
    /// Layer URL, without the trailing `/query`
    pub url: String,
    pub out_fields: Vec<String>,
    /// Radius of the proximity (buffer) query
    pub buffer_miles: f64,
}

/// On-disk shape. Layer sections override their layer's defaults field by field.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    upstream: UpstreamConfig,
    #[serde(default)]
    tribal: LayerOverrides,
    #[serde(default)]
    nrhp: LayerOverrides,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LayerOverrides {
    url: Option<String>,
    out_fields: Option<Vec<String>>,
    buffer_miles: Option<f64>,
}

impl LayerOverrides {
    fn apply(self, base: LayerConfig) -> LayerConfig {
        LayerConfig {
            url: self.url.unwrap_or(base.url),
            out_fields: self.out_fields.unwrap_or(base.out_fields),
            buffer_miles: self.buffer_miles.unwrap_or(base.buffer_miles),
        }
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            server: file.server,
            upstream: file.upstream,
            tribal: file.tribal.apply(LayerConfig::default_tribal()),
            nrhp: file.nrhp.apply(LayerConfig::default_nrhp()),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "RioGrandeDueDiligence/0.1 (cultural resources)".to_string()
}

fn default_out_fields() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl LayerConfig {
    pub fn default_tribal() -> Self {
        Self {
            url: DEFAULT_TRIBAL_URL.to_string(),
            out_fields: default_out_fields(),
            buffer_miles: 50.0,
        }
    }

    pub fn default_nrhp() -> Self {
        Self {
            url: DEFAULT_NRHP_URL.to_string(),
            out_fields: default_out_fields(),
            buffer_miles: 1.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigFile::default().into()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
