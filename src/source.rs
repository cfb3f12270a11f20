//! Spatial feature sources consulted by the resolvers.
//!
//! Containment and proximity are answered by the source (a live ArcGIS
//! layer, or an in-memory fixture), never by the resolvers themselves.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::arcgis::Feature;
use crate::models::Coordinate;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {layer} failed: {source}")]
    Http {
        layer: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{layer} returned HTTP {status}")]
    Status { layer: String, status: u16 },
    #[error("{layer} returned a non-JSON body: {snippet}")]
    NotJson { layer: String, snippet: String },
    #[error("{layer} reported error {code}: {message}")]
    Service {
        layer: String,
        code: i64,
        message: String,
    },
    #[error("failed to read fixture {path}: {source}")]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture: {0}")]
    FixtureParse(#[from] serde_json::Error),
}

/// A queryable layer of spatial features
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// The feature whose polygon contains `point`, if any
    async fn contains_point(&self, point: &Coordinate) -> Result<Option<Feature>, SourceError>;

    /// All features intersecting a buffer of `radius_miles` around `point`
    async fn within(
        &self,
        point: &Coordinate,
        radius_miles: f64,
    ) -> Result<Vec<Feature>, SourceError>;
}
