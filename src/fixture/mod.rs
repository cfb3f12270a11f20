//! In-memory feature sources loaded from ArcGIS JSON documents.
//!
//! Used as a test double for the resolvers and for offline assessments.

mod index;

pub use index::FeatureIndex;

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::arcgis::{Feature, FeatureSet};
use crate::models::Coordinate;
use crate::source::{FeatureSource, SourceError};

/// Feature source answering queries from a fixed feature set
pub struct FixtureSource {
    name: String,
    index: FeatureIndex,
}

impl FixtureSource {
    pub fn new(name: &str, features: Vec<Feature>) -> Self {
        Self {
            name: name.to_string(),
            index: FeatureIndex::build(features),
        }
    }

    /// Parse an ArcGIS `f=json` feature set
    pub fn from_json(name: &str, json: &str) -> Result<Self, SourceError> {
        let set: FeatureSet = serde_json::from_str(json)?;
        Ok(Self::new(name, set.into_features()))
    }

    pub fn load<P: AsRef<Path>>(name: &str, path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::from_json(name, &json)?;
        info!(
            "Loaded {} {} fixture features from {}",
            source.index.len(),
            name,
            path.display()
        );
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[async_trait]
impl FeatureSource for FixtureSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn contains_point(&self, point: &Coordinate) -> Result<Option<Feature>, SourceError> {
        Ok(self.index.containing(point).first().map(|f| (*f).clone()))
    }

    async fn within(
        &self,
        point: &Coordinate,
        radius_miles: f64,
    ) -> Result<Vec<Feature>, SourceError> {
        Ok(self
            .index
            .within(point, radius_miles)
            .into_iter()
            .cloned()
            .collect())
    }
}
