//! Assessment service wiring the two feature sources to the synthesizer.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, warn};

use super::nrhp::{resolve_nrhp, NrhpLookup};
use super::synthesize::synthesize;
use super::tribal::{resolve_tribal_lands, TribalLookup};
use crate::arcgis::{build_http_client, ArcGisLayer};
use crate::config::Config;
use crate::models::{Coordinate, CulturalAssessment};
use crate::source::FeatureSource;

/// Stateless cultural resources classifier. Cheap to share behind an `Arc`.
pub struct CulturalService {
    tribal: Arc<dyn FeatureSource>,
    nrhp: Arc<dyn FeatureSource>,
    tribal_buffer_miles: f64,
    nrhp_buffer_miles: f64,
}

impl CulturalService {
    pub fn new(
        tribal: Arc<dyn FeatureSource>,
        nrhp: Arc<dyn FeatureSource>,
        tribal_buffer_miles: f64,
        nrhp_buffer_miles: f64,
    ) -> Self {
        Self {
            tribal,
            nrhp,
            tribal_buffer_miles,
            nrhp_buffer_miles,
        }
    }

    /// Service backed by the live ArcGIS layers named in the config
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.upstream).context("Failed to create HTTP client")?;

        let tribal = ArcGisLayer::new("tribal", client.clone(), &config.tribal)
            .with_context(|| format!("Invalid tribal layer URL '{}'", config.tribal.url))?;
        let nrhp = ArcGisLayer::new("nrhp", client, &config.nrhp)
            .with_context(|| format!("Invalid NRHP layer URL '{}'", config.nrhp.url))?;

        Ok(Self::new(
            Arc::new(tribal),
            Arc::new(nrhp),
            config.tribal.buffer_miles,
            config.nrhp.buffer_miles,
        ))
    }

    /// Assess a coordinate.
    ///
    /// A failed lookup contributes "no data". If both fail there is nothing to
    /// classify and the degraded assessment is returned.
    pub async fn assess(&self, point: Coordinate) -> CulturalAssessment {
        let (tribal, nrhp) = tokio::join!(
            resolve_tribal_lands(self.tribal.as_ref(), &point, self.tribal_buffer_miles),
            resolve_nrhp(self.nrhp.as_ref(), &point, self.nrhp_buffer_miles)
        );

        if let (Err(tribal_err), Err(nrhp_err)) = (&tribal, &nrhp) {
            warn!(
                "All cultural resources lookups failed at {} ({}: {}; {}: {}), returning degraded assessment",
                point,
                self.tribal.name(),
                tribal_err,
                self.nrhp.name(),
                nrhp_err
            );
            return CulturalAssessment::degraded();
        }

        let tribal = tribal.unwrap_or_else(|e| {
            warn!(
                "Tribal land lookup via {} failed at {}: {}",
                self.tribal.name(),
                point,
                e
            );
            TribalLookup::default()
        });
        let nrhp = nrhp.unwrap_or_else(|e| {
            warn!("NRHP lookup via {} failed at {}: {}", self.nrhp.name(), point, e);
            NrhpLookup::default()
        });

        synthesize(&tribal, &nrhp)
    }

    /// Like `assess`, but on its own task so a panic yields the degraded
    /// assessment instead of tearing down the request.
    pub async fn assess_isolated(self: &Arc<Self>, point: Coordinate) -> CulturalAssessment {
        let service = Arc::clone(self);
        match tokio::spawn(async move { service.assess(point).await }).await {
            Ok(assessment) => assessment,
            Err(e) => {
                error!("Cultural assessment task failed at {}: {}", point, e);
                CulturalAssessment::degraded()
            }
        }
    }
}
