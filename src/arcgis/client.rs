//! HTTP client for a single ArcGIS feature layer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{Feature, FeatureSet, SpatialQuery};
use crate::config::{LayerConfig, UpstreamConfig};
use crate::models::Coordinate;
use crate::source::{FeatureSource, SourceError};

/// Longest body excerpt carried in a `NotJson` error
const SNIPPET_LEN: usize = 120;

/// Build the shared HTTP client. Every upstream call is bounded by the timeout.
pub fn build_http_client(upstream: &UpstreamConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&upstream.user_agent)
        .timeout(Duration::from_secs(upstream.timeout_secs))
        .build()
}

/// A feature layer queried over HTTP
#[derive(Clone)]
pub struct ArcGisLayer {
    name: String,
    client: Client,
    query_url: Url,
    out_fields: String,
}

impl ArcGisLayer {
    pub fn new(name: &str, client: Client, config: &LayerConfig) -> Result<Self, url::ParseError> {
        let query_url = Url::parse(&format!("{}/query", config.url.trim_end_matches('/')))?;

        Ok(Self {
            name: name.to_string(),
            client,
            query_url,
            out_fields: config.out_fields.join(","),
        })
    }

    /// Full request URL for a query
    pub fn request_url(&self, query: &SpatialQuery) -> Url {
        let mut url = self.query_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.to_params() {
                pairs.append_pair(key, &value);
            }
            pairs.append_pair("outFields", &self.out_fields);
        }
        url
    }

    /// Run a query and return its features
    pub async fn query(&self, query: &SpatialQuery) -> Result<Vec<Feature>, SourceError> {
        let url = self.request_url(query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                layer: self.name.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                layer: self.name.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| SourceError::Http {
            layer: self.name.clone(),
            source,
        })?;

        let features = parse_feature_set(&self.name, &body)?;

        debug!(
            "{} {:?} query at {} returned {} features",
            self.name,
            query.relation,
            query.point,
            features.len()
        );

        Ok(features)
    }
}

/// Parse a response body, turning HTML error pages and in-band errors into `SourceError`
pub fn parse_feature_set(layer: &str, body: &str) -> Result<Vec<Feature>, SourceError> {
    let set: FeatureSet = serde_json::from_str(body).map_err(|_| SourceError::NotJson {
        layer: layer.to_string(),
        snippet: body.trim().chars().take(SNIPPET_LEN).collect(),
    })?;

    if let Some(error) = set.error {
        return Err(SourceError::Service {
            layer: layer.to_string(),
            code: error.code,
            message: error.message,
        });
    }

    Ok(set.into_features())
}

#[async_trait]
impl FeatureSource for ArcGisLayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn contains_point(&self, point: &Coordinate) -> Result<Option<Feature>, SourceError> {
        let features = self.query(&SpatialQuery::contains(*point)).await?;
        Ok(features.into_iter().next())
    }

    async fn within(
        &self,
        point: &Coordinate,
        radius_miles: f64,
    ) -> Result<Vec<Feature>, SourceError> {
        self.query(&SpatialQuery::buffer(*point, radius_miles)).await
    }
}
