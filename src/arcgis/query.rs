//! Spatial query parameters for the ArcGIS `query` operation.

use crate::models::Coordinate;

/// Spatial relationship between the query point and the layer's features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialRelation {
    /// Query point lies within the feature (point-in-polygon)
    Within,
    /// Feature intersects the (buffered) query point
    Intersects,
}

impl SpatialRelation {
    pub fn as_esri(&self) -> &'static str {
        match self {
            SpatialRelation::Within => "esriSpatialRelWithin",
            SpatialRelation::Intersects => "esriSpatialRelIntersects",
        }
    }
}

/// A point query, optionally buffered by a distance in statute miles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialQuery {
    pub point: Coordinate,
    pub relation: SpatialRelation,
    pub buffer_miles: Option<f64>,
}

impl SpatialQuery {
    pub fn contains(point: Coordinate) -> Self {
        Self {
            point,
            relation: SpatialRelation::Within,
            buffer_miles: None,
        }
    }

    pub fn buffer(point: Coordinate, radius_miles: f64) -> Self {
        Self {
            point,
            relation: SpatialRelation::Intersects,
            buffer_miles: Some(radius_miles),
        }
    }

    /// Query string pairs, excluding `outFields`
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("f", "json".to_string()),
            (
                "geometry",
                format!("{},{}", self.point.lng(), self.point.lat()),
            ),
            ("geometryType", "esriGeometryPoint".to_string()),
            ("inSR", "4326".to_string()),
            ("outSR", "4326".to_string()),
            ("spatialRel", self.relation.as_esri().to_string()),
            ("returnGeometry", "true".to_string()),
        ];

        if let Some(miles) = self.buffer_miles {
            params.push(("distance", miles.to_string()));
            params.push(("units", "esriSRUnit_StatuteMile".to_string()));
        }

        params
    }
}
