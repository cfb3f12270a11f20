//! Spatial index for fixture features.

use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

use crate::arcgis::Feature;
use crate::geometry::EARTH_RADIUS_MILES;
use crate::models::Coordinate;

/// Wrapper for R-tree indexing of features
struct IndexedFeature {
    feature: Feature,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedFeature {
    fn new(feature: Feature) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = feature.geometry.as_ref()?.bbox()?;
        Some(Self {
            feature,
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// R-tree over feature envelopes. Features without geometry are dropped.
pub struct FeatureIndex {
    tree: RTree<IndexedFeature>,
}

impl FeatureIndex {
    pub fn build(features: Vec<Feature>) -> Self {
        let total = features.len();
        let indexed: Vec<IndexedFeature> = features
            .into_iter()
            .filter_map(IndexedFeature::new)
            .collect();

        if indexed.len() < total {
            debug!(
                "Dropped {} fixture features without usable geometry",
                total - indexed.len()
            );
        }

        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Features whose polygon contains the point, in index order
    pub fn containing(&self, point: &Coordinate) -> Vec<&Feature> {
        let query_envelope = AABB::from_point([point.lng(), point.lat()]);

        // Envelope candidates first, then exact containment
        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|f| &f.feature)
            .filter(|f| f.geometry.as_ref().is_some_and(|g| g.contains(point)))
            .collect()
    }

    /// Features containing the point or with a vertex within `radius_miles`
    pub fn within(&self, point: &Coordinate, radius_miles: f64) -> Vec<&Feature> {
        let query_envelope = buffer_envelope(point, radius_miles);

        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|f| &f.feature)
            .filter(|f| {
                f.geometry.as_ref().is_some_and(|g| {
                    g.contains(point)
                        || g.distance_from(point).is_some_and(|d| d <= radius_miles)
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Degree envelope enclosing a circle of `radius_miles` around the point
fn buffer_envelope(point: &Coordinate, radius_miles: f64) -> AABB<[f64; 2]> {
    let d_lat = (radius_miles / EARTH_RADIUS_MILES).to_degrees();
    // Widen toward the poles; clamp so the envelope stays finite
    let cos_lat = point.lat().to_radians().cos().max(0.01);
    let d_lng = (d_lat / cos_lat).min(360.0);

    AABB::from_corners(
        [point.lng() - d_lng, point.lat() - d_lat],
        [point.lng() + d_lng, point.lat() + d_lat],
    )
}
