//! Distance helpers and feature geometry.
//!
//! All coordinates are `[x, y] = [lng, lat]` in WGS84, the order ArcGIS
//! returns with `outSR=4326` and the order `geo` expects.

use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon, Winding};

use crate::models::Coordinate;

/// Earth radius used for every proximity calculation
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance in miles (haversine formula)
pub fn haversine_distance_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Distance from a coordinate to a `geo` point (x = lng, y = lat)
pub fn distance_to_point(from: &Coordinate, to: &Point<f64>) -> f64 {
    haversine_distance_miles(from.lat(), from.lng(), to.y(), to.x())
}

/// Minimum distance from `point` to any vertex of any ring.
///
/// This approximates point-to-polygon distance; edges are not considered.
/// Returns `None` if the rings have no vertices.
pub fn nearest_vertex_distance(point: &Coordinate, rings: &[LineString<f64>]) -> Option<f64> {
    rings
        .iter()
        .flat_map(|ring| ring.coords())
        .map(|c| haversine_distance_miles(point.lat(), point.lng(), c.y, c.x))
        .min_by(|a, b| a.total_cmp(b))
}

/// Geometry of a returned feature
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point(Point<f64>),
    Polygon(Vec<LineString<f64>>),
}

impl FeatureGeometry {
    /// Build a polygon geometry from raw `[lng, lat]` rings
    pub fn from_rings(rings: &[Vec<[f64; 2]>]) -> Option<Self> {
        let rings: Vec<LineString<f64>> = rings
            .iter()
            .filter(|ring| !ring.is_empty())
            .map(|ring| {
                LineString::new(ring.iter().map(|[x, y]| Coord { x: *x, y: *y }).collect())
            })
            .collect();

        if rings.is_empty() {
            None
        } else {
            Some(FeatureGeometry::Polygon(rings))
        }
    }

    /// Miles from `point` to this geometry (vertex approximation for polygons)
    pub fn distance_from(&self, point: &Coordinate) -> Option<f64> {
        match self {
            FeatureGeometry::Point(p) => Some(distance_to_point(point, p)),
            FeatureGeometry::Polygon(rings) => nearest_vertex_distance(point, rings),
        }
    }

    /// Exact point-in-polygon test. Points never contain anything.
    pub fn contains(&self, point: &Coordinate) -> bool {
        match self {
            FeatureGeometry::Point(_) => false,
            FeatureGeometry::Polygon(rings) => to_multi_polygon(rings).contains(&point.to_point()),
        }
    }

    /// Bounding box as (min_x, min_y, max_x, max_y)
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        use geo::BoundingRect;
        match self {
            FeatureGeometry::Point(p) => Some((p.x(), p.y(), p.x(), p.y())),
            FeatureGeometry::Polygon(rings) => to_multi_polygon(rings)
                .bounding_rect()
                .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y)),
        }
    }
}

/// Assemble ArcGIS rings into polygons.
///
/// ArcGIS writes exterior rings clockwise and holes counter-clockwise. Each
/// hole is attached to the first exterior that contains its first vertex.
pub fn to_multi_polygon(rings: &[LineString<f64>]) -> MultiPolygon<f64> {
    let mut exteriors: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in rings {
        let mut ring = ring.clone();
        ring.close();
        if ring.0.len() < 4 {
            continue;
        }
        if ring.is_ccw() && !exteriors.is_empty() {
            holes.push(ring);
        } else {
            exteriors.push((ring, Vec::new()));
        }
    }

    for hole in holes {
        let Some(first) = hole.0.first().copied() else {
            continue;
        };
        if let Some((_, interiors)) = exteriors
            .iter_mut()
            .find(|(ext, _)| Polygon::new(ext.clone(), vec![]).contains(&first))
        {
            interiors.push(hole);
        }
    }

    MultiPolygon::new(
        exteriors
            .into_iter()
            .map(|(ext, interiors)| Polygon::new(ext, interiors))
            .collect(),
    )
}
