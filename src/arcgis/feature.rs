//! Feature set documents returned by the ArcGIS `query` operation (`f=json`).

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::geometry::FeatureGeometry;

/// A feature with its attribute table row and (optional) geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub attributes: Map<String, Value>,
    pub geometry: Option<FeatureGeometry>,
}

impl Feature {
    /// First non-empty attribute among `keys`, as text. Numbers are formatted.
    pub fn attr_str(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.attributes.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// First integer attribute among `keys`
    pub fn attr_i64(&self, keys: &[&str]) -> Option<i64> {
        keys.iter()
            .find_map(|key| self.attributes.get(*key).and_then(Value::as_i64))
    }

    /// Object ID, if the layer returned one
    pub fn object_id(&self) -> Option<i64> {
        self.attr_i64(&["OBJECTID", "ObjectID", "FID"])
    }
}

/// Top-level response body
#[derive(Debug, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<RawFeature>,
    /// ArcGIS reports failures in-band with HTTP 200
    pub error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    attributes: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_geometry")]
    geometry: Option<RawGeometry>,
}

/// Geometry kinds other than points and polygons (paths, multipoints, empty
/// objects) are treated as missing rather than failing the whole response
fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<RawGeometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| RawGeometry::deserialize(v).ok()))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGeometry {
    Point { x: f64, y: f64 },
    /// Vertices may carry z/m values after x, y
    Polygon { rings: Vec<Vec<Vec<f64>>> },
}

impl RawGeometry {
    fn into_geometry(self) -> Option<FeatureGeometry> {
        match self {
            RawGeometry::Point { x, y } if x.is_finite() && y.is_finite() => {
                Some(FeatureGeometry::Point(geo::Point::new(x, y)))
            }
            RawGeometry::Polygon { rings } => {
                let rings: Vec<Vec<[f64; 2]>> = rings
                    .iter()
                    .map(|ring| {
                        ring.iter()
                            .filter(|v| v.len() >= 2)
                            .map(|v| [v[0], v[1]])
                            .collect()
                    })
                    .collect();
                FeatureGeometry::from_rings(&rings)
            }
            RawGeometry::Point { .. } => None,
        }
    }
}

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        Self {
            attributes: raw.attributes,
            geometry: raw.geometry.and_then(RawGeometry::into_geometry),
        }
    }
}

impl FeatureSet {
    pub fn into_features(self) -> Vec<Feature> {
        self.features.into_iter().map(Feature::from).collect()
    }
}
