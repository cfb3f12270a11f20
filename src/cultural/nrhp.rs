//! National Register listings around a property.

use tracing::debug;

use crate::arcgis::Feature;
use crate::models::historic::is_district_type;
use crate::models::{Coordinate, HistoricPlace};
use crate::source::{FeatureSource, SourceError};

/// Most listings carried into the report
pub const MAX_PROPERTIES: usize = 10;

/// Assumed distance for listings with missing or unusable geometry
const MISSING_GEOMETRY_DISTANCE: f64 = 1.0;

const NAME_FIELDS: &[&str] = &["RESNAME", "ResourceName", "RESOURCE_NAME", "NAME"];
const REF_FIELDS: &[&str] = &["NRIS_Refnum", "REFNUM", "RefNumber", "NR_REFNUM"];
const ADDRESS_FIELDS: &[&str] = &["Address", "ADDRESS"];
const CITY_FIELDS: &[&str] = &["City", "CITY"];
const DATE_FIELDS: &[&str] = &["CertDate", "DateListed", "LISTED_DATE", "DATE_ADDED"];
const TYPE_FIELDS: &[&str] = &["ResType", "ResourceType", "RESTYPE", "RESOURCE_TYPE"];

/// Result of the NRHP lookup. `Default` is the "no data" answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NrhpLookup {
    /// Nearest first, at most `MAX_PROPERTIES`
    pub properties: Vec<HistoricPlace>,
    pub in_district: bool,
    pub district_name: Option<String>,
}

impl NrhpLookup {
    pub fn nearest(&self) -> Option<&HistoricPlace> {
        self.properties.first()
    }
}

/// Find the historic district containing `point` (if any) and nearby listings.
///
/// Both queries run concurrently; an error from either fails the lookup.
pub async fn resolve_nrhp(
    source: &dyn FeatureSource,
    point: &Coordinate,
    buffer_miles: f64,
) -> Result<NrhpLookup, SourceError> {
    let (containing, nearby) = tokio::join!(
        source.contains_point(point),
        source.within(point, buffer_miles)
    );
    let containing = containing?;
    let nearby = nearby?;

    let district_name = containing
        .as_ref()
        .filter(|f| is_district_type(&f.attr_str(TYPE_FIELDS).unwrap_or_default()))
        .map(|f| f.attr_str(NAME_FIELDS).unwrap_or_default());

    debug!(
        "NRHP lookup at {}: district={:?}, {} listings within {} mi",
        point,
        district_name,
        nearby.len(),
        buffer_miles
    );

    let mut properties: Vec<HistoricPlace> = nearby
        .iter()
        .map(|feature| to_historic_place(feature, point))
        .collect();

    properties.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    properties.truncate(MAX_PROPERTIES);

    Ok(NrhpLookup {
        properties,
        in_district: district_name.is_some(),
        district_name,
    })
}

fn to_historic_place(feature: &Feature, point: &Coordinate) -> HistoricPlace {
    let distance = feature
        .geometry
        .as_ref()
        .and_then(|g| g.distance_from(point))
        .unwrap_or(MISSING_GEOMETRY_DISTANCE);

    HistoricPlace {
        name: feature.attr_str(NAME_FIELDS).unwrap_or_default(),
        ref_number: feature.attr_str(REF_FIELDS).unwrap_or_default(),
        address: feature.attr_str(ADDRESS_FIELDS).unwrap_or_default(),
        city: feature.attr_str(CITY_FIELDS).unwrap_or_default(),
        date_added: date_added(feature),
        resource_type: feature.attr_str(TYPE_FIELDS).unwrap_or_default(),
        distance,
    }
}

/// Listing date as `YYYY-MM-DD`; ArcGIS date fields arrive as epoch milliseconds
fn date_added(feature: &Feature) -> String {
    if let Some(millis) = feature.attr_i64(DATE_FIELDS) {
        if let Some(date) = chrono::DateTime::from_timestamp_millis(millis) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    feature.attr_str(DATE_FIELDS).unwrap_or_default()
}
