//! Tribal land containment and proximity.

use tracing::debug;

use crate::arcgis::Feature;
use crate::models::{Coordinate, TribalLand, TribalLandType};
use crate::source::{FeatureSource, SourceError};

/// Lands at or under this distance are listed in the report
pub const LISTING_RADIUS_MILES: f64 = 5.0;

const NAME_FIELDS: &[&str] = &["LARName", "LAR_NAME", "NAME", "Name"];
const LAND_AREA_NAME_FIELDS: &[&str] = &["LARName", "LAR_NAME", "LandAreaName"];
const UNKNOWN_NAME: &str = "Unknown Tribal Land";

/// Result of the tribal land lookup. `Default` is the "no data" answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TribalLookup {
    pub on_tribal_land: bool,
    pub nearest: Option<TribalLand>,
    /// Sorted ascending by distance
    pub within_5_miles: Vec<TribalLand>,
}

/// Find the tribal land containing `point` (if any) and the lands around it.
///
/// Both queries run concurrently; an error from either fails the lookup.
pub async fn resolve_tribal_lands(
    source: &dyn FeatureSource,
    point: &Coordinate,
    buffer_miles: f64,
) -> Result<TribalLookup, SourceError> {
    let (containing, nearby) = tokio::join!(
        source.contains_point(point),
        source.within(point, buffer_miles)
    );
    let containing = containing?;
    let nearby = nearby?;

    debug!(
        "Tribal lookup at {}: containing={}, {} lands within {} mi",
        point,
        containing.is_some(),
        nearby.len(),
        buffer_miles
    );

    // (is_containing, land)
    let mut lands: Vec<(bool, TribalLand)> = nearby
        .iter()
        .filter_map(|feature| {
            let is_containing = containing
                .as_ref()
                .is_some_and(|c| same_feature(c, feature));
            to_tribal_land(feature, point, is_containing).map(|land| (is_containing, land))
        })
        .collect();

    if let Some(c) = &containing {
        if !lands.iter().any(|(is_containing, _)| *is_containing) {
            if let Some(land) = to_tribal_land(c, point, true) {
                lands.push((true, land));
            }
        }
    }

    // Nearest first; the containing land wins ties at distance 0
    lands.sort_by(|(a_in, a), (b_in, b)| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| b_in.cmp(a_in))
    });

    let lands: Vec<TribalLand> = lands.into_iter().map(|(_, land)| land).collect();

    Ok(TribalLookup {
        on_tribal_land: containing.is_some(),
        nearest: lands.first().cloned(),
        within_5_miles: lands
            .into_iter()
            .filter(|land| land.distance <= LISTING_RADIUS_MILES)
            .collect(),
    })
}

/// Convert a land area feature. Non-containing features need a geometry.
fn to_tribal_land(feature: &Feature, point: &Coordinate, is_containing: bool) -> Option<TribalLand> {
    let distance = if is_containing {
        0.0
    } else {
        feature.geometry.as_ref()?.distance_from(point)?
    };

    let name = feature
        .attr_str(NAME_FIELDS)
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let land_area_name = feature
        .attr_str(LAND_AREA_NAME_FIELDS)
        .unwrap_or_else(|| name.clone());

    Some(TribalLand {
        land_type: TribalLandType::classify(&name),
        name,
        distance,
        land_area_name,
    })
}

/// Object IDs when both sides carry one, otherwise names
fn same_feature(a: &Feature, b: &Feature) -> bool {
    match (a.object_id(), b.object_id()) {
        (Some(x), Some(y)) => x == y,
        _ => a.attr_str(NAME_FIELDS) == b.attr_str(NAME_FIELDS),
    }
}
