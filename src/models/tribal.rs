//! Tribal land types derived from BIA AIAN land area features.

use serde::{Deserialize, Serialize};

/// Kind of tribal land, derived from the land area name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TribalLandType {
    Pueblo,
    Reservation,
    #[serde(rename = "Navajo Nation")]
    NavajoNation,
    #[serde(rename = "Apache Reservation")]
    ApacheReservation,
    #[serde(rename = "Tribal Land")]
    TribalLand,
}

/// Checked in order; the first substring found in the lowercased name wins.
const TYPE_BY_SUBSTRING: &[(&str, TribalLandType)] = &[
    ("pueblo", TribalLandType::Pueblo),
    ("reservation", TribalLandType::Reservation),
    ("navajo", TribalLandType::NavajoNation),
    ("apache", TribalLandType::ApacheReservation),
];

impl TribalLandType {
    /// Classify a land area by name (case-insensitive substring match)
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        TYPE_BY_SUBSTRING
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, kind)| *kind)
            .unwrap_or(TribalLandType::TribalLand)
    }
}

impl std::fmt::Display for TribalLandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TribalLandType::Pueblo => write!(f, "Pueblo"),
            TribalLandType::Reservation => write!(f, "Reservation"),
            TribalLandType::NavajoNation => write!(f, "Navajo Nation"),
            TribalLandType::ApacheReservation => write!(f, "Apache Reservation"),
            TribalLandType::TribalLand => write!(f, "Tribal Land"),
        }
    }
}

/// A tribal land area near (or containing) the subject property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TribalLand {
    pub name: String,
    #[serde(rename = "type")]
    pub land_type: TribalLandType,
    /// Miles to the nearest boundary vertex; 0 when the property is inside
    pub distance: f64,
    pub land_area_name: String,
}
