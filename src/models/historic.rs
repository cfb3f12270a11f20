//! National Register of Historic Places listings.

use serde::{Deserialize, Serialize};

/// An NRHP-listed property or district near the subject property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricPlace {
    pub name: String,
    pub ref_number: String,
    pub address: String,
    pub city: String,
    pub date_added: String,
    /// Free-form resource type ("building", "district", ...)
    pub resource_type: String,
    /// Miles from the subject property
    pub distance: f64,
}

/// Resource types are free text upstream; anything mentioning "district" counts
pub fn is_district_type(resource_type: &str) -> bool {
    resource_type.to_lowercase().contains("district")
}
