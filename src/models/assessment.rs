//! The cultural resources assessment returned to the report renderer.

use serde::{Deserialize, Serialize};

use super::{HistoricPlace, TribalLand};

/// Overall cultural resources risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cultural resources section of a due diligence report.
///
/// Field names are part of the report contract and serialize in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalAssessment {
    pub on_tribal_land: bool,
    pub nearest_tribal_land: Option<TribalLand>,
    #[serde(rename = "tribalLandsWithin5Miles")]
    pub tribal_lands_within_5_miles: Vec<TribalLand>,
    pub tribal_consultation_required: bool,
    pub tribal_consultation_reason: String,

    pub in_historic_district: bool,
    pub historic_district_name: Option<String>,
    #[serde(rename = "nrhpPropertiesWithin1Mile")]
    pub nrhp_properties_within_1_mile: Vec<HistoricPlace>,
    #[serde(rename = "nearestNRHPProperty")]
    pub nearest_nrhp_property: Option<HistoricPlace>,

    pub risk_level: RiskLevel,
    pub section_106_required: bool,
    pub recommended_actions: Vec<String>,
}

impl CulturalAssessment {
    /// Conservative answer used when no cultural resources data could be
    /// obtained. Report generation must not block on this section.
    pub fn degraded() -> Self {
        Self {
            on_tribal_land: false,
            nearest_tribal_land: None,
            tribal_lands_within_5_miles: Vec::new(),
            tribal_consultation_required: false,
            tribal_consultation_reason:
                "Tribal land data unavailable - manual verification required".to_string(),
            in_historic_district: false,
            historic_district_name: None,
            nrhp_properties_within_1_mile: Vec::new(),
            nearest_nrhp_property: None,
            risk_level: RiskLevel::Moderate,
            section_106_required: true,
            recommended_actions: vec![
                "Cultural resources data unavailable - manually verify tribal land status and NRHP listings before purchase".to_string(),
                "Request an ARMS records check from the NM Historic Preservation Division".to_string(),
            ],
        }
    }
}
