//! Turns the two lookups into risk, consultation and recommendations.

use crate::models::{CulturalAssessment, RiskLevel};

use super::nrhp::NrhpLookup;
use super::tribal::TribalLookup;

/// Tribal land closer than this is "directly adjacent"
pub const TRIBAL_ADJACENT_MILES: f64 = 0.25;
/// Nearest tribal land closer than this is mentioned in the consultation reason
pub const TRIBAL_NOTICE_MILES: f64 = 5.0;
/// An NRHP listing closer than this raises risk to moderate
pub const NRHP_MODERATE_MILES: f64 = 0.1;
/// An NRHP listing closer than this warrants an ARMS records check
pub const NRHP_ARMS_CHECK_MILES: f64 = 0.25;

const NO_RESTRICTIONS: &str = "No cultural resource restrictions identified for this property";
const STANDARD_PRACTICES: &str =
    "Standard construction practices apply - stop work and notify SHPO if cultural materials are discovered";

/// Build the assessment. Every comparison is strict; the first matching rule wins.
pub fn synthesize(tribal: &TribalLookup, nrhp: &NrhpLookup) -> CulturalAssessment {
    let nearest_tribal = tribal.nearest.as_ref();
    let nearest_nrhp = nrhp.nearest();

    let tribal_adjacent = nearest_tribal.is_some_and(|l| l.distance < TRIBAL_ADJACENT_MILES);
    let nrhp_distance = nearest_nrhp.map(|p| p.distance);

    let (consultation_required, consultation_reason) = match nearest_tribal {
        Some(land) if tribal.on_tribal_land => (
            true,
            format!(
                "Property is located on {} land - formal tribal consultation required",
                land.name
            ),
        ),
        Some(land) if land.distance < TRIBAL_ADJACENT_MILES => (
            true,
            format!(
                "Property is directly adjacent to {} ({:.2} mi) - consultation recommended",
                land.name, land.distance
            ),
        ),
        Some(land) if land.distance < TRIBAL_NOTICE_MILES => (
            false,
            format!(
                "Nearest tribal land: {} ({:.2} mi away) - consultation only required for federal undertakings",
                land.name, land.distance
            ),
        ),
        _ => (
            false,
            "No tribal consultation anticipated for private development".to_string(),
        ),
    };

    let risk_level = if tribal.on_tribal_land || nrhp.in_district {
        RiskLevel::High
    } else if nrhp_distance.is_some_and(|d| d < NRHP_MODERATE_MILES) {
        RiskLevel::Moderate
    } else if tribal_adjacent {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    // Proximity alone never triggers Section 106; it needs a federal nexus
    let section_106_required = tribal.on_tribal_land || nrhp.in_district;

    let tribe_name = nearest_tribal
        .map(|l| l.name.as_str())
        .unwrap_or("the tribe");

    let mut actions = Vec::new();

    if tribal.on_tribal_land {
        actions.push(format!(
            "Formal consultation with {} required before any ground-disturbing activity",
            tribe_name
        ));
        actions.push("Phase I Archaeological Survey required before development".to_string());
    } else if consultation_required {
        actions.push(format!(
            "Consider contacting {} THPO if project involves federal permits or funding",
            tribe_name
        ));
    }

    if nrhp.in_district {
        let district = nrhp
            .district_name
            .as_deref()
            .unwrap_or("the historic district");
        actions.push(format!(
            "SHPO review required for exterior alterations or new construction within {}",
            district
        ));
        actions.push("Phase I Archaeological Survey likely required".to_string());
    }

    if nrhp_distance.is_some_and(|d| d < NRHP_ARMS_CHECK_MILES) {
        actions.push("Consider ARMS records check due to nearby historic property".to_string());
    }

    if actions.is_empty() {
        actions.push(NO_RESTRICTIONS.to_string());
        actions.push(STANDARD_PRACTICES.to_string());
    }

    CulturalAssessment {
        on_tribal_land: tribal.on_tribal_land,
        nearest_tribal_land: tribal.nearest.clone(),
        tribal_lands_within_5_miles: tribal.within_5_miles.clone(),
        tribal_consultation_required: consultation_required,
        tribal_consultation_reason: consultation_reason,
        in_historic_district: nrhp.in_district,
        historic_district_name: nrhp.district_name.clone(),
        nrhp_properties_within_1_mile: nrhp.properties.clone(),
        nearest_nrhp_property: nearest_nrhp.cloned(),
        risk_level,
        section_106_required,
        recommended_actions: actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HistoricPlace, TribalLand, TribalLandType};

    fn land(name: &str, distance: f64) -> TribalLand {
        TribalLand {
            name: name.to_string(),
            land_type: TribalLandType::classify(name),
            distance,
            land_area_name: name.to_string(),
        }
    }

    fn tribal_near(distance: f64) -> TribalLookup {
        let nearest = land("Pueblo of Isleta", distance);
        TribalLookup {
            on_tribal_land: false,
            within_5_miles: if distance <= 5.0 {
                vec![nearest.clone()]
            } else {
                vec![]
            },
            nearest: Some(nearest),
        }
    }

    fn place(name: &str, distance: f64) -> HistoricPlace {
        HistoricPlace {
            name: name.to_string(),
            ref_number: "00000000".to_string(),
            address: String::new(),
            city: "Albuquerque".to_string(),
            date_added: "1980-01-01".to_string(),
            resource_type: "Building".to_string(),
            distance,
        }
    }

    fn nrhp_near(distance: f64) -> NrhpLookup {
        NrhpLookup {
            properties: vec![place("Kimo Theater", distance)],
            in_district: false,
            district_name: None,
        }
    }

    #[test]
    fn test_no_data_is_low_risk() {
        let a = synthesize(&TribalLookup::default(), &NrhpLookup::default());

        assert_eq!(a.risk_level, RiskLevel::Low);
        assert!(!a.section_106_required);
        assert!(!a.tribal_consultation_required);
        assert_eq!(
            a.tribal_consultation_reason,
            "No tribal consultation anticipated for private development"
        );
        assert_eq!(a.recommended_actions, vec![NO_RESTRICTIONS, STANDARD_PRACTICES]);
    }

    #[test]
    fn test_on_tribal_land() {
        let tribal = TribalLookup {
            on_tribal_land: true,
            nearest: Some(land("Pueblo of Isleta", 0.0)),
            within_5_miles: vec![land("Pueblo of Isleta", 0.0)],
        };
        let a = synthesize(&tribal, &NrhpLookup::default());

        assert_eq!(a.risk_level, RiskLevel::High);
        assert!(a.section_106_required);
        assert!(a.tribal_consultation_required);
        assert_eq!(
            a.tribal_consultation_reason,
            "Property is located on Pueblo of Isleta land - formal tribal consultation required"
        );
        assert_eq!(a.recommended_actions.len(), 2);
        assert!(a.recommended_actions[0].contains("Pueblo of Isleta"));
        assert_eq!(
            a.recommended_actions[1],
            "Phase I Archaeological Survey required before development"
        );
    }

    #[test]
    fn test_adjacent_tribal_land() {
        let a = synthesize(&tribal_near(0.2), &NrhpLookup::default());

        assert_eq!(a.risk_level, RiskLevel::Moderate);
        assert!(!a.section_106_required);
        assert!(a.tribal_consultation_required);
        assert_eq!(
            a.tribal_consultation_reason,
            "Property is directly adjacent to Pueblo of Isleta (0.20 mi) - consultation recommended"
        );
        assert_eq!(
            a.recommended_actions,
            vec!["Consider contacting Pueblo of Isleta THPO if project involves federal permits or funding"]
        );
    }

    #[test]
    fn test_tribal_boundary_is_strict() {
        let a = synthesize(&tribal_near(0.25), &NrhpLookup::default());

        assert!(!a.tribal_consultation_required);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert!(a
            .tribal_consultation_reason
            .starts_with("Nearest tribal land: Pueblo of Isleta (0.25 mi away)"));
        assert_eq!(a.recommended_actions, vec![NO_RESTRICTIONS, STANDARD_PRACTICES]);
    }

    #[test]
    fn test_distant_tribal_land() {
        let a = synthesize(&tribal_near(5.0), &NrhpLookup::default());
        assert!(!a.tribal_consultation_required);
        assert_eq!(
            a.tribal_consultation_reason,
            "No tribal consultation anticipated for private development"
        );
    }

    #[test]
    fn test_nrhp_moderate_boundary() {
        let near = synthesize(&TribalLookup::default(), &nrhp_near(0.099));
        assert_eq!(near.risk_level, RiskLevel::Moderate);

        let far = synthesize(&TribalLookup::default(), &nrhp_near(0.101));
        assert_eq!(far.risk_level, RiskLevel::Low);

        let exact = synthesize(&TribalLookup::default(), &nrhp_near(0.1));
        assert_eq!(exact.risk_level, RiskLevel::Low);

        // both still get the records check
        for a in [&near, &far] {
            assert!(!a.section_106_required);
            assert_eq!(
                a.recommended_actions,
                vec!["Consider ARMS records check due to nearby historic property"]
            );
        }
    }

    #[test]
    fn test_historic_district() {
        let nrhp = NrhpLookup {
            properties: vec![place("Old Town", 0.3)],
            in_district: true,
            district_name: Some("Old Town Historic District".to_string()),
        };
        let a = synthesize(&TribalLookup::default(), &nrhp);

        assert!(a.in_historic_district);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert!(a.section_106_required);
        assert!(a.recommended_actions[0].contains("Old Town Historic District"));
        assert_eq!(
            a.recommended_actions[1],
            "Phase I Archaeological Survey likely required"
        );
        assert_eq!(a.nearest_nrhp_property.unwrap().name, "Old Town");
    }

    #[test]
    fn test_actions_accumulate() {
        let nrhp = NrhpLookup {
            properties: vec![place("Old Town", 0.05)],
            in_district: true,
            district_name: Some("Old Town Historic District".to_string()),
        };
        let a = synthesize(&tribal_near(0.1), &nrhp);

        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.recommended_actions.len(), 4);
        assert!(a.recommended_actions[0].contains("THPO"));
        assert!(a.recommended_actions[3].contains("ARMS"));
    }
}
