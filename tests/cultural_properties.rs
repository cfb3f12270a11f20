//! Classifier behaviour against fixture feature sets.

use std::path::PathBuf;
use std::sync::Arc;

use riogrande::cultural::MAX_PROPERTIES;
use riogrande::fixture::FixtureSource;
use riogrande::geometry::EARTH_RADIUS_MILES;
use riogrande::{Coordinate, CulturalAssessment, CulturalService, RiskLevel};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_service() -> CulturalService {
    let tribal = FixtureSource::load("tribal", fixture_path("tribal_lands.json")).unwrap();
    let nrhp = FixtureSource::load("nrhp", fixture_path("nrhp.json")).unwrap();
    CulturalService::new(Arc::new(tribal), Arc::new(nrhp), 50.0, 1.0)
}

fn service_with(tribal_json: &str, nrhp_json: &str) -> CulturalService {
    let tribal = FixtureSource::from_json("tribal", tribal_json).unwrap();
    let nrhp = FixtureSource::from_json("nrhp", nrhp_json).unwrap();
    CulturalService::new(Arc::new(tribal), Arc::new(nrhp), 50.0, 1.0)
}

const EMPTY: &str = r#"{"features": []}"#;

/// Degrees of latitude spanning `miles` along a meridian
fn lat_offset(miles: f64) -> f64 {
    (miles / EARTH_RADIUS_MILES).to_degrees()
}

fn point_features(points: &[(String, f64, f64)]) -> String {
    let features: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, (name, lng, lat))| {
            format!(
                r#"{{"attributes": {{"OBJECTID": {}, "RESNAME": "{}", "ResType": "Building"}}, "geometry": {{"x": {}, "y": {}}}}}"#,
                i + 1,
                name,
                lng,
                lat
            )
        })
        .collect();
    format!(r#"{{"features": [{}]}}"#, features.join(","))
}

/// A 0.1 degree square whose south-west vertex is `miles` due north of the point
fn tribal_square_north_of(point: &Coordinate, miles: f64) -> String {
    let lng = point.lng();
    let lat = point.lat() + lat_offset(miles);
    format!(
        r#"{{"features": [{{"attributes": {{"OBJECTID": 1, "LARName": "Pueblo of Santa Ana"}},
            "geometry": {{"rings": [[[{lng}, {lat}], [{lng}, {top}], [{right}, {top}], [{right}, {lat}], [{lng}, {lat}]]]}}}}]}}"#,
        lng = lng,
        lat = lat,
        top = lat + 0.1,
        right = lng + 0.1
    )
}

fn assert_sorted(assessment: &CulturalAssessment) {
    assert!(assessment
        .tribal_lands_within_5_miles
        .windows(2)
        .all(|w| w[0].distance <= w[1].distance));
    assert!(assessment
        .nrhp_properties_within_1_mile
        .windows(2)
        .all(|w| w[0].distance <= w[1].distance));
}

#[tokio::test]
async fn test_points_on_tribal_land_are_high_risk() {
    let service = fixture_service();

    for (lat, lng) in [(34.90, -106.68), (34.86, -106.74), (34.94, -106.61)] {
        let a = service.assess(Coordinate::new(lat, lng).unwrap()).await;

        assert!(a.on_tribal_land, "({}, {})", lat, lng);
        let nearest = a.nearest_tribal_land.as_ref().unwrap();
        assert_eq!(nearest.name, "Pueblo of Isleta");
        assert_eq!(nearest.distance, 0.0);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert!(a.section_106_required);
        assert!(a.tribal_consultation_required);
        assert_eq!(a.tribal_lands_within_5_miles[0].name, "Pueblo of Isleta");
        assert_sorted(&a);
    }
}

#[tokio::test]
async fn test_point_in_historic_district_is_high_risk() {
    let service = fixture_service();
    let a = service.assess(Coordinate::new(35.096, -106.670).unwrap()).await;

    assert!(a.in_historic_district);
    assert_eq!(
        a.historic_district_name.as_deref(),
        Some("Old Town Historic District")
    );
    assert_eq!(a.risk_level, RiskLevel::High);
    assert!(a.section_106_required);
    assert!(!a.on_tribal_land);

    // the church is a few hundred feet away
    let nearest = a.nearest_nrhp_property.as_ref().unwrap();
    assert_eq!(nearest.name, "San Felipe de Neri Church");
    assert_eq!(nearest.date_added, "1969-10-03");
    assert!(a
        .recommended_actions
        .iter()
        .any(|r| r.contains("Old Town Historic District")));
    assert!(a.recommended_actions.iter().any(|r| r.contains("ARMS")));
}

#[tokio::test]
async fn test_nrhp_listings_sorted_nearest_first() {
    let service = fixture_service();
    let a = service.assess(Coordinate::new(35.09, -106.66).unwrap()).await;

    let names: Vec<&str> = a
        .nrhp_properties_within_1_mile
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Old Town Historic District",
            "Kimo Theater",
            "San Felipe de Neri Church"
        ]
    );
    assert!(!a.in_historic_district);
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert_sorted(&a);
}

#[tokio::test]
async fn test_far_from_everything_is_low_risk() {
    let service = fixture_service();
    let a = service.assess(Coordinate::new(32.5, -104.0).unwrap()).await;

    assert!(!a.on_tribal_land);
    assert!(a
        .nearest_tribal_land
        .as_ref()
        .map_or(true, |l| l.distance > 5.0));
    assert!(a.tribal_lands_within_5_miles.is_empty());
    assert!(a.nrhp_properties_within_1_mile.is_empty());
    assert!(a.nearest_nrhp_property.is_none());
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert!(!a.section_106_required);
    assert_eq!(a.recommended_actions.len(), 2);
    assert!(a.recommended_actions[0].starts_with("No cultural resource restrictions identified"));
    assert!(a.recommended_actions[1].starts_with("Standard construction practices apply"));
}

#[tokio::test]
async fn test_nrhp_moderate_threshold() {
    let origin = Coordinate::new(35.0, -106.5).unwrap();

    let near = point_features(&[(
        "Near".to_string(),
        origin.lng(),
        origin.lat() + lat_offset(0.099),
    )]);
    let a = service_with(EMPTY, &near).assess(origin).await;
    assert_eq!(a.risk_level, RiskLevel::Moderate);
    assert!(!a.section_106_required);

    let far = point_features(&[(
        "Far".to_string(),
        origin.lng(),
        origin.lat() + lat_offset(0.101),
    )]);
    let a = service_with(EMPTY, &far).assess(origin).await;
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert!(a.recommended_actions.iter().any(|r| r.contains("ARMS")));
}

#[tokio::test]
async fn test_tribal_adjacency_threshold() {
    let origin = Coordinate::new(35.5, -106.6).unwrap();

    let a = service_with(&tribal_square_north_of(&origin, 0.24), EMPTY)
        .assess(origin)
        .await;
    assert!(!a.on_tribal_land);
    assert!(a.tribal_consultation_required);
    assert_eq!(a.risk_level, RiskLevel::Moderate);
    assert!(!a.section_106_required);
    assert!(a.recommended_actions[0].contains("Pueblo of Santa Ana THPO"));

    let a = service_with(&tribal_square_north_of(&origin, 0.26), EMPTY)
        .assess(origin)
        .await;
    assert!(!a.tribal_consultation_required);
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert!(a
        .tribal_consultation_reason
        .starts_with("Nearest tribal land: Pueblo of Santa Ana"));
    assert_eq!(a.tribal_lands_within_5_miles.len(), 1);
}

#[tokio::test]
async fn test_nrhp_listings_capped() {
    let origin = Coordinate::new(35.0, -106.5).unwrap();
    // 50 listings spaced ~0.02 mi apart heading north, in reverse order
    let points: Vec<(String, f64, f64)> = (0..50)
        .rev()
        .map(|i| {
            (
                format!("Listing {}", i),
                origin.lng(),
                origin.lat() + lat_offset(0.02 * i as f64),
            )
        })
        .collect();

    let a = service_with(EMPTY, &point_features(&points)).assess(origin).await;

    assert_eq!(a.nrhp_properties_within_1_mile.len(), MAX_PROPERTIES);
    assert_eq!(a.nrhp_properties_within_1_mile[0].name, "Listing 0");
    assert_eq!(a.nearest_nrhp_property.as_ref().unwrap().name, "Listing 0");
    assert_sorted(&a);
}

#[tokio::test]
async fn test_assessment_is_idempotent() {
    let service = fixture_service();
    let point = Coordinate::new(35.096, -106.670).unwrap();

    let first = service.assess(point).await;
    let second = service.assess(point).await;

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
