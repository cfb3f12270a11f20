//! Rio Grande Due Diligence - cultural resources assessment for New Mexico properties
//!
//! This library provides the classifier, its feature sources and the HTTP API
//! shared by the server and assess binaries.

pub mod api;
pub mod arcgis;
pub mod config;
pub mod cultural;
pub mod fixture;
pub mod geometry;
pub mod models;
pub mod source;

pub use cultural::CulturalService;
pub use models::{Coordinate, CulturalAssessment, RiskLevel};
