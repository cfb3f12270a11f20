//! Core data models for the cultural resources assessment.

pub mod assessment;
pub mod coordinate;
pub mod historic;
pub mod tribal;

pub use assessment::{CulturalAssessment, RiskLevel};
pub use coordinate::{Coordinate, CoordinateError};
pub use historic::HistoricPlace;
pub use tribal::{TribalLand, TribalLandType};
