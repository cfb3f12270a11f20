//! Cultural resources risk classification.
//!
//! Resolves tribal land and NRHP context for a coordinate and derives the
//! risk tier, consultation requirement and recommended actions.

mod nrhp;
mod service;
mod synthesize;
mod tribal;

pub use nrhp::{resolve_nrhp, NrhpLookup, MAX_PROPERTIES};
pub use service::CulturalService;
pub use synthesize::{
    synthesize, NRHP_ARMS_CHECK_MILES, NRHP_MODERATE_MILES, TRIBAL_ADJACENT_MILES,
    TRIBAL_NOTICE_MILES,
};
pub use tribal::{resolve_tribal_lands, TribalLookup, LISTING_RADIUS_MILES};
