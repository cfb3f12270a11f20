//! ArcGIS REST feature layer client.

mod client;
mod feature;
mod query;

pub use client::{build_http_client, ArcGisLayer};
pub use feature::{Feature, FeatureSet};
pub use query::{SpatialQuery, SpatialRelation};
