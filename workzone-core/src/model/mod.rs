//! Data model for work-area generation and road-network analysis
//!
//! Everything here is transient and request-local: features are fetched
//! from the external spatial source, transformed, and dropped when the
//! request completes.

pub mod context;
pub mod feature;
pub mod layers;
pub mod props;
pub mod streets;
pub mod work_area;

pub use context::RequestContext;
pub use feature::Feature;
pub use layers::{AssetTypeInfo, LayerId, TaxonomyLookup};
pub use props::{FeatureProps, IntersectionProps, PropertyMap, RoadSectionProps};
pub use streets::{CrossStreet, RoadNetworkClass, StreetAnalysis, StreetSummary};
pub use work_area::{AreaGeometry, WorkArea};
