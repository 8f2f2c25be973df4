//! Spatial work-area generation and road-network analysis engine
//!
//! Given an asset, intervention, or project geometry, the engine derives
//! the "work area" polygon representing its zone of physical influence,
//! links disjoint areas over the surrounding road network, classifies the
//! touched network (arterial/local), and suggests a street name.
//!
//! The engine is a library with no HTTP or persistence surface. It
//! consumes two external collaborators: a spatial feature source behind
//! the [`FeatureIndex`] trait and a taxonomy lookup behind
//! [`TaxonomyLookup`]. All computations are request-local and reentrant;
//! suspension happens only at feature-source call boundaries.

pub mod config;
pub mod error;
pub mod geometry;
pub mod index;
pub mod linker;
pub mod model;
pub mod prelude;
pub mod streets;
pub mod workarea;

pub use config::{EngineConfig, NetworkLayers};
pub use error::Error;
pub use index::{FeatureIndex, MemoryFeatureIndex};
pub use model::{
    AreaGeometry, AssetTypeInfo, CrossStreet, Feature, FeatureProps, IntersectionProps, LayerId,
    PropertyMap, RequestContext, RoadNetworkClass, RoadSectionProps, StreetAnalysis,
    StreetSummary, TaxonomyLookup, WorkArea,
};

pub use linker::{build_multi_polygon_work_area, link_multi_polygon};
pub use streets::{analyze_streets, classify, suggested_street_name};
pub use workarea::{build_work_area, build_work_areas, default_buffer};
