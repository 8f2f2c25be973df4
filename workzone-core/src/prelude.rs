// Re-export of the engine surface most callers need

pub use crate::config::{EngineConfig, NetworkLayers};
pub use crate::error::Error;
pub use crate::index::{FeatureIndex, MemoryFeatureIndex};
pub use crate::linker::build_multi_polygon_work_area;
pub use crate::streets::{analyze_streets, classify, suggested_street_name};
pub use crate::workarea::{build_work_area, build_work_areas, default_buffer};

// Core data-model types
pub use crate::model::{
    Feature, FeatureProps, LayerId, RequestContext, RoadNetworkClass, StreetAnalysis, WorkArea,
};

// Geometry kernel primitives
pub use crate::geometry::{
    boolean_intersects, buffer, decompose, multi_polygon_to_single_polygon,
    nearest_point_on_line, round_coordinates, shortest_segment_between, union_polygons,
};
