//! Engine configuration and layer wiring.

use crate::model::LayerId;

/// Default metric buffer applied when no nearby network feature can anchor
/// a work area.
pub const DEFAULT_FALLBACK_BUFFER_M: f64 = 5.0;
/// Buffer used to turn linear/point features into areas.
pub const DEFAULT_ASSET_BUFFER_M: f64 = 1.0;
/// Buffer around an intersection feature when gathering its neighbours.
pub const DEFAULT_INTERSECTED_BUFFER_M: f64 = 1.0;
/// Search tolerance for the pavement/intersection nearby query.
pub const DEFAULT_NEARBY_TOLERANCE_M: f64 = 10.0;
/// Upper bound for the nearest-feature search from a point source.
pub const DEFAULT_MAX_NEAREST_DISTANCE_M: f64 = 10.0;
/// Padding applied to every input polygon on the single union retry.
pub const DEFAULT_EPSILON_BUFFER_M: f64 = 0.25;
/// Coordinate precision (decimal digits) shared by the path graph and the
/// snap points so vertices match by exact equality.
pub const DEFAULT_PATH_PRECISION_DIGITS: u32 = 5;
/// Expansion of the component bounding box before querying road sections.
pub const DEFAULT_BBOX_EXPANSION_M: f64 = 200.0;
/// Radius of the hairline buffers bridging unreachable components.
pub const DEFAULT_LINK_BUFFER_M: f64 = 0.05;
/// Minimum overlap ratio for a road section to count as inside an area.
pub const DEFAULT_ALMOST_IN_AREA_RATIO: f64 = 0.8;
/// H3 resolution of the interior point grid (≈4 m cells).
pub const DEFAULT_GRID_RESOLUTION: u8 = 13;

/// Named layers of the external spatial feature source.
///
/// Layer identifiers are opaque `"<namespace>:<layer-name>"` strings; the
/// defaults match the reference deployment and are overridable per caller.
#[derive(Debug, Clone)]
pub struct NetworkLayers {
    pub pavement: LayerId,
    pub intersections: LayerId,
    pub road_sections: LayerId,
    pub arterial: LayerId,
}

impl Default for NetworkLayers {
    fn default() -> Self {
        Self {
            pavement: LayerId::new("roads:pavement-sections"),
            intersections: LayerId::new("roads:intersections"),
            road_sections: LayerId::new("roads:road-sections"),
            arterial: LayerId::new("roads:arterial-network"),
        }
    }
}

/// Tunables of the work-area engine.
///
/// All distances are meters; conversion to the geographic coordinate space
/// happens inside the geometry kernel.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub layers: NetworkLayers,
    pub fallback_buffer_m: f64,
    pub asset_buffer_m: f64,
    pub intersected_buffer_m: f64,
    pub nearby_tolerance_m: f64,
    pub max_nearest_distance_m: f64,
    pub epsilon_buffer_m: f64,
    pub path_precision_digits: u32,
    pub bbox_expansion_m: f64,
    pub link_buffer_m: f64,
    pub almost_in_area_ratio: f64,
    pub grid_resolution: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layers: NetworkLayers::default(),
            fallback_buffer_m: DEFAULT_FALLBACK_BUFFER_M,
            asset_buffer_m: DEFAULT_ASSET_BUFFER_M,
            intersected_buffer_m: DEFAULT_INTERSECTED_BUFFER_M,
            nearby_tolerance_m: DEFAULT_NEARBY_TOLERANCE_M,
            max_nearest_distance_m: DEFAULT_MAX_NEAREST_DISTANCE_M,
            epsilon_buffer_m: DEFAULT_EPSILON_BUFFER_M,
            path_precision_digits: DEFAULT_PATH_PRECISION_DIGITS,
            bbox_expansion_m: DEFAULT_BBOX_EXPANSION_M,
            link_buffer_m: DEFAULT_LINK_BUFFER_M,
            almost_in_area_ratio: DEFAULT_ALMOST_IN_AREA_RATIO,
            grid_resolution: DEFAULT_GRID_RESOLUTION,
        }
    }
}
