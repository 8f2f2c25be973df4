use geo::LineString;

use super::Feature;

/// Road-network classification of a work area, derived from how many of
/// the touching road sections belong to the arterial layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadNetworkClass {
    Local,
    Arterial,
    ArterialLocal,
    OffRoadNetwork,
}

/// One contiguous named street inside a work area, assembled by chaining
/// road sections end to start.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetSummary {
    pub name: String,
    pub short_name: String,
    pub from_name: String,
    pub from_short_name: String,
    pub to_name: String,
    pub to_short_name: String,
    pub road_section_ids: Vec<String>,
    pub line: LineString<f64>,
    /// Total chain length, meters.
    pub length_m: f64,
    /// Length of the sub-segment between the two boundary crossings of
    /// the work area; zero when the boundary is not crossed exactly twice.
    pub length_within_area_m: f64,
    pub is_arterial: bool,
}

/// Name pair of a cross street at one end of the main street.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossStreet {
    pub name: String,
    pub short_name: String,
}

/// Result of the full street analysis of one work area.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetAnalysis {
    pub main_street: Option<StreetSummary>,
    pub from: Option<CrossStreet>,
    pub to: Option<CrossStreet>,
    pub road_network_class: RoadNetworkClass,
    pub road_sections: Vec<Feature>,
}
