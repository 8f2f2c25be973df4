//! Typed property bags for the feature roles the engine understands.
//!
//! Upstream layers return open-ended key/value maps; conversion to these
//! structs happens once, at the feature-index boundary. Layers the engine
//! has no schema for keep their raw map.

use serde::{Deserialize, Serialize};

pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// Attributes of one physical stretch of street.
///
/// Two road sections belong to the same physical road when they share a
/// `road_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSectionProps {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub from_name: String,
    pub from_short_name: String,
    pub to_name: String,
    pub to_short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_id: Option<String>,
}

/// Attributes of a road junction, identified by the pair of roads it
/// connects. Junctions never carry a `roadId` of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionProps {
    #[serde(rename = "roadId1")]
    pub road_id_1: String,
    #[serde(rename = "roadId2")]
    pub road_id_2: String,
}

/// Tagged property variant selected at the adapter boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureProps {
    RoadSection(RoadSectionProps),
    Intersection(IntersectionProps),
    Generic(PropertyMap),
}

impl FeatureProps {
    /// Classifies an upstream property map by its shape: a junction pair,
    /// a named road section, or an opaque map for everything else.
    pub fn classify(map: PropertyMap) -> Self {
        let value = serde_json::Value::Object(map);

        if value.get("roadId1").is_some()
            && value.get("roadId2").is_some()
            && value.get("roadId").is_none()
            && let Ok(props) = serde_json::from_value::<IntersectionProps>(value.clone())
        {
            return FeatureProps::Intersection(props);
        }

        if let Ok(props) = serde_json::from_value::<RoadSectionProps>(value.clone()) {
            return FeatureProps::RoadSection(props);
        }

        match value {
            serde_json::Value::Object(map) => FeatureProps::Generic(map),
            _ => FeatureProps::Generic(PropertyMap::new()),
        }
    }
}
