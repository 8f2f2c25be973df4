use geo::Geometry;

use super::props::{FeatureProps, RoadSectionProps};

/// A vector feature returned by the spatial feature source.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: String,
    pub geometry: Geometry<f64>,
    pub props: FeatureProps,
}

impl Feature {
    pub fn new(id: impl Into<String>, geometry: Geometry<f64>, props: FeatureProps) -> Self {
        Self {
            id: id.into(),
            geometry,
            props,
        }
    }

    /// The physical-road identifier, when the feature belongs to one.
    pub fn road_id(&self) -> Option<&str> {
        match &self.props {
            FeatureProps::RoadSection(p) => p.road_id.as_deref(),
            FeatureProps::Intersection(_) => None,
            FeatureProps::Generic(map) => map.get("roadId").and_then(|v| v.as_str()),
        }
    }

    /// True for junction features (a `roadId1`/`roadId2` pair, no `roadId`).
    pub fn is_intersection(&self) -> bool {
        match &self.props {
            FeatureProps::Intersection(_) => true,
            FeatureProps::RoadSection(_) => false,
            FeatureProps::Generic(map) => {
                map.contains_key("roadId1")
                    && map.contains_key("roadId2")
                    && !map.contains_key("roadId")
            }
        }
    }

    pub fn road_section(&self) -> Option<&RoadSectionProps> {
        match &self.props {
            FeatureProps::RoadSection(p) => Some(p),
            _ => None,
        }
    }

    /// Looks a string property up across the typed and generic variants.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        match &self.props {
            FeatureProps::RoadSection(p) => match key {
                "id" => Some(&p.id),
                "name" => Some(&p.name),
                "shortName" => Some(&p.short_name),
                "fromName" => Some(&p.from_name),
                "fromShortName" => Some(&p.from_short_name),
                "toName" => Some(&p.to_name),
                "toShortName" => Some(&p.to_short_name),
                "roadId" => p.road_id.as_deref(),
                _ => None,
            },
            FeatureProps::Intersection(p) => match key {
                "roadId1" => Some(&p.road_id_1),
                "roadId2" => Some(&p.road_id_2),
                _ => None,
            },
            FeatureProps::Generic(map) => map.get(key).and_then(|v| v.as_str()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.property_str("name")
    }
}
