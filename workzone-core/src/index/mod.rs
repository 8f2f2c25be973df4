//! Feature Index Adapter: the engine's view of the external spatial
//! feature source.
//!
//! The trait is intentionally thin — no caching, no ordering, no retry.
//! Timeouts and cancellation belong to the concrete adapter; failures
//! surface as [`Error::Adapter`] with the upstream cause attached.

mod memory;

pub use memory::MemoryFeatureIndex;

use geo::Geometry;

use crate::error::Error;
use crate::model::{Feature, FeatureProps, LayerId, PropertyMap, RequestContext};

/// Spatial feature source queried per request. All calls are async I/O;
/// suspension happens only at these boundaries.
#[allow(async_fn_in_trait)]
pub trait FeatureIndex {
    /// Features of the given layers within `tolerance_m` of the geometry.
    async fn query_nearby(
        &self,
        ctx: &RequestContext,
        geometry: &Geometry<f64>,
        layers: &[LayerId],
        tolerance_m: f64,
    ) -> Result<Vec<Feature>, Error>;

    /// Features of the given layers intersecting the geometry.
    async fn query_intersecting(
        &self,
        ctx: &RequestContext,
        geometry: &Geometry<f64>,
        layers: &[LayerId],
    ) -> Result<Vec<Feature>, Error>;

    /// Features of the given layers whose `id_key` property matches one
    /// of `ids`. The special key `"id"` matches the feature id itself.
    async fn query_by_ids(
        &self,
        ctx: &RequestContext,
        ids: &[String],
        id_key: &str,
        layers: &[LayerId],
    ) -> Result<Vec<Feature>, Error>;
}

impl TryFrom<geojson::Feature> for Feature {
    type Error = Error;

    /// Converts an upstream GeoJSON feature, classifying its property map
    /// into the typed variants the engine understands.
    fn try_from(feature: geojson::Feature) -> Result<Self, Error> {
        let geometry = feature
            .geometry
            .ok_or_else(|| Error::InvalidData("feature without geometry".into()))?;
        let geometry = Geometry::<f64>::try_from(geometry.value)
            .map_err(|e| Error::InvalidData(format!("unsupported GeoJSON geometry: {e}")))?;

        let props = match feature.properties {
            Some(map) => FeatureProps::classify(map),
            None => FeatureProps::Generic(PropertyMap::new()),
        };

        let id = match feature.id {
            Some(geojson::feature::Id::String(s)) => s,
            Some(geojson::feature::Id::Number(n)) => n.to_string(),
            None => props_id(&props).unwrap_or_default(),
        };

        Ok(Feature::new(id, geometry, props))
    }
}

fn props_id(props: &FeatureProps) -> Option<String> {
    match props {
        FeatureProps::RoadSection(p) => Some(p.id.clone()),
        FeatureProps::Intersection(_) => None,
        FeatureProps::Generic(map) => map.get("id").and_then(|v| v.as_str()).map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geojson_road_section_converts_to_typed_props() {
        let feature: geojson::Feature = serde_json::from_value(serde_json::json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[-73.56, 45.51], [-73.559, 45.511]]
            },
            "properties": {
                "id": "rs-1",
                "name": "Saint-Urbain",
                "shortName": "St-Urbain",
                "fromName": "Avenue des Pins",
                "fromShortName": "des Pins",
                "toName": "Rue Prince-Arthur",
                "toShortName": "Prince-Arthur",
                "roadId": "r-9"
            }
        }))
        .unwrap();

        let converted = Feature::try_from(feature).unwrap();
        assert_eq!(converted.id, "rs-1");
        assert_eq!(converted.road_id(), Some("r-9"));
        assert!(converted.road_section().is_some());
    }

    #[test]
    fn geojson_junction_converts_to_intersection_props() {
        let feature: geojson::Feature = serde_json::from_value(serde_json::json!({
            "type": "Feature",
            "id": "x-1",
            "geometry": { "type": "Point", "coordinates": [-73.56, 45.51] },
            "properties": { "roadId1": "r-1", "roadId2": "r-2" }
        }))
        .unwrap();

        let converted = Feature::try_from(feature).unwrap();
        assert!(converted.is_intersection());
        assert_eq!(converted.road_id(), None);
    }

    #[test]
    fn feature_without_geometry_is_rejected() {
        let feature = geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert!(Feature::try_from(feature).is_err());
    }
}
