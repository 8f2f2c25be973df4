//! Fusing anchor features and their road-mates into one area.

use geo::{Geometry, MultiPolygon, Polygon};

use crate::config::EngineConfig;
use crate::error::Error;
use crate::geometry::{boolean_intersects, buffer, union_polygons};
use crate::model::Feature;

/// Combines the selected source features with their surroundings.
///
/// A source carrying a `roadId` pulls in every nearby feature of the same
/// physical road; an intersection source pulls in the junction features
/// overlapping its buffer plus itself. When nothing accumulates, the raw
/// source features are unioned as-is. The returned flag reports whether
/// accumulation occurred (`is_unified`).
pub(crate) fn combine_work_area_features(
    source_features: &[&Feature],
    nearby: &[Feature],
    cfg: &EngineConfig,
) -> Result<(MultiPolygon<f64>, bool), Error> {
    // sources borrow from the fetched list, so identity comparison is
    // enough to deduplicate across gathering passes
    let mut gathered: Vec<&Feature> = Vec::new();

    for source in source_features {
        if let Some(road_id) = source.road_id() {
            for feature in nearby {
                if feature.road_id() == Some(road_id)
                    && !gathered.iter().any(|g| std::ptr::eq(*g, feature))
                {
                    gathered.push(feature);
                }
            }
        } else {
            let probe = Geometry::MultiPolygon(buffer(&source.geometry, cfg.intersected_buffer_m)?);
            for feature in nearby {
                if feature.is_intersection()
                    && boolean_intersects(&probe, &feature.geometry)?
                    && !gathered.iter().any(|g| std::ptr::eq(*g, feature))
                {
                    gathered.push(feature);
                }
            }
            if !gathered.iter().any(|g| std::ptr::eq(*g, *source)) {
                gathered.push(*source);
            }
        }
    }

    let is_unified = !gathered.is_empty();
    let pool: &[&Feature] = if is_unified {
        &gathered
    } else {
        source_features
    };

    let mut polygons = Vec::new();
    for feature in pool {
        polygons.extend(polygonize(&feature.geometry, cfg)?);
    }
    let combined = union_polygons(&polygons, cfg.epsilon_buffer_m)?;
    Ok((combined, is_unified))
}

fn polygonize(geometry: &Geometry<f64>, cfg: &EngineConfig) -> Result<Vec<Polygon<f64>>, Error> {
    match geometry {
        Geometry::Polygon(p) => Ok(vec![p.clone()]),
        Geometry::MultiPolygon(mp) => Ok(mp.0.clone()),
        other => Ok(buffer(other, cfg.asset_buffer_m)?.0),
    }
}
