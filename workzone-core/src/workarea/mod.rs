//! Work-Area Builder: derives the influence zone of one source geometry.
//!
//! The builder is a state machine over the geometry tag. Area inputs pass
//! through structurally; point and line inputs are anchored on the
//! surrounding pavement/intersection features, and every degenerate
//! branch falls back to a fixed metric buffer — "nothing found" is never
//! an error here.

mod candidates;
mod combine;

pub use candidates::{intersected_features, nearest_feature};
pub(crate) use combine::combine_work_area_features;

use futures::future::join_all;
use geo::{Geometry, MultiPolygon, Polygon, Simplify};
use log::debug;

use crate::config::EngineConfig;
use crate::error::Error;
use crate::geometry::{buffer, multi_polygon_to_single_polygon, tag_of};
use crate::index::FeatureIndex;
use crate::model::{Feature, RequestContext, WorkArea};

/// Douglas-Peucker tolerance for the fallback buffer, degrees (≈0.1 m).
const SIMPLIFY_EPSILON_DEG: f64 = 1e-6;

/// Builds the work area of one source geometry.
///
/// `nearby` optionally supplies pre-fetched pavement and intersection
/// features; when absent they are queried within the configured
/// tolerance. Both the empty-surroundings and the nothing-anchors cases
/// return the default fallback buffer.
pub async fn build_work_area<I: FeatureIndex>(
    index: &I,
    ctx: &RequestContext,
    source: &Geometry<f64>,
    nearby: Option<Vec<Feature>>,
    cfg: &EngineConfig,
) -> Result<WorkArea, Error> {
    match source {
        Geometry::Polygon(p) => Ok(WorkArea::from_polygon(p.clone(), false)),
        Geometry::MultiPolygon(mp) => Ok(WorkArea::from_multi_polygon(mp.clone(), false)),
        Geometry::Point(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
            let nearby = match nearby {
                Some(features) => features,
                None => {
                    let layers = [cfg.layers.pavement.clone(), cfg.layers.intersections.clone()];
                    index
                        .query_nearby(ctx, source, &layers, cfg.nearby_tolerance_m)
                        .await?
                }
            };
            if nearby.is_empty() {
                return default_buffer(source, cfg);
            }

            let source_features: Vec<&Feature> = match source {
                Geometry::Point(_) => {
                    nearest_feature(source, &nearby, Some(cfg.max_nearest_distance_m))
                        .into_iter()
                        .collect()
                }
                _ => {
                    let hits = intersected_features(source, &nearby, cfg.asset_buffer_m)?;
                    if hits.is_empty() {
                        nearest_feature(source, &nearby, Some(cfg.max_nearest_distance_m))
                            .into_iter()
                            .collect()
                    } else {
                        hits
                    }
                }
            };
            if source_features.is_empty() {
                debug!(
                    "no anchoring feature within {} m, using the fallback buffer",
                    cfg.max_nearest_distance_m
                );
                return default_buffer(source, cfg);
            }

            let (combined, is_unified) = combine_work_area_features(&source_features, &nearby, cfg)?;
            let polygon = collapse_to_polygon(combined, cfg)?;
            Ok(WorkArea::from_polygon(polygon, is_unified))
        }
        other => Err(Error::UnsupportedGeometry(tag_of(other))),
    }
}

/// Builds work areas for many independent sources, querying the feature
/// source concurrently. One result per input; a single failing item never
/// fails the batch.
pub async fn build_work_areas<I: FeatureIndex>(
    index: &I,
    ctx: &RequestContext,
    sources: &[Geometry<f64>],
    cfg: &EngineConfig,
) -> Vec<Result<WorkArea, Error>> {
    join_all(
        sources
            .iter()
            .map(|source| build_work_area(index, ctx, source, None, cfg)),
    )
    .await
}

/// Terminal fallback: the source buffered by the configured distance and
/// simplified.
pub fn default_buffer(source: &Geometry<f64>, cfg: &EngineConfig) -> Result<WorkArea, Error> {
    let buffered = buffer(source, cfg.fallback_buffer_m)?;
    let polygon = single_polygon(buffered, cfg)?;
    Ok(WorkArea::from_polygon(
        polygon.simplify(&SIMPLIFY_EPSILON_DEG),
        false,
    ))
}

fn single_polygon(multi: MultiPolygon<f64>, cfg: &EngineConfig) -> Result<Polygon<f64>, Error> {
    let mut parts = multi.0;
    match parts.len() {
        0 => Err(Error::InvalidData("buffering produced no polygon".into())),
        1 => Ok(parts.remove(0)),
        _ => multi_polygon_to_single_polygon(
            &MultiPolygon::new(parts),
            cfg.asset_buffer_m,
            cfg.epsilon_buffer_m,
        ),
    }
}

/// Collapses a combined result to one polygon and applies the historical
/// ring policy: interior rings beyond the first ring group are dropped,
/// not unioned.
fn collapse_to_polygon(combined: MultiPolygon<f64>, cfg: &EngineConfig) -> Result<Polygon<f64>, Error> {
    let polygon = single_polygon(combined, cfg)?;
    if polygon.interiors().is_empty() {
        return Ok(polygon);
    }
    debug!(
        "combined work area has {} interior rings, keeping the outer ring only",
        polygon.interiors().len()
    );
    Ok(Polygon::new(polygon.exterior().clone(), Vec::new()))
}
