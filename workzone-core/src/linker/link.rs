//! Straight-line bridging of disjoint components.

use geo::{Geometry, MultiPolygon, Polygon};
use itertools::Itertools;
use log::warn;

use crate::config::EngineConfig;
use crate::error::Error;
use crate::geometry::{
    buffer, multi_polygon_to_single_polygon, shortest_segment_between, union_polygons,
};

/// Fuses the components of a multi-polygon into one polygon by bridging
/// each consecutive pair (in decomposition order) with a buffered
/// shortest segment between their vertex sets.
pub fn link_multi_polygon(
    multi: &MultiPolygon<f64>,
    link_buffer_m: f64,
    cfg: &EngineConfig,
) -> Result<Polygon<f64>, Error> {
    let components = &multi.0;
    match components.len() {
        0 => {
            return Err(Error::InvalidData(
                "cannot link an empty multi-polygon".into(),
            ));
        }
        1 => return Ok(components[0].clone()),
        _ => {}
    }

    let mut parts = components.clone();
    for (a, b) in components.iter().tuple_windows() {
        let bridge = shortest_segment_between(
            &Geometry::Polygon(a.clone()),
            &Geometry::Polygon(b.clone()),
        )?;
        parts.extend(buffer(&Geometry::LineString(bridge), link_buffer_m)?.0);
    }

    let fused = union_polygons(&parts, cfg.epsilon_buffer_m)?;
    if fused.0.len() == 1 {
        let mut polygons = fused.0;
        return Ok(polygons.remove(0));
    }

    warn!(
        "straight-line bridging left {} disjoint parts, collapsing",
        fused.0.len()
    );
    multi_polygon_to_single_polygon(&fused, cfg.asset_buffer_m, cfg.epsilon_buffer_m)
}
