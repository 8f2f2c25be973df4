//! Road-Network Linker: fuses several disjoint work-area polygons into
//! one connected polygon.
//!
//! Components are connected along the real road graph where possible —
//! one representative point per component, snapped onto the network, with
//! shortest paths turned into pavement corridors — and bridged with
//! hairline straight links where not. Given at least one input polygon
//! the linker always returns a single connected polygon; only an
//! unrecoverable union surfaces an error.

mod graph;
mod grid;
mod link;

pub use link::link_multi_polygon;

use geo::{BoundingRect, Geometry, LineString, Point, Polygon, Rect};
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::error::Error;
use crate::geometry::{
    buffer, meters_to_degrees, meters_to_degrees_lon, multi_polygon_to_single_polygon,
    round_coordinates, union_polygons,
};
use crate::index::FeatureIndex;
use crate::model::{Feature, RequestContext};
use crate::workarea::{combine_work_area_features, intersected_features};
use graph::RoadGraph;
use grid::{representative_point, snap_onto_network};

/// Builds one connected work area from several polygons, buffered by
/// `buffer_m` at the end.
pub async fn build_multi_polygon_work_area<I: FeatureIndex>(
    index: &I,
    ctx: &RequestContext,
    polygons: &[Polygon<f64>],
    buffer_m: f64,
    cfg: &EngineConfig,
) -> Result<Polygon<f64>, Error> {
    if polygons.is_empty() {
        return Err(Error::InvalidData(
            "at least one input polygon is required".into(),
        ));
    }

    let unioned = union_polygons(polygons, cfg.epsilon_buffer_m)?;
    let bbox = unioned.bounding_rect();
    let mut components = unioned.0;
    if components.len() == 1 {
        return finish(components.remove(0), buffer_m, cfg);
    }

    let mut corridors = Vec::new();
    if let Some(rect) = bbox {
        let query = Geometry::Polygon(expand_rect(rect, cfg.bbox_expansion_m).to_polygon());
        let sections = index
            .query_intersecting(ctx, &query, &[cfg.layers.road_sections.clone()])
            .await?;
        if sections.is_empty() {
            info!("no road sections around the components, bridging directly");
        } else {
            corridors = path_corridors(index, ctx, &components, &sections, cfg).await?;
        }
    }

    let mut parts = components;
    parts.extend(corridors);
    let fused = union_polygons(&parts, cfg.epsilon_buffer_m)?;
    let single = if fused.0.len() == 1 {
        let mut polygons = fused.0;
        polygons.remove(0)
    } else {
        link_multi_polygon(&fused, cfg.link_buffer_m, cfg)?
    };
    finish(single, buffer_m, cfg)
}

/// Shortest road paths between consecutive component representatives,
/// expanded into pavement corridors with the builder's combine logic.
async fn path_corridors<I: FeatureIndex>(
    index: &I,
    ctx: &RequestContext,
    components: &[Polygon<f64>],
    sections: &[Feature],
    cfg: &EngineConfig,
) -> Result<Vec<Polygon<f64>>, Error> {
    let mut road_lines: Vec<LineString<f64>> = sections
        .iter()
        .flat_map(|section| section_lines(&section.geometry))
        .map(|line| round_coordinates(&line, cfg.path_precision_digits))
        .filter(|line| line.0.len() >= 2)
        .collect();
    if road_lines.is_empty() {
        return Ok(Vec::new());
    }

    let representatives: Vec<Point<f64>> = components
        .par_iter()
        .map(|polygon| representative_point(polygon, cfg.grid_resolution))
        .collect::<Result<Vec<_>, _>>()?;
    let snapped = snap_onto_network(
        &mut road_lines,
        &representatives,
        cfg.path_precision_digits,
    );

    let graph = RoadGraph::from_lines(&road_lines);
    if graph.is_empty() {
        return Ok(Vec::new());
    }

    let mut corridors = Vec::new();
    for (a, b) in snapped.iter().tuple_windows() {
        let Some(coords) = graph.shortest_path(a.0, b.0) else {
            debug!("no road path between two components, leaving them to the straight bridge");
            continue;
        };
        // a degenerate path is "no path found", not an error
        if coords.len() < 2 {
            continue;
        }
        let path = Geometry::LineString(LineString::new(coords));

        let layers = [cfg.layers.pavement.clone(), cfg.layers.intersections.clone()];
        let nearby = index
            .query_nearby(ctx, &path, &layers, cfg.nearby_tolerance_m)
            .await?;
        if nearby.is_empty() {
            continue;
        }
        let touching = intersected_features(&path, &nearby, cfg.asset_buffer_m)?;
        if touching.is_empty() {
            continue;
        }
        let (combined, _) = combine_work_area_features(&touching, &nearby, cfg)?;
        corridors.extend(combined.0);
    }
    Ok(corridors)
}

fn section_lines(geometry: &Geometry<f64>) -> Vec<LineString<f64>> {
    match geometry {
        Geometry::LineString(ls) => vec![ls.clone()],
        Geometry::MultiLineString(mls) => mls.0.clone(),
        _ => Vec::new(),
    }
}

fn expand_rect(rect: Rect<f64>, meters: f64) -> Rect<f64> {
    let pad_y = meters_to_degrees(meters);
    let pad_x = meters_to_degrees_lon(meters, rect.min().y);
    Rect::new(
        geo::Coord {
            x: rect.min().x - pad_x,
            y: rect.min().y - pad_y,
        },
        geo::Coord {
            x: rect.max().x + pad_x,
            y: rect.max().y + pad_y,
        },
    )
}

fn finish(polygon: Polygon<f64>, buffer_m: f64, cfg: &EngineConfig) -> Result<Polygon<f64>, Error> {
    if buffer_m <= 0.0 {
        return Ok(polygon);
    }
    let buffered = buffer(&Geometry::Polygon(polygon), buffer_m)?;
    if buffered.0.len() == 1 {
        let mut polygons = buffered.0;
        return Ok(polygons.remove(0));
    }
    multi_polygon_to_single_polygon(&buffered, cfg.asset_buffer_m, cfg.epsilon_buffer_m)
}
