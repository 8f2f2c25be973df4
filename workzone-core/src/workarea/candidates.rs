//! Candidate selection: which nearby network features anchor a source
//! geometry.

use geo::{CoordsIter, Geometry, LineString, Point};

use crate::error::Error;
use crate::geometry::{boolean_intersects, buffer, nearest_point_on_line};
use crate::model::Feature;

/// Vertex points of the source; polygons contribute their boundary ring.
fn vertex_points(geometry: &Geometry<f64>) -> Vec<Point<f64>> {
    match geometry {
        Geometry::Polygon(p) => p.exterior().coords().map(|c| Point::from(*c)).collect(),
        Geometry::MultiPolygon(mp) => mp
            .0
            .iter()
            .flat_map(|p| p.exterior().coords())
            .map(|c| Point::from(*c))
            .collect(),
        other => other.coords_iter().map(Point::from).collect(),
    }
}

/// Candidate geometries as lines; polygons are treated via their
/// boundary, points as degenerate one-vertex lines.
fn candidate_lines(geometry: &Geometry<f64>) -> Vec<LineString<f64>> {
    match geometry {
        Geometry::LineString(ls) => vec![ls.clone()],
        Geometry::MultiLineString(mls) => mls.0.clone(),
        Geometry::Polygon(p) => vec![p.exterior().clone()],
        Geometry::MultiPolygon(mp) => mp.0.iter().map(|p| p.exterior().clone()).collect(),
        Geometry::Point(p) => vec![LineString::new(vec![p.0])],
        Geometry::MultiPoint(mp) => mp.0.iter().map(|p| LineString::new(vec![p.0])).collect(),
        _ => Vec::new(),
    }
}

/// The single candidate closest to the source's vertices, bounded by
/// `max_distance_m` when given. Ties keep the first candidate in input
/// order.
pub fn nearest_feature<'a>(
    source: &Geometry<f64>,
    candidates: &'a [Feature],
    max_distance_m: Option<f64>,
) -> Option<&'a Feature> {
    let points = vertex_points(source);
    if points.is_empty() {
        return None;
    }

    let mut best: Option<(&Feature, f64)> = None;
    for feature in candidates {
        let mut closest = f64::INFINITY;
        for line in candidate_lines(&feature.geometry) {
            for point in &points {
                let (_, d) = nearest_point_on_line(&line, point);
                if d < closest {
                    closest = d;
                }
            }
        }
        if max_distance_m.is_some_and(|max| closest > max) {
            continue;
        }
        if best.is_none_or(|(_, bd)| closest < bd) {
            best = Some((feature, closest));
        }
    }
    best.map(|(feature, _)| feature)
}

/// Every candidate intersecting the source buffered by
/// `buffer_distance_m`, preserving candidate input order.
pub fn intersected_features<'a>(
    source: &Geometry<f64>,
    candidates: &'a [Feature],
    buffer_distance_m: f64,
) -> Result<Vec<&'a Feature>, Error> {
    let probe = Geometry::MultiPolygon(buffer(source, buffer_distance_m)?);
    let mut hits = Vec::new();
    for feature in candidates {
        if boolean_intersects(&probe, &feature.geometry)? {
            hits.push(feature);
        }
    }
    Ok(hits)
}
