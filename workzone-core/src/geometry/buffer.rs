//! Metric buffering of lon/lat geometries.
//!
//! Geometries are projected into a local planar frame, dilated with vertex
//! discs, segment quads, and ring strokes, fused with the kernel union,
//! and projected back. Distances may be fractional meters — the engine
//! uses anything from 0.05 m hairline links to 8 m project buffers.

use std::f64::consts::TAU;

use geo::{Coord, CoordsIter, Geometry, Line, LineString, MapCoords, MultiPolygon, Polygon};

use super::union::union_metric;
use super::{LocalFrame, tag_of};
use crate::config::DEFAULT_EPSILON_BUFFER_M;
use crate::error::Error;

const CIRCLE_SEGMENTS: usize = 32;

/// Expands a geometry by a metric distance, returning lon/lat polygons.
///
/// Area inputs pass through unchanged when the distance is not positive;
/// point and line inputs need a positive distance to become areas.
pub fn buffer(geometry: &Geometry<f64>, distance_m: f64) -> Result<MultiPolygon<f64>, Error> {
    if !distance_m.is_finite() || distance_m <= 0.0 {
        return match geometry {
            Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p.clone()])),
            Geometry::MultiPolygon(mp) => Ok(mp.clone()),
            _ => Err(Error::InvalidData(format!(
                "cannot buffer a {} by {distance_m} m",
                tag_of(geometry)
            ))),
        };
    }

    let Some(origin) = geometry.coords_iter().next() else {
        return Err(Error::InvalidData("cannot buffer an empty geometry".into()));
    };
    let frame = LocalFrame::anchored_at(origin);
    let local = geometry.map_coords(|c| frame.to_local(c));

    let parts = metric_parts(&local, distance_m)?;
    let fused = union_metric(&parts, DEFAULT_EPSILON_BUFFER_M)?;
    Ok(fused.map_coords(|c| frame.to_geographic(c)))
}

fn metric_parts(geometry: &Geometry<f64>, r: f64) -> Result<Vec<Polygon<f64>>, Error> {
    let parts = match geometry {
        Geometry::Point(p) => vec![disc(p.0, r)],
        Geometry::MultiPoint(mp) => mp.0.iter().map(|p| disc(p.0, r)).collect(),
        Geometry::LineString(ls) => line_parts(ls, r),
        Geometry::MultiLineString(mls) => mls.0.iter().flat_map(|ls| line_parts(ls, r)).collect(),
        Geometry::Polygon(p) => dilation_parts(p, r),
        Geometry::MultiPolygon(mp) => mp.0.iter().flat_map(|p| dilation_parts(p, r)).collect(),
        other => return Err(Error::UnsupportedGeometry(tag_of(other))),
    };
    Ok(parts)
}

/// The polygon itself plus a stroke over all of its rings — unioning the
/// parts yields the dilated polygon. Unit-agnostic; also used to pad
/// inputs on the union recovery retry.
pub(crate) fn dilation_parts(polygon: &Polygon<f64>, r: f64) -> Vec<Polygon<f64>> {
    if r <= 0.0 {
        return vec![polygon.clone()];
    }
    let mut parts = vec![polygon.clone()];
    parts.extend(line_parts(polygon.exterior(), r));
    for ring in polygon.interiors() {
        parts.extend(line_parts(ring, r));
    }
    parts
}

fn line_parts(line: &LineString<f64>, r: f64) -> Vec<Polygon<f64>> {
    let mut parts: Vec<Polygon<f64>> = line.coords().map(|c| disc(*c, r)).collect();
    parts.extend(line.lines().filter_map(|segment| quad(segment, r)));
    parts
}

fn disc(center: Coord<f64>, r: f64) -> Polygon<f64> {
    let mut coords = Vec::with_capacity(CIRCLE_SEGMENTS + 1);
    for i in 0..CIRCLE_SEGMENTS {
        let angle = TAU * (i as f64) / (CIRCLE_SEGMENTS as f64);
        coords.push(Coord {
            x: center.x + r * angle.cos(),
            y: center.y + r * angle.sin(),
        });
    }
    coords.push(coords[0]);
    Polygon::new(LineString::new(coords), Vec::new())
}

fn quad(segment: Line<f64>, r: f64) -> Option<Polygon<f64>> {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return None;
    }
    let nx = -dy / length * r;
    let ny = dx / length * r;
    let (a, b) = (segment.start, segment.end);
    Some(Polygon::new(
        LineString::from(vec![
            (a.x + nx, a.y + ny),
            (b.x + nx, b.y + ny),
            (b.x - nx, b.y - ny),
            (a.x - nx, a.y - ny),
            (a.x + nx, a.y + ny),
        ]),
        Vec::new(),
    ))
}
