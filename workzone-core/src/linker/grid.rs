//! Representative points and road-network snapping.
//!
//! Each disjoint component gets one representative point: the interior
//! grid point nearest its centroid, snapped onto the closest road-section
//! line. The snap vertex is inserted into the line so the point and the
//! path graph share exact coordinates.

use geo::{Centroid, Coord, Distance, Haversine, LineString, Point, Polygon};
use h3o::{
    CellIndex, LatLng, Resolution,
    geom::{ContainmentMode, TilerBuilder},
};
use hashbrown::HashMap;
use rstar::RTree;
use rstar::primitives::{GeomWithData, Line as SegmentPrimitive};

use crate::error::Error;
use crate::geometry::rounding::round_value;

/// Interior point of the polygon closest to its centroid, computed over a
/// fine hexagonal grid. Falls back to the centroid itself for polygons
/// too small to cover any cell.
pub(crate) fn representative_point(
    polygon: &Polygon<f64>,
    resolution: u8,
) -> Result<Point<f64>, Error> {
    let Some(anchor) = polygon
        .centroid()
        .or_else(|| polygon.exterior().0.first().map(|c| Point::from(*c)))
    else {
        return Err(Error::InvalidData(
            "cannot place a representative point in an empty polygon".into(),
        ));
    };

    let grid = hex_coverage(polygon.clone(), resolution)?;
    let mut best: Option<(Point<f64>, f64)> = None;
    for cell in grid {
        let center = LatLng::from(cell);
        let point = Point::new(center.lng(), center.lat());
        let d = Haversine.distance(anchor, point);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((point, d));
        }
    }
    Ok(best.map_or(anchor, |(point, _)| point))
}

fn hex_coverage(area: Polygon<f64>, resolution: u8) -> Result<Vec<CellIndex>, Error> {
    let resolution = Resolution::try_from(resolution)
        .map_err(|e| Error::InvalidData(format!("invalid grid resolution: {e}")))?;

    let mut tiler = TilerBuilder::new(resolution)
        .containment_mode(ContainmentMode::ContainsCentroid)
        .build();
    tiler.add(area)?;

    Ok(tiler.into_coverage().collect())
}

type SnapSegment = GeomWithData<SegmentPrimitive<[f64; 2]>, (usize, usize)>;

/// Snaps each point onto the nearest road-section segment, rounds the
/// snap to the shared path precision, and inserts it as a vertex of the
/// snapped line. Returns the snapped points in input order.
pub(crate) fn snap_onto_network(
    lines: &mut [LineString<f64>],
    points: &[Point<f64>],
    precision_digits: u32,
) -> Vec<Point<f64>> {
    let factor = 10f64.powi(precision_digits as i32);
    let segments: Vec<SnapSegment> = lines
        .iter()
        .enumerate()
        .flat_map(|(line_idx, line)| {
            line.lines().enumerate().map(move |(seg_idx, seg)| {
                GeomWithData::new(
                    SegmentPrimitive::new(
                        [seg.start.x, seg.start.y],
                        [seg.end.x, seg.end.y],
                    ),
                    (line_idx, seg_idx),
                )
            })
        })
        .collect();
    if segments.is_empty() {
        return points.to_vec();
    }
    let tree = RTree::bulk_load(segments);

    let mut snapped = Vec::with_capacity(points.len());
    let mut insertions: Vec<(usize, usize, f64, Coord<f64>)> = Vec::new();
    for point in points {
        let query = [point.x(), point.y()];
        let Some(entry) = tree.nearest_neighbor(&query) else {
            snapped.push(*point);
            continue;
        };
        let projected = entry.geom().nearest_point(&query);
        let coord = Coord {
            x: round_value(projected[0], factor),
            y: round_value(projected[1], factor),
        };
        let (line_idx, seg_idx) = entry.data;
        let start = entry.geom().from;
        let t = (coord.x - start[0]).powi(2) + (coord.y - start[1]).powi(2);
        insertions.push((line_idx, seg_idx, t, coord));
        snapped.push(Point::from(coord));
    }

    apply_insertions(lines, insertions);
    snapped
}

fn apply_insertions(
    lines: &mut [LineString<f64>],
    insertions: Vec<(usize, usize, f64, Coord<f64>)>,
) {
    let mut by_line: HashMap<usize, Vec<(usize, f64, Coord<f64>)>> = HashMap::new();
    for (line_idx, seg_idx, t, coord) in insertions {
        by_line
            .entry(line_idx)
            .or_default()
            .push((seg_idx, t, coord));
    }

    for (line_idx, mut pending) in by_line {
        pending.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        let line = &mut lines[line_idx];
        let mut offset = 0;
        for (seg_idx, _, coord) in pending {
            let insert_at = seg_idx + 1 + offset;
            // the snap may land exactly on an existing (or just inserted)
            // vertex; the graph already has a node there
            let on_start = line.0.get(insert_at - 1).is_some_and(|c| *c == coord);
            let on_end = line.0.get(insert_at).is_some_and(|c| *c == coord);
            if on_start || on_end {
                continue;
            }
            line.0.insert(insert_at, coord);
            offset += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{Contains, line_string, polygon};

    use super::*;

    #[test]
    fn representative_point_lands_inside() {
        let polygon = polygon![
            (x: -73.56, y: 45.51),
            (x: -73.55, y: 45.51),
            (x: -73.55, y: 45.52),
            (x: -73.56, y: 45.52),
        ];
        let point = representative_point(&polygon, 13).unwrap();
        assert!(polygon.contains(&point));
    }

    #[test]
    fn snapping_inserts_the_vertex_into_the_line() {
        let mut lines = vec![line_string![
            (x: 0.0, y: 0.0),
            (x: 0.001, y: 0.0),
        ]];
        let snapped = snap_onto_network(&mut lines, &[Point::new(0.0005, 0.0002)], 5);

        assert_eq!(snapped.len(), 1);
        assert_eq!(snapped[0], Point::new(0.0005, 0.0));
        assert_eq!(lines[0].0.len(), 3);
        assert_eq!(lines[0].0[1], Coord { x: 0.0005, y: 0.0 });
    }

    #[test]
    fn snapping_onto_an_endpoint_adds_no_vertex() {
        let mut lines = vec![line_string![
            (x: 0.0, y: 0.0),
            (x: 0.001, y: 0.0),
        ]];
        snap_onto_network(&mut lines, &[Point::new(-0.0002, 0.0001)], 5);
        assert_eq!(lines[0].0.len(), 2);
    }
}
