//! Per-chain street summaries.

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{
    Closest, ClosestPoint, Coord, Distance, Euclidean, Geometry, Haversine, Length, LineString,
    Point,
};
use hashbrown::HashSet;

use crate::model::{Feature, StreetSummary, WorkArea};

/// Coordinates closer than this (degrees) count as one crossing.
const CROSSING_MERGE_EPSILON: f64 = 1e-9;

pub(crate) fn line_length_m(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::LineString(ls) => Haversine.length(ls),
        Geometry::MultiLineString(mls) => mls.0.iter().map(|ls| Haversine.length(ls)).sum(),
        _ => 0.0,
    }
}

pub(crate) fn summarize_chain(
    chain: &[usize],
    sections: &[&Feature],
    area: &WorkArea,
    arterial_ids: &HashSet<String>,
) -> Option<StreetSummary> {
    let first = sections.get(*chain.first()?)?;
    let last = sections.get(*chain.last()?)?;

    let line = concatenate(chain, sections);
    let length_m = Haversine.length(&line);
    let length_within_area_m = length_within_area(&line, area);

    let prop = |feature: &Feature, key: &str| feature.property_str(key).unwrap_or("").to_string();

    Some(StreetSummary {
        name: prop(first, "name"),
        short_name: prop(first, "shortName"),
        from_name: prop(first, "fromName"),
        from_short_name: prop(first, "fromShortName"),
        to_name: prop(last, "toName"),
        to_short_name: prop(last, "toShortName"),
        road_section_ids: chain.iter().map(|&i| sections[i].id.clone()).collect(),
        is_arterial: chain
            .iter()
            .any(|&i| arterial_ids.contains(sections[i].id.as_str())),
        line,
        length_m,
        length_within_area_m,
    })
}

fn concatenate(chain: &[usize], sections: &[&Feature]) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = Vec::new();
    for &i in chain {
        let lines: Vec<&LineString<f64>> = match &sections[i].geometry {
            Geometry::LineString(ls) => vec![ls],
            Geometry::MultiLineString(mls) => mls.0.iter().collect(),
            _ => Vec::new(),
        };
        for line in lines {
            for coord in &line.0 {
                if coords.last() != Some(coord) {
                    coords.push(*coord);
                }
            }
        }
    }
    LineString::new(coords)
}

/// Length of the chain sub-segment clipped to the work-area boundary.
/// Defined only when the chain crosses the boundary exactly twice;
/// anything else yields zero.
fn length_within_area(line: &LineString<f64>, area: &WorkArea) -> f64 {
    let mut crossings: Vec<Coord<f64>> = Vec::new();
    for polygon in area.geometry.polygons() {
        let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors().iter());
        for ring in rings {
            for boundary_segment in ring.lines() {
                for chain_segment in line.lines() {
                    match line_intersection(chain_segment, boundary_segment) {
                        Some(LineIntersection::SinglePoint { intersection, .. }) => {
                            crossings.push(intersection);
                        }
                        Some(LineIntersection::Collinear { intersection }) => {
                            crossings.push(intersection.start);
                            crossings.push(intersection.end);
                        }
                        None => {}
                    }
                }
            }
        }
    }

    crossings.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    crossings.dedup_by(|a, b| {
        (a.x - b.x).abs() <= CROSSING_MERGE_EPSILON && (a.y - b.y).abs() <= CROSSING_MERGE_EPSILON
    });

    if crossings.len() != 2 {
        return 0.0;
    }
    let d1 = position_along(line, crossings[0]);
    let d2 = position_along(line, crossings[1]);
    (d2 - d1).abs()
}

/// Metric distance from the start of `line` to the projection of
/// `target` onto it.
fn position_along(line: &LineString<f64>, target: Coord<f64>) -> f64 {
    let target = Point::from(target);
    let mut cumulative = 0.0;
    let mut best = (f64::INFINITY, 0.0);

    for segment in line.lines() {
        let projected = match segment.closest_point(&target) {
            Closest::SinglePoint(p) | Closest::Intersection(p) => p,
            Closest::Indeterminate => Point::from(segment.start),
        };
        let gap = Euclidean.distance(target, projected);
        if gap < best.0 {
            best = (
                gap,
                cumulative + Haversine.distance(Point::from(segment.start), projected),
            );
        }
        cumulative += Haversine.distance(Point::from(segment.start), Point::from(segment.end));
    }
    best.1
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{line_string, polygon};

    use super::*;

    #[test]
    fn clips_to_exactly_two_crossings() {
        // a horizontal line crossing a square left and right
        let line = line_string![(x: -0.002, y: 0.0005), (x: 0.003, y: 0.0005)];
        let area = WorkArea::from_polygon(
            polygon![
                (x: 0.0, y: 0.0),
                (x: 0.001, y: 0.0),
                (x: 0.001, y: 0.001),
                (x: 0.0, y: 0.001),
            ],
            false,
        );

        let clipped = length_within_area(&line, &area);
        let expected = Haversine.distance(Point::new(0.0, 0.0005), Point::new(0.001, 0.0005));
        assert_relative_eq!(clipped, expected, max_relative = 1e-3);
    }

    #[test]
    fn more_than_two_crossings_yield_zero() {
        // u-shaped line enters and leaves the square four times
        let line = line_string![
            (x: -0.002, y: 0.0002),
            (x: 0.003, y: 0.0002),
            (x: 0.003, y: 0.0008),
            (x: -0.002, y: 0.0008),
        ];
        let area = WorkArea::from_polygon(
            polygon![
                (x: 0.0, y: 0.0),
                (x: 0.001, y: 0.0),
                (x: 0.001, y: 0.001),
                (x: 0.0, y: 0.001),
            ],
            false,
        );

        assert_eq!(length_within_area(&line, &area), 0.0);
    }

    #[test]
    fn length_sums_linear_parts_only() {
        let line = Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 0.001, y: 0.0)]);
        assert!(line_length_m(&line) > 0.0);
        assert_eq!(line_length_m(&Geometry::Point(Point::new(0.0, 0.0))), 0.0);
    }
}
