use geo::{Closest, ClosestPoint, Coord, CoordsIter, Distance, Geometry, Haversine, LineString, Point};

use crate::error::Error;

/// Closest point on `line` to `point`, with its haversine distance in
/// meters. An empty line yields the query point at infinite distance.
pub fn nearest_point_on_line(line: &LineString<f64>, point: &Point<f64>) -> (Point<f64>, f64) {
    match line.closest_point(point) {
        Closest::SinglePoint(p) | Closest::Intersection(p) => (p, Haversine.distance(*point, p)),
        Closest::Indeterminate => match line.0.first() {
            Some(c) => {
                let p = Point::from(*c);
                (p, Haversine.distance(*point, p))
            }
            None => (*point, f64::INFINITY),
        },
    }
}

/// Minimum-distance segment between the vertex sets of two geometries,
/// as a two-point line. Exhaustive over every vertex pair; ties keep the
/// first pair found.
pub fn shortest_segment_between(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
) -> Result<LineString<f64>, Error> {
    let b_coords: Vec<Coord<f64>> = b.coords_iter().collect();
    let mut best: Option<(Coord<f64>, Coord<f64>, f64)> = None;

    for ca in a.coords_iter() {
        for &cb in &b_coords {
            let d = Haversine.distance(Point::from(ca), Point::from(cb));
            if best.is_none_or(|(_, _, bd)| d < bd) {
                best = Some((ca, cb, d));
            }
        }
    }

    best.map(|(ca, cb, _)| LineString::new(vec![ca, cb]))
        .ok_or_else(|| {
            Error::InvalidData("shortest segment requires two non-empty geometries".into())
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::line_string;

    use super::*;

    #[test]
    fn nearest_point_projects_onto_the_segment() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let (p, d) = nearest_point_on_line(&line, &Point::new(0.5, 0.001));

        assert_relative_eq!(p.x(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(p.y(), 0.0, epsilon = 1e-9);
        assert!(d > 0.0 && d < 200.0);
    }

    #[test]
    fn shortest_segment_picks_the_closest_vertex_pair() {
        let a = Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0)]);
        let b = Geometry::LineString(line_string![(x: 3.0, y: 1.0), (x: 0.5, y: 1.0)]);

        let segment = shortest_segment_between(&a, &b).unwrap();
        assert_eq!(
            segment.0,
            vec![Coord { x: 0.0, y: 1.0 }, Coord { x: 0.5, y: 1.0 }]
        );
    }

    #[test]
    fn empty_geometry_is_rejected() {
        let a = Geometry::LineString(LineString::new(Vec::new()));
        let b = Geometry::Point(Point::new(0.0, 0.0));
        assert!(shortest_segment_between(&a, &b).is_err());
    }
}
