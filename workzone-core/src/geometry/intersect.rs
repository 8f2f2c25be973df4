use geo::{Geometry, Intersects, Polygon};

use super::tag_of;
use crate::error::Error;

/// Splits multi-geometries into their single parts; a single geometry
/// comes back as a one-element list.
pub fn decompose(geometry: &Geometry<f64>) -> Vec<Geometry<f64>> {
    match geometry {
        Geometry::MultiPoint(mp) => mp.0.iter().map(|p| Geometry::Point(*p)).collect(),
        Geometry::MultiLineString(mls) => mls
            .0
            .iter()
            .cloned()
            .map(Geometry::LineString)
            .collect(),
        Geometry::MultiPolygon(mp) => mp.0.iter().cloned().map(Geometry::Polygon).collect(),
        other => vec![other.clone()],
    }
}

fn polygons_of<'a>(geometry: &'a Geometry<f64>) -> Result<Vec<&'a Polygon<f64>>, Error> {
    match geometry {
        Geometry::Polygon(p) => Ok(vec![p]),
        Geometry::MultiPolygon(mp) => Ok(mp.0.iter().collect()),
        other => Err(Error::UnsupportedGeometry(tag_of(other))),
    }
}

/// Conjunctive intersection test: every decomposed part of `other` must
/// intersect some decomposed part of `polygon_like`. This is stricter
/// than "any part touches any part" — a multi-geometry only counts when
/// all of its members reach the area.
pub fn boolean_intersects(
    polygon_like: &Geometry<f64>,
    other: &Geometry<f64>,
) -> Result<bool, Error> {
    let polygons = polygons_of(polygon_like)?;

    for part in decompose(other) {
        match part {
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_) => {}
            ref unsupported => return Err(Error::UnsupportedGeometry(tag_of(unsupported))),
        }
        if !polygons.iter().any(|p| p.intersects(&part)) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use geo::{MultiPoint, Point, polygon};

    use super::*;

    fn square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 2.0),
        ]
    }

    #[test]
    fn every_part_must_intersect() {
        let area = Geometry::Polygon(square());
        let all_inside = Geometry::MultiPoint(MultiPoint::new(vec![
            Point::new(0.5, 0.5),
            Point::new(1.5, 1.5),
        ]));
        let one_outside = Geometry::MultiPoint(MultiPoint::new(vec![
            Point::new(0.5, 0.5),
            Point::new(5.0, 5.0),
        ]));

        assert!(boolean_intersects(&area, &all_inside).unwrap());
        assert!(!boolean_intersects(&area, &one_outside).unwrap());
    }

    #[test]
    fn unsupported_operands_fail() {
        let area = Geometry::Polygon(square());
        let point = Geometry::Point(Point::new(0.0, 0.0));

        assert!(matches!(
            boolean_intersects(&point, &area),
            Err(Error::UnsupportedGeometry("Point"))
        ));
    }

    #[test]
    fn decompose_splits_multis() {
        let multi = Geometry::MultiPoint(MultiPoint::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
        ]));
        assert_eq!(decompose(&multi).len(), 2);
        assert_eq!(decompose(&Geometry::Polygon(square())).len(), 1);
    }
}
