//! Shared fixtures: metric helpers and feature builders around the
//! equator so longitude and latitude degrees stay isotropic.
#![allow(dead_code)]

use geo::{Coord, Geometry, LineString, Polygon};
use workzone_core::{Feature, FeatureProps, IntersectionProps, PropertyMap, RoadSectionProps};

/// Meters to degrees near the equator.
pub fn m(meters: f64) -> f64 {
    meters / 111_320.0
}

/// Axis-aligned square centered on a metric coordinate.
pub fn square(cx_m: f64, cy_m: f64, half_m: f64) -> Polygon<f64> {
    let (cx, cy, h) = (m(cx_m), m(cy_m), m(half_m));
    Polygon::new(
        LineString::from(vec![
            (cx - h, cy - h),
            (cx + h, cy - h),
            (cx + h, cy + h),
            (cx - h, cy + h),
            (cx - h, cy - h),
        ]),
        Vec::new(),
    )
}

/// Axis-aligned rectangle given metric corner coordinates.
pub fn rect(x0_m: f64, y0_m: f64, x1_m: f64, y1_m: f64) -> Polygon<f64> {
    let (x0, y0, x1, y1) = (m(x0_m), m(y0_m), m(x1_m), m(y1_m));
    Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        Vec::new(),
    )
}

/// Horizontal line at `y_m` from `x0_m` to `x1_m`.
pub fn hline(y_m: f64, x0_m: f64, x1_m: f64) -> LineString<f64> {
    LineString::new(vec![
        Coord {
            x: m(x0_m),
            y: m(y_m),
        },
        Coord {
            x: m(x1_m),
            y: m(y_m),
        },
    ])
}

/// Vertical line at `x_m` from `y0_m` to `y1_m`.
pub fn vline(x_m: f64, y0_m: f64, y1_m: f64) -> LineString<f64> {
    LineString::new(vec![
        Coord {
            x: m(x_m),
            y: m(y0_m),
        },
        Coord {
            x: m(x_m),
            y: m(y1_m),
        },
    ])
}

pub fn road_section(
    id: &str,
    name: &str,
    from: &str,
    to: &str,
    line: LineString<f64>,
) -> Feature {
    Feature::new(
        id,
        Geometry::LineString(line),
        FeatureProps::RoadSection(RoadSectionProps {
            id: id.into(),
            name: name.into(),
            short_name: name.into(),
            from_name: from.into(),
            from_short_name: from.into(),
            to_name: to.into(),
            to_short_name: to.into(),
            road_id: None,
        }),
    )
}

/// Pavement-style polygon feature carrying a `roadId`.
pub fn pavement(id: &str, road_id: &str, polygon: Polygon<f64>) -> Feature {
    let mut props = PropertyMap::new();
    props.insert("roadId".into(), road_id.into());
    Feature::new(id, Geometry::Polygon(polygon), FeatureProps::Generic(props))
}

/// Junction polygon feature connecting two roads.
pub fn junction(id: &str, road_1: &str, road_2: &str, polygon: Polygon<f64>) -> Feature {
    Feature::new(
        id,
        Geometry::Polygon(polygon),
        FeatureProps::Intersection(IntersectionProps {
            road_id_1: road_1.into(),
            road_id_2: road_2.into(),
        }),
    )
}
