//! Geometry kernel: primitive operations shared by the work-area builder,
//! the road-network linker, and the street analysis.
//!
//! Coordinates are lon/lat (WGS-84). Metric distances are converted with a
//! cos-latitude degree approximation for constructions and measured with
//! the haversine formula for reporting.

pub mod buffer;
pub mod intersect;
pub mod nearest;
pub mod rounding;
pub mod union;

pub use buffer::buffer;
pub use intersect::{boolean_intersects, decompose};
pub use nearest::{nearest_point_on_line, shortest_segment_between};
pub use rounding::round_coordinates;
pub use union::{multi_polygon_to_single_polygon, union_polygons};

use geo::{Coord, Geometry};

/// Mean length of one degree of latitude, meters.
pub(crate) const METERS_PER_DEGREE: f64 = 111_320.0;

/// Geometry tag name, for error reporting.
pub(crate) fn tag_of(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Degree equivalent of a metric distance along the latitude axis.
pub(crate) fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Degree equivalent of a metric distance along the longitude axis at the
/// given latitude.
pub(crate) fn meters_to_degrees_lon(meters: f64, latitude: f64) -> f64 {
    let scale = latitude.to_radians().cos().abs().max(0.01);
    meters / (METERS_PER_DEGREE * scale)
}

/// Local planar frame anchored at `origin`, mapping lon/lat degrees to
/// meters so metric constructions stay isotropic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocalFrame {
    origin: Coord<f64>,
    lon_scale: f64,
}

impl LocalFrame {
    pub(crate) fn anchored_at(origin: Coord<f64>) -> Self {
        Self {
            origin,
            lon_scale: origin.y.to_radians().cos().abs().max(0.01),
        }
    }

    pub(crate) fn to_local(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (c.x - self.origin.x) * METERS_PER_DEGREE * self.lon_scale,
            y: (c.y - self.origin.y) * METERS_PER_DEGREE,
        }
    }

    pub(crate) fn to_geographic(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.origin.x + c.x / (METERS_PER_DEGREE * self.lon_scale),
            y: self.origin.y + c.y / METERS_PER_DEGREE,
        }
    }
}
