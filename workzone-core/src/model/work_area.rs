use geo::{Geometry, MultiPolygon, Polygon};

/// Area geometry of a work area.
///
/// Polygon and multi-polygon sources pass through the builder untouched,
/// so both shapes are representable; everything produced by combining or
/// linking is a single `Polygon`.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl AreaGeometry {
    pub fn to_geometry(&self) -> Geometry<f64> {
        match self {
            AreaGeometry::Polygon(p) => Geometry::Polygon(p.clone()),
            AreaGeometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.clone()),
        }
    }

    /// The component polygons, one for a single polygon.
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            AreaGeometry::Polygon(p) => std::slice::from_ref(p),
            AreaGeometry::MultiPolygon(mp) => &mp.0,
        }
    }
}

/// The ground footprint of influence of an asset, intervention, or
/// project.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkArea {
    pub geometry: AreaGeometry,
    /// Set when the geometry was produced by combining multiple source
    /// features into one area.
    pub is_unified: bool,
}

impl WorkArea {
    pub fn from_polygon(polygon: Polygon<f64>, is_unified: bool) -> Self {
        Self {
            geometry: AreaGeometry::Polygon(polygon),
            is_unified,
        }
    }

    pub fn from_multi_polygon(multi: MultiPolygon<f64>, is_unified: bool) -> Self {
        Self {
            geometry: AreaGeometry::MultiPolygon(multi),
            is_unified,
        }
    }
}
