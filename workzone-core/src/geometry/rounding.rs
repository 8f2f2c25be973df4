use geo::{Coord, MapCoords};

/// Rounds every coordinate to `1/10^digits`, returning a new geometry.
///
/// The path-finding graph matches vertices by exact coordinate equality,
/// so snap points and road lines must go through the same rounding. Pure
/// by design: the same feature list is reused across the builder and the
/// linker, and in-place mutation would alias.
pub fn round_coordinates<G>(geometry: &G, digits: u32) -> G
where
    G: MapCoords<f64, f64, Output = G>,
{
    let factor = 10f64.powi(digits as i32);
    geometry.map_coords(|c| Coord {
        x: round_value(c.x, factor),
        y: round_value(c.y, factor),
    })
}

pub(crate) fn round_value(value: f64, factor: f64) -> f64 {
    // `+ 0.0` normalizes -0.0, which would otherwise break bit-level
    // coordinate keys in the path graph
    (value * factor).round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;

    #[test]
    fn rounds_to_the_requested_precision() {
        let line = line_string![
            (x: -73.561_234_567, y: 45.512_345_678),
            (x: -73.561_299_999, y: 45.512_300_001),
        ];
        let rounded = round_coordinates(&line, 5);

        assert_eq!(rounded.0[0], geo::Coord { x: -73.56123, y: 45.51235 });
        assert_eq!(rounded.0[1], geo::Coord { x: -73.5613, y: 45.5123 });
        // the input is untouched
        assert_eq!(line.0[0].x, -73.561_234_567);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let line = line_string![(x: -0.000_000_1, y: 0.0)];
        let rounded = round_coordinates(&line, 5);
        assert!(rounded.0[0].x.to_bits() == 0.0f64.to_bits());
    }
}
