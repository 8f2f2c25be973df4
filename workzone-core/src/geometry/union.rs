//! Polygon unions with topology-exception recovery.
//!
//! The boolean backend reports numerically degenerate input by producing
//! an empty or non-finite result instead of raising. The recovery policy
//! is the only retry in the engine: pad every input once by a small
//! epsilon and try again, then propagate.

use geo::{BooleanOps, CoordsIter, Geometry, MultiPolygon, Polygon};
use log::warn;

use super::buffer::{buffer, dilation_parts};
use super::meters_to_degrees;
use crate::error::Error;

fn raw_union(polygons: &[Polygon<f64>]) -> Result<MultiPolygon<f64>, Error> {
    let mut result = MultiPolygon::new(vec![polygons[0].clone()]);
    for polygon in &polygons[1..] {
        result = result.union(&MultiPolygon::new(vec![polygon.clone()]));
    }
    Ok(result)
}

fn checked(result: MultiPolygon<f64>) -> Result<MultiPolygon<f64>, Error> {
    if result.0.is_empty() {
        return Err(Error::Topology(
            "union of non-empty input produced an empty result".into(),
        ));
    }
    if result
        .coords_iter()
        .any(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Err(Error::Topology(
            "union produced non-finite coordinates".into(),
        ));
    }
    Ok(result)
}

/// Union with the one-shot epsilon-padding retry. Generic over the raw
/// union step so the retry behaviour is testable in isolation; `epsilon`
/// is in the input's coordinate units.
pub(crate) fn union_with<F>(
    polygons: &[Polygon<f64>],
    epsilon: f64,
    raw: F,
) -> Result<MultiPolygon<f64>, Error>
where
    F: Fn(&[Polygon<f64>]) -> Result<MultiPolygon<f64>, Error>,
{
    if polygons.is_empty() {
        return Ok(MultiPolygon::new(Vec::new()));
    }

    let first_failure = match raw(polygons).and_then(checked) {
        Ok(result) => return Ok(result),
        Err(err) => err,
    };

    warn!("polygon union failed ({first_failure}); retrying once with {epsilon} padding");
    let padded: Vec<Polygon<f64>> = polygons
        .iter()
        .flat_map(|p| dilation_parts(p, epsilon))
        .collect();
    raw(&padded)
        .and_then(checked)
        .map_err(|err| Error::Topology(format!("union failed after padded retry: {err}")))
}

/// Union in an already-metric (local planar) space, used by the buffer
/// construction where coordinates are meters.
pub(crate) fn union_metric(
    polygons: &[Polygon<f64>],
    epsilon_m: f64,
) -> Result<MultiPolygon<f64>, Error> {
    union_with(polygons, epsilon_m, raw_union)
}

/// Unions a set of polygons in lon/lat space. `epsilon_m` is the metric
/// padding applied on the single recovery retry.
pub fn union_polygons(
    polygons: &[Polygon<f64>],
    epsilon_m: f64,
) -> Result<MultiPolygon<f64>, Error> {
    union_with(polygons, meters_to_degrees(epsilon_m), raw_union)
}

/// Collapses a multi-polygon into one polygon: each component is buffered
/// by `buffer_m` and the results are unioned. When the parts stay apart
/// even buffered, the first component is returned unbuffered — a lossy,
/// deterministic fallback that callers must treat as such.
pub fn multi_polygon_to_single_polygon(
    multi: &MultiPolygon<f64>,
    buffer_m: f64,
    epsilon_m: f64,
) -> Result<Polygon<f64>, Error> {
    let Some(first) = multi.0.first() else {
        return Err(Error::InvalidData(
            "cannot collapse an empty multi-polygon".into(),
        ));
    };
    if multi.0.len() == 1 {
        return Ok(first.clone());
    }

    let mut buffered = Vec::new();
    for polygon in &multi.0 {
        let parts = buffer(&Geometry::Polygon(polygon.clone()), buffer_m)?;
        buffered.extend(parts.0);
    }
    let fused = union_polygons(&buffered, epsilon_m)?;
    if fused.0.len() == 1 {
        let mut polygons = fused.0;
        return Ok(polygons.remove(0));
    }

    warn!(
        "multi-polygon collapse left {} disjoint parts; keeping the first component",
        fused.0.len()
    );
    Ok(first.clone())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use geo::{Area, polygon};

    use super::*;

    fn unit_square(offset_x: f64) -> Polygon<f64> {
        polygon![
            (x: offset_x, y: 0.0),
            (x: offset_x + 1.0, y: 0.0),
            (x: offset_x + 1.0, y: 1.0),
            (x: offset_x, y: 1.0),
        ]
    }

    #[test]
    fn union_never_shrinks() {
        let a = unit_square(0.0);
        let b = unit_square(0.5);
        let c = unit_square(1.0);
        let max_input = a.unsigned_area();

        let result = union_polygons(&[a, b, c], 0.25).unwrap();
        assert!(result.unsigned_area() >= max_input);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let result = union_polygons(&[], 0.25).unwrap();
        assert!(result.0.is_empty());
    }

    #[test]
    fn failing_union_is_retried_exactly_once() {
        let calls = Cell::new(0u32);
        let failing = |_: &[Polygon<f64>]| {
            calls.set(calls.get() + 1);
            Err(Error::Topology("forced".into()))
        };

        let result = union_with(&[unit_square(0.0)], 1e-6, failing);
        assert!(matches!(result, Err(Error::Topology(_))));
        // one initial attempt plus the single padded retry
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn degenerate_first_attempt_recovers_on_retry() {
        let calls = Cell::new(0u32);
        let flaky = |polys: &[Polygon<f64>]| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                // simulate a topology exception: empty output
                Ok(MultiPolygon::new(Vec::new()))
            } else {
                raw_union(polys)
            }
        };

        let result = union_with(&[unit_square(0.0), unit_square(0.5)], 1e-6, flaky).unwrap();
        assert_eq!(calls.get(), 2);
        assert!(result.unsigned_area() > 0.0);
    }

    #[test]
    fn collapse_keeps_first_component_when_parts_stay_apart() {
        // 0.25 m of buffering cannot bridge a one-degree gap
        let multi = MultiPolygon::new(vec![unit_square(0.0), unit_square(2.0)]);
        let collapsed = multi_polygon_to_single_polygon(&multi, 0.25, 0.25).unwrap();
        assert_eq!(collapsed, unit_square(0.0));
    }
}
