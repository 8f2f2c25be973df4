mod common;

use common::{hline, m, pavement, rect, road_section, square};
use geo::{Contains, Point};
use workzone_core::prelude::*;
use workzone_core::Error;

fn cfg() -> EngineConfig {
    EngineConfig::default()
}

fn ctx() -> RequestContext {
    RequestContext::new("test")
}

#[tokio::test]
async fn overlapping_inputs_collapse_to_one_buffered_polygon() {
    let polygons = vec![square(0.0, 0.0, 5.0), square(4.0, 0.0, 5.0)];

    let area = build_multi_polygon_work_area(
        &MemoryFeatureIndex::empty(),
        &ctx(),
        &polygons,
        1.0,
        &cfg(),
    )
    .await
    .unwrap();

    assert!(area.contains(&Point::new(0.0, 0.0)));
    assert!(area.contains(&Point::new(m(4.0), 0.0)));
    // the 1 m outer buffer extends past the raw union
    assert!(area.contains(&Point::new(m(-5.5), 0.0)));
}

#[tokio::test]
async fn disjoint_components_without_roads_get_a_straight_bridge() {
    // no road sections anywhere: the components are bridged by a buffered
    // hairline segment between their nearest corners
    let p1 = square(1.0, 1.0, 1.0);
    let p2 = square(21.0, 1.0, 1.0);

    let area = build_multi_polygon_work_area(
        &MemoryFeatureIndex::empty(),
        &ctx(),
        &[p1, p2],
        1.0,
        &cfg(),
    )
    .await
    .unwrap();

    assert!(area.contains(&Point::new(m(1.0), m(1.0))));
    assert!(area.contains(&Point::new(m(21.0), m(1.0))));
    // midway along the bridge, inside only thanks to the link + buffer
    assert!(area.contains(&Point::new(m(11.0), m(0.0))));
}

#[tokio::test]
async fn road_path_expands_into_a_pavement_corridor() {
    let layers = NetworkLayers::default();
    let index = MemoryFeatureIndex::new(vec![
        (
            layers.road_sections.clone(),
            road_section("rs-1", "Rue Principale", "A", "B", hline(1.0, 1.0, 21.0)),
        ),
        (
            layers.pavement.clone(),
            pavement("pav-1", "R9", rect(-1.0, 0.0, 23.0, 2.0)),
        ),
    ]);

    let p1 = square(1.0, 1.0, 1.0);
    let p2 = square(21.0, 1.0, 1.0);

    let area = build_multi_polygon_work_area(&index, &ctx(), &[p1, p2], 1.0, &cfg())
        .await
        .unwrap();

    // the corridor pavement connects the two components along the road
    assert!(area.contains(&Point::new(m(11.0), m(1.0))));
    assert!(area.contains(&Point::new(m(1.0), m(1.0))));
    assert!(area.contains(&Point::new(m(21.0), m(1.0))));
}

#[tokio::test]
async fn at_least_one_polygon_is_required() {
    let result = build_multi_polygon_work_area(
        &MemoryFeatureIndex::empty(),
        &ctx(),
        &[],
        1.0,
        &cfg(),
    )
    .await;

    assert!(matches!(result, Err(Error::InvalidData(_))));
}
