//! Road-network classification and street naming for a work area.

mod chains;
mod summary;

use geo::{Area, BooleanOps, MultiPolygon};
use hashbrown::HashSet;
use log::debug;

use crate::config::EngineConfig;
use crate::error::Error;
use crate::geometry::buffer;
use crate::index::FeatureIndex;
use crate::model::{
    CrossStreet, Feature, RequestContext, RoadNetworkClass, StreetAnalysis, StreetSummary,
    WorkArea,
};
use chains::build_chains;
use summary::{line_length_m, summarize_chain};

/// Classifies a work area by the road sections it touches.
pub async fn classify<I: FeatureIndex>(
    index: &I,
    ctx: &RequestContext,
    work_area: &WorkArea,
    cfg: &EngineConfig,
) -> Result<RoadNetworkClass, Error> {
    let geometry = work_area.geometry.to_geometry();
    let sections = index
        .query_intersecting(ctx, &geometry, &[cfg.layers.road_sections.clone()])
        .await?;
    if sections.is_empty() {
        return Ok(RoadNetworkClass::OffRoadNetwork);
    }

    let ids: Vec<String> = sections.iter().map(|s| s.id.clone()).collect();
    let arterial = arterial_ids(index, ctx, &ids, cfg).await?;
    let arterial_count = ids.iter().filter(|id| arterial.contains(id.as_str())).count();
    Ok(class_from_counts(ids.len(), arterial_count))
}

/// Name of the longest road section; ties keep input order, the empty
/// string stands for "no sections".
pub fn suggested_street_name(road_sections: &[Feature]) -> String {
    let mut best: Option<(&Feature, f64)> = None;
    for section in road_sections {
        let length = line_length_m(&section.geometry);
        if best.is_none_or(|(_, max)| length > max) {
            best = Some((section, length));
        }
    }
    best.and_then(|(section, _)| section.name())
        .unwrap_or_default()
        .to_string()
}

/// Full street analysis: contiguous named streets, the main street, and
/// its cross streets.
pub async fn analyze_streets<I: FeatureIndex>(
    index: &I,
    ctx: &RequestContext,
    work_area: &WorkArea,
    cfg: &EngineConfig,
) -> Result<StreetAnalysis, Error> {
    let geometry = work_area.geometry.to_geometry();
    let sections = index
        .query_intersecting(ctx, &geometry, &[cfg.layers.road_sections.clone()])
        .await?;
    if sections.is_empty() {
        return Ok(StreetAnalysis {
            main_street: None,
            from: None,
            to: None,
            road_network_class: RoadNetworkClass::OffRoadNetwork,
            road_sections: Vec::new(),
        });
    }

    let ids: Vec<String> = sections.iter().map(|s| s.id.clone()).collect();
    let arterial = arterial_ids(index, ctx, &ids, cfg).await?;
    let arterial_count = ids.iter().filter(|id| arterial.contains(id.as_str())).count();
    let road_network_class = class_from_counts(ids.len(), arterial_count);

    // sections merely touching the boundary are not part of the area
    let mut kept: Vec<Feature> = Vec::new();
    for section in sections {
        if almost_in_area(&section, work_area, cfg)? {
            kept.push(section);
        }
    }
    debug!("street analysis keeps {} sections", kept.len());

    let refs: Vec<&Feature> = kept.iter().collect();
    let summaries: Vec<StreetSummary> = build_chains(&refs)
        .iter()
        .filter_map(|chain| summarize_chain(chain, &refs, work_area, &arterial))
        .collect();

    let main_street = select_main_street(&summaries).cloned();
    let (from, to) = main_street
        .as_ref()
        .map(|main| {
            (
                Some(CrossStreet {
                    name: main.from_name.clone(),
                    short_name: main.from_short_name.clone(),
                }),
                Some(CrossStreet {
                    name: main.to_name.clone(),
                    short_name: main.to_short_name.clone(),
                }),
            )
        })
        .unwrap_or((None, None));

    Ok(StreetAnalysis {
        main_street,
        from,
        to,
        road_network_class,
        road_sections: kept,
    })
}

async fn arterial_ids<I: FeatureIndex>(
    index: &I,
    ctx: &RequestContext,
    ids: &[String],
    cfg: &EngineConfig,
) -> Result<HashSet<String>, Error> {
    let features = index
        .query_by_ids(ctx, ids, "id", &[cfg.layers.arterial.clone()])
        .await?;
    Ok(features.into_iter().map(|f| f.id).collect())
}

fn class_from_counts(total: usize, arterial_count: usize) -> RoadNetworkClass {
    if total == 0 {
        RoadNetworkClass::OffRoadNetwork
    } else if arterial_count == 0 {
        RoadNetworkClass::Local
    } else if arterial_count == total {
        RoadNetworkClass::Arterial
    } else {
        RoadNetworkClass::ArterialLocal
    }
}

/// A section is "in" the area when most of its 1 m buffer overlaps it,
/// which excludes sections only grazing the boundary.
fn almost_in_area(
    section: &Feature,
    work_area: &WorkArea,
    cfg: &EngineConfig,
) -> Result<bool, Error> {
    let buffered = buffer(&section.geometry, cfg.asset_buffer_m)?;
    let buffered_area = buffered.unsigned_area();
    if buffered_area <= 0.0 {
        return Ok(false);
    }

    let area = MultiPolygon::new(work_area.geometry.polygons().to_vec());
    let overlap = buffered.intersection(&area);
    Ok(overlap.unsigned_area() / buffered_area > cfg.almost_in_area_ratio)
}

/// Greatest clipped length wins; total length breaks ties; remaining
/// ties keep the first summary encountered.
fn select_main_street(summaries: &[StreetSummary]) -> Option<&StreetSummary> {
    let mut best: Option<&StreetSummary> = None;
    for summary in summaries {
        let better = match best {
            None => true,
            Some(current) => {
                summary.length_within_area_m > current.length_within_area_m
                    || (summary.length_within_area_m == current.length_within_area_m
                        && summary.length_m > current.length_m)
            }
        };
        if better {
            best = Some(summary);
        }
    }
    best
}
