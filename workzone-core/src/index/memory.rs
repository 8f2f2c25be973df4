//! In-memory feature index backed by an R-tree.
//!
//! Backs the engine's tests and lets callers run the pipeline against a
//! pre-fetched feature set without a network hop.

use geo::{BoundingRect, Geometry, Intersects};
use rstar::{AABB, RTree, RTreeObject};

use super::FeatureIndex;
use crate::error::Error;
use crate::geometry::{buffer, meters_to_degrees, meters_to_degrees_lon};
use crate::model::{Feature, LayerId, RequestContext};

struct IndexedEntry {
    env: AABB<[f64; 2]>,
    idx: usize,
}

impl RTreeObject for IndexedEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.env
    }
}

pub struct MemoryFeatureIndex {
    entries: Vec<(LayerId, Feature)>,
    tree: RTree<IndexedEntry>,
}

impl MemoryFeatureIndex {
    pub fn new(entries: Vec<(LayerId, Feature)>) -> Self {
        let items = entries
            .iter()
            .enumerate()
            .filter_map(|(idx, (_, feature))| {
                feature.geometry.bounding_rect().map(|rect| IndexedEntry {
                    env: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                    idx,
                })
            })
            .collect();
        Self {
            entries,
            tree: RTree::bulk_load(items),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidate entry indices whose envelope reaches the padded query
    /// envelope, in insertion order so callers get deterministic
    /// tie-breaking.
    fn candidates(&self, geometry: &Geometry<f64>, pad_m: f64) -> Vec<usize> {
        let Some(rect) = geometry.bounding_rect() else {
            return Vec::new();
        };
        let pad_y = meters_to_degrees(pad_m);
        let pad_x = meters_to_degrees_lon(pad_m, rect.min().y);
        let query = AABB::from_corners(
            [rect.min().x - pad_x, rect.min().y - pad_y],
            [rect.max().x + pad_x, rect.max().y + pad_y],
        );

        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.idx)
            .collect();
        hits.sort_unstable();
        hits
    }

    fn in_layers(&self, idx: usize, layers: &[LayerId]) -> bool {
        layers.contains(&self.entries[idx].0)
    }
}

impl FeatureIndex for MemoryFeatureIndex {
    async fn query_nearby(
        &self,
        _ctx: &RequestContext,
        geometry: &Geometry<f64>,
        layers: &[LayerId],
        tolerance_m: f64,
    ) -> Result<Vec<Feature>, Error> {
        let probe = if tolerance_m > 0.0 {
            Geometry::MultiPolygon(buffer(geometry, tolerance_m)?)
        } else {
            geometry.clone()
        };

        Ok(self
            .candidates(geometry, tolerance_m.max(0.0))
            .into_iter()
            .filter(|&idx| self.in_layers(idx, layers))
            .filter(|&idx| probe.intersects(&self.entries[idx].1.geometry))
            .map(|idx| self.entries[idx].1.clone())
            .collect())
    }

    async fn query_intersecting(
        &self,
        _ctx: &RequestContext,
        geometry: &Geometry<f64>,
        layers: &[LayerId],
    ) -> Result<Vec<Feature>, Error> {
        Ok(self
            .candidates(geometry, 0.0)
            .into_iter()
            .filter(|&idx| self.in_layers(idx, layers))
            .filter(|&idx| geometry.intersects(&self.entries[idx].1.geometry))
            .map(|idx| self.entries[idx].1.clone())
            .collect())
    }

    async fn query_by_ids(
        &self,
        _ctx: &RequestContext,
        ids: &[String],
        id_key: &str,
        layers: &[LayerId],
    ) -> Result<Vec<Feature>, Error> {
        Ok(self
            .entries
            .iter()
            .filter(|(layer, _)| layers.contains(layer))
            .filter(|(_, feature)| {
                let key = if id_key == "id" {
                    Some(feature.id.as_str())
                } else {
                    feature.property_str(id_key)
                };
                key.is_some_and(|k| ids.iter().any(|id| id == k))
            })
            .map(|(_, feature)| feature.clone())
            .collect())
    }
}
