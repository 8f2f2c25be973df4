//! Path-finding graph over road-section lines.
//!
//! Vertices are matched by exact coordinate equality, which is why every
//! line and snap point goes through the shared rounding first.

use std::{cmp::Ordering, collections::BinaryHeap};

use geo::{Coord, Distance, Haversine, LineString, Point};
use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};

/// Edge weight in centimeters, so costs stay integral for the heap.
#[derive(Debug, Clone, Copy)]
struct RoadEdge {
    weight: u32,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: u32,
    node: NodeIndex,
}

// Min-heap by cost (reversed from the standard BinaryHeap ordering)
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) struct RoadGraph {
    graph: UnGraph<Coord<f64>, RoadEdge>,
    nodes: HashMap<(u64, u64), NodeIndex>,
}

impl RoadGraph {
    pub(crate) fn from_lines(lines: &[LineString<f64>]) -> Self {
        let mut graph = UnGraph::<Coord<f64>, RoadEdge>::new_undirected();
        let mut nodes: HashMap<(u64, u64), NodeIndex> = HashMap::new();

        let mut intern = |graph: &mut UnGraph<Coord<f64>, RoadEdge>, c: Coord<f64>| {
            *nodes.entry(key(c)).or_insert_with(|| graph.add_node(c))
        };

        for line in lines {
            for (a, b) in line.0.iter().tuple_windows() {
                if a == b {
                    continue;
                }
                let na = intern(&mut graph, *a);
                let nb = intern(&mut graph, *b);
                let meters = Haversine.distance(Point::from(*a), Point::from(*b));
                let weight = ((meters * 100.0).round() as u32).max(1);
                graph.add_edge(na, nb, RoadEdge { weight });
            }
        }

        Self { graph, nodes }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Shortest path between two graph vertices as a coordinate list.
    /// `None` when either endpoint is not a vertex or no route exists —
    /// an expected outcome, not an error.
    pub(crate) fn shortest_path(&self, from: Coord<f64>, to: Coord<f64>) -> Option<Vec<Coord<f64>>> {
        let start = *self.nodes.get(&key(from))?;
        let target = *self.nodes.get(&key(to))?;

        let mut distances: HashMap<NodeIndex, u32> = HashMap::new();
        let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut heap = BinaryHeap::new();

        heap.push(State {
            cost: 0,
            node: start,
        });
        distances.insert(start, 0);

        while let Some(State { cost, node }) = heap.pop() {
            if node == target {
                break;
            }
            if let Some(&best) = distances.get(&node)
                && cost > best
            {
                continue;
            }

            for edge in self.graph.edges(node) {
                let next = edge.target();
                let next_cost = cost.saturating_add(edge.weight().weight);

                match distances.entry(next) {
                    hashbrown::hash_map::Entry::Vacant(entry) => {
                        entry.insert(next_cost);
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                    hashbrown::hash_map::Entry::Occupied(mut entry) => {
                        if next_cost < *entry.get() {
                            *entry.get_mut() = next_cost;
                            predecessors.insert(next, node);
                            heap.push(State {
                                cost: next_cost,
                                node: next,
                            });
                        }
                    }
                }
            }
        }

        if target != start && !predecessors.contains_key(&target) {
            return None;
        }

        // follow predecessors backward from target to start
        let mut path = vec![target];
        let mut current = target;
        while current != start {
            current = *predecessors.get(&current)?;
            path.push(current);
        }
        path.reverse();

        Some(
            path.into_iter()
                .filter_map(|node| self.graph.node_weight(node).copied())
                .collect(),
        )
    }
}

fn key(c: Coord<f64>) -> (u64, u64) {
    (c.x.to_bits(), c.y.to_bits())
}
