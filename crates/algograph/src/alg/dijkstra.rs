//! Single-source shortest paths (Dijkstra).

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeHandle};
use crate::heap::{HeapOrder, IndexedHeap};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt;

/// A path length, or `Infinite` for an unreachable node. `Finite(_)` orders before `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(i64),
    Infinite,
}

impl Distance {
    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn finite(self) -> Option<i64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    /// `None` when a finite sum leaves the `i64` range; `Infinite` absorbs everything.
    pub fn checked_add(self, weight: i64) -> Option<Self> {
        match self {
            Distance::Finite(d) => d.checked_add(weight).map(Distance::Finite),
            Distance::Infinite => Some(Distance::Infinite),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Infinite => f.write_str("inf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub weight: Distance,
    /// Edges from the source to the target, in travel order. Empty for the source itself and for
    /// unreachable nodes.
    pub edges: Vec<Edge>,
}

impl Path {
    pub fn is_reachable(&self) -> bool {
        self.weight.is_finite()
    }
}

#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: NodeHandle,
    paths: IndexMap<NodeHandle, Path, FxBuildHasher>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeHandle {
        self.source
    }

    pub fn get(&self, target: NodeHandle) -> Option<&Path> {
        self.paths.get(&target)
    }

    pub fn distance(&self, target: NodeHandle) -> Option<Distance> {
        self.get(target).map(|p| p.weight)
    }

    /// Paths for every node, in node table order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Path)> + '_ {
        self.paths.iter().map(|(h, p)| (*h, p))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether every node is reachable from the source.
    pub fn reaches_all(&self) -> bool {
        self.paths.values().all(Path::is_reachable)
    }
}

impl<N> Graph<N> {
    /// Shortest paths from `source` to every node.
    ///
    /// Fails with [`Error::NegativeWeight`] as soon as a negative edge is relaxed, and with
    /// [`Error::DistanceOverflow`] when a path length does not fit in `i64`. O(E log V).
    pub fn shortest_paths(&self, source: NodeHandle) -> Result<ShortestPaths> {
        let s = self.resolve(source)?;
        let n = self.node_count();
        tracing::debug!(nodes = n, edges = self.edge_count(), "dijkstra");

        let mut dist = vec![Distance::Infinite; n];
        dist[s] = Distance::Finite(0);
        let mut parent: Vec<Option<(usize, i64)>> = vec![None; n];
        let mut heap = IndexedHeap::from_items(HeapOrder::Min, (0..n).map(|ix| (dist[ix], ix)));

        while let Some((key, v)) = heap.pop() {
            if !key.is_finite() {
                continue;
            }
            for (&w, &weight) in self.out_map(v) {
                if weight < 0 {
                    return Err(Error::NegativeWeight {
                        from: self.handle_for(v),
                        to: self.handle_for(w),
                        weight,
                    });
                }
                if !heap.contains(w) {
                    continue;
                }
                let Some(candidate) = key.checked_add(weight) else {
                    return Err(Error::DistanceOverflow {
                        from: self.handle_for(v),
                        to: self.handle_for(w),
                    });
                };
                if candidate < dist[w] {
                    dist[w] = candidate;
                    heap.decrease_key(w, candidate);
                    parent[w] = Some((v, weight));
                }
            }
        }

        let mut paths: IndexMap<NodeHandle, Path, FxBuildHasher> =
            IndexMap::with_capacity_and_hasher(n, FxBuildHasher);
        for target in 0..n {
            let mut edges: Vec<Edge> = Vec::new();
            let mut at = target;
            while let Some((from, weight)) = parent[at] {
                edges.push(Edge::new(
                    self.handle_for(from),
                    self.handle_for(at),
                    weight,
                ));
                at = from;
            }
            edges.reverse();
            paths.insert(
                self.handle_for(target),
                Path {
                    weight: dist[target],
                    edges,
                },
            );
        }

        Ok(ShortestPaths { source, paths })
    }
}
