//! Minimum spanning tree (Prim).

use super::Distance;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeHandle};
use crate::heap::{HeapOrder, IndexedHeap};

#[derive(Debug, Clone)]
pub struct SpanningTree {
    pub root: NodeHandle,
    /// `(parent -> node)` for every node that joined the tree, in the order they joined.
    pub edges: Vec<Edge>,
    node_count: usize,
}

impl SpanningTree {
    pub fn total_weight(&self) -> i64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// `false` when the graph is disconnected and the tree only covers the root's component.
    pub fn is_spanning(&self) -> bool {
        self.edges.len() + 1 == self.node_count
    }
}

impl<N> Graph<N> {
    /// Minimum spanning tree rooted at the first node in the table.
    pub fn minimum_spanning_tree(&self) -> Result<SpanningTree> {
        let Some(root) = self.handle_at(0) else {
            return Err(Error::unsupported(
                "minimum_spanning_tree",
                "graph has fewer than 2 nodes",
            ));
        };
        self.minimum_spanning_tree_from(root)
    }

    /// Minimum spanning tree of `root`'s component. O(E log V).
    ///
    /// Requires an undirected graph with at least two nodes. Negative weights are fine.
    pub fn minimum_spanning_tree_from(&self, root: NodeHandle) -> Result<SpanningTree> {
        if self.is_directed() {
            return Err(Error::unsupported(
                "minimum_spanning_tree",
                "graph is directed",
            ));
        }
        if self.node_count() < 2 {
            return Err(Error::unsupported(
                "minimum_spanning_tree",
                "graph has fewer than 2 nodes",
            ));
        }
        let r = self.resolve(root)?;
        let n = self.node_count();
        tracing::debug!(nodes = n, edges = self.edge_count(), "prim");

        let mut key = vec![Distance::Infinite; n];
        key[r] = Distance::Finite(0);
        let mut parent: Vec<Option<(usize, i64)>> = vec![None; n];
        let mut heap = IndexedHeap::from_items(HeapOrder::Min, (0..n).map(|ix| (key[ix], ix)));
        let mut edges: Vec<Edge> = Vec::with_capacity(n - 1);

        while let Some((k, v)) = heap.pop() {
            // Everything left is outside the root's component.
            if !k.is_finite() {
                break;
            }
            if let Some((p, weight)) = parent[v] {
                edges.push(Edge::new(self.handle_for(p), self.handle_for(v), weight));
            }
            for (&w, &weight) in self.out_map(v) {
                let candidate = Distance::Finite(weight);
                if heap.contains(w) && candidate < key[w] {
                    key[w] = candidate;
                    heap.decrease_key(w, candidate);
                    parent[w] = Some((v, weight));
                }
            }
        }

        Ok(SpanningTree {
            root,
            edges,
            node_count: n,
        })
    }
}
