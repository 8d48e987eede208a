//! Strongly connected components (Kosaraju).

use super::topo::finish_order;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeHandle};

impl<N> Graph<N> {
    /// Partitions a directed graph into strongly connected components.
    ///
    /// Runs a DFS on the graph for finish order, then a DFS on the transpose in decreasing finish
    /// order; each tree of the second pass is one component. Components come out in that discovery
    /// order and nodes within a component are unordered. O(V + E).
    pub fn strongly_connected_components(&self) -> Result<Vec<Vec<NodeHandle>>> {
        if !self.is_directed() {
            return Err(Error::unsupported(
                "strongly_connected_components",
                "graph is undirected",
            ));
        }
        tracing::debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            "strongly connected components"
        );

        let finished = finish_order(self);
        let mut visited = vec![false; self.node_count()];
        let mut components: Vec<Vec<NodeHandle>> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        for &root in finished.iter().rev() {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            stack.push(root);

            let mut component: Vec<NodeHandle> = Vec::new();
            while let Some(v) = stack.pop() {
                component.push(self.handle_for(v));
                self.for_each_incoming(v, |u, _| {
                    if !visited[u] {
                        visited[u] = true;
                        stack.push(u);
                    }
                });
            }
            components.push(component);
        }

        Ok(components)
    }
}
