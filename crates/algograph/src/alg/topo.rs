//! Depth-first finish order and topological sort.

use crate::graph::{Graph, NodeHandle};

/// Depth-first postorder over every node, starting roots in table order.
///
/// Neighbors are visited in connection order, so the result matches a recursive DFS exactly. The
/// traversal keeps its own stack and does not recurse.
pub(crate) fn finish_order<N>(g: &Graph<N>) -> Vec<usize> {
    let n = g.node_count();
    let mut visited = vec![false; n];
    let mut finished: Vec<usize> = Vec::with_capacity(n);
    // (node, next neighbor cursor)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let next = g.out_map(v).get_index(top.1).map(|(&w, _)| w);
            match next {
                Some(w) => {
                    top.1 += 1;
                    if !visited[w] {
                        visited[w] = true;
                        stack.push((w, 0));
                    }
                }
                None => {
                    stack.pop();
                    finished.push(v);
                }
            }
        }
    }

    finished
}

/// Nodes in depth-first postorder.
pub fn postorder<N>(g: &Graph<N>) -> Vec<NodeHandle> {
    finish_order(g)
        .into_iter()
        .map(|ix| g.handle_for(ix))
        .collect()
}

impl<N> Graph<N> {
    /// Orders the nodes so every edge points forward. O(V + E).
    ///
    /// Only meaningful on a directed acyclic graph. A cyclic graph still yields a total order (the
    /// reversed DFS finish order) but some edges will point backward; cycles are not detected.
    pub fn topological_sort(&self) -> Vec<NodeHandle> {
        tracing::debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            "topological sort"
        );
        let mut order = finish_order(self);
        order.reverse();
        order.into_iter().map(|ix| self.handle_for(ix)).collect()
    }
}
