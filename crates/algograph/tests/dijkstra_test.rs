use algograph::{Distance, Error, Graph, GraphKind, NodeHandle};
use proptest::prelude::*;

/// CLRS figure 24.6.
fn clrs_graph() -> (Graph<char>, Vec<NodeHandle>) {
    let mut g: Graph<char> = Graph::directed();
    let nodes: Vec<NodeHandle> = "stxyz".chars().map(|c| g.make_node_with(c)).collect();
    let (s, t, x, y, z) = (nodes[0], nodes[1], nodes[2], nodes[3], nodes[4]);
    for (from, to, w) in [
        (s, t, 10),
        (s, y, 5),
        (t, x, 1),
        (t, y, 2),
        (x, z, 4),
        (y, t, 3),
        (y, x, 9),
        (y, z, 2),
        (z, s, 7),
        (z, x, 6),
    ] {
        g.connect_weight(from, to, w).unwrap();
    }
    (g, nodes)
}

#[test]
fn shortest_paths_match_the_textbook_distances() {
    let (g, nodes) = clrs_graph();
    let paths = g.shortest_paths(nodes[0]).unwrap();

    let distances: Vec<Option<i64>> = nodes
        .iter()
        .map(|&h| paths.distance(h).and_then(Distance::finite))
        .collect();
    assert_eq!(distances, vec![Some(0), Some(8), Some(9), Some(5), Some(7)]);
    assert!(paths.reaches_all());
    assert_eq!(paths.source(), nodes[0]);
    assert_eq!(paths.len(), 5);
}

#[test]
fn shortest_paths_reconstruct_the_edge_sequence() {
    let (g, nodes) = clrs_graph();
    let (s, t, x, y) = (nodes[0], nodes[1], nodes[2], nodes[3]);
    let paths = g.shortest_paths(s).unwrap();

    let to_x = paths.get(x).unwrap();
    let hops: Vec<(NodeHandle, NodeHandle, i64)> =
        to_x.edges.iter().map(|e| (e.from, e.to, e.weight)).collect();
    assert_eq!(hops, vec![(s, y, 5), (y, t, 3), (t, x, 1)]);
    assert_eq!(to_x.weight, Distance::Finite(9));

    let to_s = paths.get(s).unwrap();
    assert!(to_s.edges.is_empty());
    assert_eq!(to_s.weight, Distance::Finite(0));
}

#[test]
fn unreachable_nodes_report_infinite_distance() {
    let mut g: Graph = Graph::directed();
    let a = g.make_node();
    let b = g.make_node();
    let c = g.make_node();
    g.connect_weight(a, b, 3).unwrap();
    g.connect_weight(c, a, 1).unwrap();

    let paths = g.shortest_paths(a).unwrap();
    let to_c = paths.get(c).unwrap();
    assert_eq!(to_c.weight, Distance::Infinite);
    assert!(!to_c.is_reachable());
    assert!(to_c.edges.is_empty());
    assert!(!paths.reaches_all());
    assert_eq!(Distance::Infinite.to_string(), "inf");
}

#[test]
fn negative_edges_abort_the_search() {
    let mut g: Graph = Graph::directed();
    let a = g.make_node();
    let b = g.make_node();
    let c = g.make_node();
    g.connect_weight(a, b, 2).unwrap();
    g.connect_weight(b, c, -1).unwrap();

    let err = g.shortest_paths(a).unwrap_err();
    match err {
        Error::NegativeWeight { from, to, weight } => {
            assert_eq!((from, to, weight), (b, c, -1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn path_lengths_beyond_i64_are_reported_instead_of_clamped() {
    let mut g: Graph = Graph::directed();
    let a = g.make_node();
    let b = g.make_node();
    let c = g.make_node();
    let half = i64::MAX / 2 + 1;
    g.connect_weight(a, b, half).unwrap();
    g.connect_weight(b, c, half).unwrap();

    match g.shortest_paths(a).unwrap_err() {
        Error::DistanceOverflow { from, to } => assert_eq!((from, to), (b, c)),
        other => panic!("unexpected error: {other}"),
    }

    // One hop below the ceiling is still exact.
    g.connect_weight(b, c, half - 2).unwrap();
    let paths = g.shortest_paths(a).unwrap();
    assert_eq!(paths.distance(c), Some(Distance::Finite(i64::MAX - 1)));
}

#[test]
fn shortest_paths_reject_stale_sources() {
    let mut g: Graph = Graph::undirected();
    let a = g.make_node();
    g.make_node();
    g.remove_node(a).unwrap();
    assert!(matches!(
        g.shortest_paths(a),
        Err(Error::InvalidHandle { .. })
    ));
}

#[test]
fn undirected_shortest_paths_travel_both_ways() {
    let mut g: Graph = Graph::new(GraphKind::Undirected);
    let a = g.make_node();
    let b = g.make_node();
    let c = g.make_node();
    g.connect_weight(b, a, 4).unwrap();
    g.connect_weight(c, b, 1).unwrap();
    g.connect_weight(a, c, 7).unwrap();

    let paths = g.shortest_paths(a).unwrap();
    assert_eq!(paths.distance(c), Some(Distance::Finite(5)));
}

proptest! {
    #[test]
    fn distances_are_consistent_with_parent_edges(
        n in 1usize..20,
        edges in proptest::collection::vec((0usize..20, 0usize..20, 0i64..50), 0..80),
        directed in any::<bool>(),
    ) {
        let kind = if directed { GraphKind::Directed } else { GraphKind::Undirected };
        let mut g: Graph = Graph::new(kind);
        let handles: Vec<NodeHandle> = (0..n).map(|_| g.make_node()).collect();
        for (u, v, w) in edges {
            g.connect_weight(handles[u % n], handles[v % n], w).unwrap();
        }

        let source = handles[0];
        let paths = g.shortest_paths(source).unwrap();
        prop_assert_eq!(paths.distance(source), Some(Distance::Finite(0)));

        for (target, path) in paths.iter() {
            let Some(last) = path.edges.last() else { continue };
            prop_assert_eq!(last.to, target);
            let parent = paths.distance(last.from).and_then(Distance::finite).unwrap();
            let weight = g.edge_weight(last.from, target).unwrap().unwrap();
            prop_assert_eq!(path.weight, Distance::Finite(parent + weight));
            prop_assert_eq!(path.weight.finite(), Some(path.edges.iter().map(|e| e.weight).sum::<i64>()));
        }

        // No edge can shorten a settled distance.
        for e in g.edges() {
            for (from, to) in [(e.from, e.to), (e.to, e.from)] {
                if directed && from != e.from {
                    continue;
                }
                if let Some(d) = paths.distance(from).and_then(Distance::finite) {
                    prop_assert!(paths.distance(to).unwrap() <= Distance::Finite(d + e.weight));
                }
            }
        }
    }
}
