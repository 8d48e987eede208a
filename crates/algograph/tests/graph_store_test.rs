use algograph::{Error, Graph, GraphKind, NodeHandle};
use proptest::prelude::*;

fn assert_positions_match(g: &Graph<usize>) {
    for (ix, h) in g.nodes().enumerate() {
        assert_eq!(g.index_of(h).unwrap(), ix);
        assert_eq!(g.handle_at(ix), Some(h));
    }
    assert_eq!(g.handle_at(g.node_count()), None);
}

#[test]
fn graph_kind_parses_known_names_only() {
    assert_eq!("directed".parse::<GraphKind>().unwrap(), GraphKind::Directed);
    assert_eq!(
        "undirected".parse::<GraphKind>().unwrap(),
        GraphKind::Undirected
    );
    let err = "".parse::<GraphKind>().unwrap_err();
    assert!(matches!(err, Error::UnrecognizedKind { .. }));
    assert_eq!(err.to_string(), "Unrecognized graph kind: ");
    assert_eq!(GraphKind::Undirected.to_string(), "undirected");
}

#[test]
fn new_graph_is_empty() {
    for kind in [GraphKind::Directed, GraphKind::Undirected] {
        let g: Graph = Graph::new(kind);
        assert_eq!(g.kind(), kind);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.edges().is_empty());
    }
}

#[test]
fn make_node_assigns_positions_in_order() {
    let mut g: Graph<usize> = Graph::directed();
    let handles: Vec<NodeHandle> = (0..10).map(|i| g.make_node_with(i)).collect();
    for (i, h) in handles.iter().enumerate() {
        assert_eq!(g.index_of(*h).unwrap(), i);
        assert_eq!(*g.node(*h).unwrap(), i);
    }
    assert_positions_match(&g);
}

#[test]
fn connect_is_idempotent_and_updates_weight() {
    let mut g: Graph = Graph::directed();
    let a = g.make_node();
    let b = g.make_node();

    g.connect_weight(a, b, 1).unwrap();
    g.connect_weight(a, b, 4).unwrap();

    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.out_edges(a).unwrap().len(), 1);
    assert_eq!(g.edge_weight(a, b).unwrap(), Some(4));
    assert_eq!(g.edge_weight(b, a).unwrap(), None);
}

#[test]
fn foreign_handles_are_rejected() {
    let mut g: Graph = Graph::directed();
    let mut other: Graph = Graph::directed();
    let a = g.make_node();
    let foreign = other.make_node();

    assert!(!g.contains(foreign));
    assert!(matches!(
        g.connect(a, foreign),
        Err(Error::InvalidHandle { handle }) if handle == foreign
    ));
    assert!(matches!(g.neighbors(foreign), Err(Error::InvalidHandle { .. })));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn removed_handles_stay_stale_after_slot_reuse() {
    let mut g: Graph<&str> = Graph::undirected();
    let a = g.make_node_with("a");
    let b = g.make_node_with("b");

    assert_eq!(g.remove_node(a).unwrap(), "a");
    assert!(!g.contains(a));
    assert!(matches!(g.node(a), Err(Error::InvalidHandle { .. })));
    assert!(matches!(g.remove_node(a), Err(Error::InvalidHandle { .. })));

    let c = g.make_node_with("c");
    assert_ne!(a, c);
    assert!(!g.contains(a));
    assert_eq!(*g.node(c).unwrap(), "c");
    assert!(matches!(g.connect(a, b), Err(Error::InvalidHandle { .. })));
}

#[test]
fn remove_node_compacts_and_keeps_other_handles_valid() {
    let mut g: Graph<usize> = Graph::directed();
    let h: Vec<NodeHandle> = (0..5).map(|i| g.make_node_with(i)).collect();
    g.connect_weight(h[0], h[2], 1).unwrap();
    g.connect_weight(h[2], h[4], 2).unwrap();
    g.connect_weight(h[4], h[0], 3).unwrap();
    g.connect_weight(h[3], h[1], 4).unwrap();
    g.connect_weight(h[1], h[1], 5).unwrap();

    g.remove_node(h[1]).unwrap();

    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 3);
    assert_positions_match(&g);
    assert_eq!(g.index_of(h[4]).unwrap(), 3);
    assert_eq!(g.edge_weight(h[2], h[4]).unwrap(), Some(2));
    assert_eq!(g.edge_weight(h[4], h[0]).unwrap(), Some(3));
    assert!(g.out_edges(h[3]).unwrap().is_empty());
    assert_eq!(g.predecessors(h[0]).unwrap(), vec![h[4]]);
}

#[test]
fn node_labels_are_mutable() {
    let mut g: Graph<String> = Graph::directed();
    let a = g.make_node();
    g.node_mut(a).unwrap().push_str("shirt");
    assert_eq!(g.node(a).unwrap(), "shirt");
}

#[test]
fn transpose_reverses_directed_edges() {
    let mut g: Graph<char> = Graph::directed();
    let a = g.make_node_with('a');
    let b = g.make_node_with('b');
    let c = g.make_node_with('c');
    g.connect_weight(a, b, 1).unwrap();
    g.connect_weight(a, c, 2).unwrap();

    let t = g.transpose();
    let ta = t.handle_at(g.index_of(a).unwrap()).unwrap();
    let tb = t.handle_at(g.index_of(b).unwrap()).unwrap();
    let tc = t.handle_at(g.index_of(c).unwrap()).unwrap();

    assert_eq!(t.edge_count(), 2);
    assert_eq!(*t.node(ta).unwrap(), 'a');
    assert_eq!(t.edge_weight(tb, ta).unwrap(), Some(1));
    assert_eq!(t.edge_weight(tc, ta).unwrap(), Some(2));
    assert_eq!(t.edge_weight(ta, tb).unwrap(), None);
    assert!(!t.contains(a));
}

#[test]
fn predecessors_follow_mutations() {
    let mut g: Graph = Graph::directed();
    let a = g.make_node();
    let b = g.make_node();
    let c = g.make_node();
    g.connect(a, c).unwrap();
    assert_eq!(g.predecessors(c).unwrap(), vec![a]);

    g.connect(b, c).unwrap();
    assert_eq!(g.predecessors(c).unwrap(), vec![a, b]);

    g.remove_edge(a, c).unwrap();
    assert_eq!(g.predecessors(c).unwrap(), vec![b]);
}

#[test]
fn display_lists_adjacency_by_index() {
    let mut g: Graph = Graph::directed();
    let a = g.make_node();
    let b = g.make_node();
    let c = g.make_node();
    g.connect(a, b).unwrap();
    g.connect(a, c).unwrap();
    g.connect(c, a).unwrap();

    assert_eq!(g.to_string(), "g->{\n\t0->{1,2,}\n\t1->{}\n\t2->{0,}\n}");
}

proptest! {
    #[test]
    fn repeated_removal_keeps_indices_compact(
        n in 1usize..24,
        edges in proptest::collection::vec((0usize..24, 0usize..24, -5i64..20), 0..80),
        picks in proptest::collection::vec(0usize..24, 24),
        directed in any::<bool>(),
    ) {
        let kind = if directed { GraphKind::Directed } else { GraphKind::Undirected };
        let mut g: Graph<usize> = Graph::new(kind);
        let handles: Vec<NodeHandle> = (0..n).map(|i| g.make_node_with(i)).collect();
        for (u, v, w) in edges {
            g.connect_weight(handles[u % n], handles[v % n], w).unwrap();
        }

        let mut pick = picks.into_iter();
        while !g.is_empty() {
            let ix = pick.next().unwrap_or(0) % g.node_count();
            let victim = g.handle_at(ix).unwrap();
            g.remove_node(victim).unwrap();
            prop_assert!(!g.contains(victim));

            assert_positions_match(&g);
            prop_assert_eq!(g.edges().len(), g.edge_count());
            for e in g.edges() {
                prop_assert!(g.contains(e.from) && g.contains(e.to));
                if !directed {
                    prop_assert_eq!(g.edge_weight(e.to, e.from).unwrap(), Some(e.weight));
                }
            }
        }
        prop_assert_eq!(g.edge_count(), 0);
    }
}
