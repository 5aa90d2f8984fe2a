use proptest::prelude::*;

use super::*;

fn diamond() -> Graph {
    let mut g = Graph::new(4, true, false);
    for (v, w) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
        assert_eq!(g.add_edge(v, w), Ok(true));
    }
    g
}

#[test]
fn new_graph_is_empty_and_consistent() {
    let g = Graph::new(5, true, false);
    assert_eq!(g.vertex_count(), 5);
    assert_eq!(g.edge_count(), 0);
    assert!(g.is_directed());
    assert!(!g.is_weighted());
    assert!(!g.is_complete());
    for (i, vertex) in g.vertices().enumerate() {
        assert_eq!(vertex.id(), VertexIndex(i));
        assert_eq!(vertex.in_degree(), 0);
        assert_eq!(vertex.out_degree(), 0);
        assert_eq!(vertex.edges().count(), 0);
    }
    assert!(g.check_invariants());
}

#[test]
fn tiny_graphs_are_consistent() {
    assert!(Graph::new(0, true, false).check_invariants());
    assert!(Graph::new(1, false, true).check_invariants());
    assert!(Graph::complete(0, false).check_invariants());
    assert!(Graph::complete(1, true).check_invariants());
}

#[test]
fn complete_undirected() {
    let g = Graph::complete(4, false);
    assert_eq!(g.edge_count(), 6);
    assert!(g.is_complete());
    assert!(!g.is_weighted());
    for v in 0..4 {
        assert_eq!(g.out_degree(v), Ok(3));
        assert_eq!(g.degree(v), Ok(3));
    }
    assert_eq!(g.max_degree(), Ok(3));
    assert_eq!(g.average_degree(), Ok(3.0));
    assert!(g.check_invariants());
}

#[test]
fn complete_directed() {
    let g = Graph::complete(3, true);
    assert_eq!(g.edge_count(), 6);
    for v in 0..3 {
        assert_eq!(g.in_degree(v), Ok(2));
        assert_eq!(g.out_degree(v), Ok(2));
    }
    assert_eq!(g.adjacents(1), Ok(vec![VertexIndex(0), VertexIndex(2)]));
    assert_eq!(g.distances_to_adjacents(1), Ok(vec![1.0, 1.0]));
    assert_eq!(g.max_out_degree(), Ok(2));
    assert!(g.check_invariants());
}

#[test]
fn directed_add_edge_updates_degrees() {
    let g = diamond();
    assert_eq!(g.edge_count(), 4);
    assert_eq!(g.out_degree(0), Ok(2));
    assert_eq!(g.in_degree(0), Ok(0));
    assert_eq!(g.in_degree(3), Ok(2));
    assert_eq!(g.adjacents(0), Ok(vec![VertexIndex(1), VertexIndex(2)]));
    assert!(g.has_edge(1, 3));
    assert!(!g.has_edge(3, 1));
    assert!(g.check_invariants());
}

#[test]
fn adjacency_is_ordered_regardless_of_insertion_order() {
    let mut g = Graph::new(5, true, true);
    g.add_weighted_edge(0, 4, 0.4).unwrap();
    g.add_weighted_edge(0, 1, 0.1).unwrap();
    g.add_weighted_edge(0, 3, 0.3).unwrap();

    assert_eq!(
        g.adjacents(0),
        Ok(vec![VertexIndex(1), VertexIndex(3), VertexIndex(4)])
    );
    assert_eq!(g.distances_to_adjacents(0), Ok(vec![0.1, 0.3, 0.4]));
    assert_eq!(g.edge_weight(0, 3), Some(0.3));
    assert_eq!(g.edge_weight(3, 0), None);
}

#[test]
fn undirected_add_edge_mirrors() {
    let mut g = Graph::new(3, false, false);
    assert_eq!(g.add_edge(2, 0), Ok(true));
    assert_eq!(g.edge_count(), 1);
    assert!(g.has_edge(0, 2));
    assert!(g.has_edge(2, 0));
    for v in [0, 2] {
        assert_eq!(g.in_degree(v), Ok(1));
        assert_eq!(g.out_degree(v), Ok(1));
    }
    assert_eq!(g.degree(1), Ok(0));
    assert!(g.check_invariants());
}

#[test]
fn duplicate_edge_is_rejected_without_changes() {
    let mut g = diamond();
    let before = g.clone();
    assert_eq!(g.add_edge(0, 1), Ok(false));
    assert_eq!(g, before);

    let mut u = Graph::new(3, false, false);
    u.add_edge(0, 1).unwrap();
    let before = u.clone();
    // the mirror counts as the same edge
    assert_eq!(u.add_edge(1, 0), Ok(false));
    assert_eq!(u, before);
}

#[test]
fn preconditions_are_reported() {
    let mut g = Graph::new(3, true, false);
    assert_eq!(g.add_edge(1, 1), Err(GraphError::SelfLoop(VertexIndex(1))));
    assert_eq!(
        g.add_edge(0, 3),
        Err(GraphError::VertexOutOfRange {
            vertex: VertexIndex(3),
            vertex_count: 3
        })
    );
    assert_eq!(g.add_weighted_edge(0, 1, 2.0), Err(GraphError::UnexpectedWeight));
    assert_eq!(
        Graph::new(2, true, true).add_edge(0, 1),
        Err(GraphError::MissingWeight)
    );
    assert_eq!(g.average_degree(), Err(GraphError::RequiresUndirected));
    assert_eq!(g.max_degree(), Err(GraphError::RequiresUndirected));
    assert_eq!(g.degree(0), Err(GraphError::RequiresUndirected));
    assert_eq!(
        Graph::new(2, false, false).max_out_degree(),
        Err(GraphError::RequiresDirected)
    );
    assert!(g.in_degree(7).is_err());
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn remove_missing_edge_is_an_error_and_a_no_op() {
    let mut g = diamond();
    let before = g.clone();
    assert_eq!(
        g.remove_edge(3, 0),
        Err(GraphError::MissingEdge {
            from: VertexIndex(3),
            to: VertexIndex(0)
        })
    );
    assert_eq!(g, before);
}

#[test]
fn add_then_remove_round_trips() {
    let mut g = diamond();
    let before = g.clone();
    assert_eq!(g.add_edge(1, 2), Ok(true));
    assert_eq!(g.remove_edge(1, 2), Ok(()));
    assert_eq!(g, before);

    let mut u = Graph::complete(4, false);
    u.remove_edge(0, 1).unwrap();
    let before = u.clone();
    u.add_edge(1, 0).unwrap();
    u.remove_edge(0, 1).unwrap();
    assert_eq!(u, before);
}

#[test]
fn remove_edge_on_undirected_drops_both_records() {
    let mut g = Graph::complete(3, false);
    g.remove_edge(2, 1).unwrap();
    assert_eq!(g.edge_count(), 2);
    assert!(!g.has_edge(1, 2));
    assert!(!g.has_edge(2, 1));
    assert_eq!(g.degree(1), Ok(1));
    assert_eq!(g.degree(2), Ok(1));
    assert_eq!(g.in_degree(2), Ok(1));
}

#[test]
fn copy_is_deep() {
    let g = diamond();
    let mut copy = g.copy();
    assert_eq!(copy, g);
    for v in 0..4 {
        assert_eq!(copy.adjacents(v), g.adjacents(v));
        assert_eq!(copy.distances_to_adjacents(v), g.distances_to_adjacents(v));
    }

    copy.remove_edge(0, 1).unwrap();
    assert_eq!(g.edge_count(), 4);
    assert!(g.has_edge(0, 1));
    assert_eq!(g.in_degree(1), Ok(1));
}

#[test]
fn copy_counts_its_work() {
    let mut counters = crate::instrumentation::Counters::new();
    let g = diamond();
    let _ = g.copy_instrumented(&mut counters);
    assert_eq!(counters.vertex_iter, 4);
    assert_eq!(counters.edge_iter, 4);
    assert_eq!(counters.edge_rem, 0);
}

#[test]
fn corrupted_degrees_are_detected() {
    let mut g = diamond();
    g.vertices.get_mut(3).unwrap().in_degree = 1;
    assert_eq!(
        g.validate(),
        Err(InvariantViolation::InDegree {
            vertex: VertexIndex(3),
            recorded: 1,
            actual: 2
        })
    );
    assert!(!g.check_invariants());

    let mut g = diamond();
    g.vertices.get_mut(0).unwrap().out_degree = 5;
    assert!(matches!(g.validate(), Err(InvariantViolation::OutDegree { .. })));

    let mut g = diamond();
    g.n_edges = 3;
    assert!(matches!(
        g.validate(),
        Err(InvariantViolation::DegreeSum { edges: 3, .. })
    ));

    let mut g = diamond();
    g.n_vertices = 5;
    assert!(!g.check_invariants());
}

#[test]
fn completeness_bound_is_checked() {
    let mut g = Graph::complete(3, true);
    g.remove_edge(0, 1).unwrap();
    assert_eq!(
        g.validate(),
        Err(InvariantViolation::CompleteEdgeCount {
            edges: 5,
            expected: 6
        })
    );

    // every edge present but not built as complete
    let mut g = Graph::new(2, false, false);
    g.add_edge(0, 1).unwrap();
    assert_eq!(
        g.validate(),
        Err(InvariantViolation::TooManyEdges { edges: 1, max: 1 })
    );
}

#[test]
fn random_dag_is_consistent() {
    let g = Graph::random_dag(20, 0.3, 7);
    assert!(g.is_directed());
    assert!(g.check_invariants());
    assert_eq!(g, Graph::random_dag(20, 0.3, 7));
}

#[test]
fn random_full_draw_is_complete() {
    let g = Graph::random(5, false, 1.0, 0);
    assert!(g.is_complete());
    assert_eq!(g, Graph::complete(5, false));
    assert!(Graph::random(6, true, 0.0, 3).edge_count() == 0);
}

#[test]
fn out_of_range_densities_are_clamped() {
    for density in [f64::NAN, -1.0, f64::NEG_INFINITY] {
        assert_eq!(Graph::random(4, true, density, 1).edge_count(), 0);
        assert_eq!(Graph::random_dag(4, density, 1).edge_count(), 0);
    }
    assert!(Graph::random(4, true, f64::INFINITY, 1).is_complete());
    assert_eq!(Graph::random_dag(4, 2.0, 1).edge_count(), 6);
}

#[cfg(feature = "serde")]
#[test]
fn deserialization_validates() {
    let g = diamond();
    let json = serde_json::to_string(&g).unwrap();
    assert_eq!(serde_json::from_str::<Graph>(&json).unwrap(), g);

    // vertex 3 claims no incoming edges
    let mut corrupt: serde_json::Value = serde_json::from_str(&json).unwrap();
    corrupt["vertices"]["items"][3]["in_degree"] = 0.into();
    let err = serde_json::from_value::<Graph>(corrupt).unwrap_err();
    assert!(err.to_string().contains("in-degree"), "{err}");

    let mut corrupt: serde_json::Value = serde_json::from_str(&json).unwrap();
    corrupt["n_edges"] = 9.into();
    assert!(serde_json::from_value::<Graph>(corrupt).is_err());
}

proptest! {
    #[test]
    fn random_graphs_keep_invariants(
        n in 2usize..12,
        directed in any::<bool>(),
        density in 0.0f64..0.9,
        seed in any::<u64>(),
    ) {
        let g = Graph::random(n, directed, density, seed);
        prop_assert!(g.check_invariants());
        prop_assert_eq!(g.is_complete(), g.edge_count() == max_edges(n, directed));
    }

    #[test]
    fn removing_every_edge_empties_the_graph(
        n in 1usize..10,
        directed in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut g = Graph::random(n, directed, 0.5, seed);
        // removing from a complete graph breaks its edge-count bound
        prop_assume!(!g.is_complete());
        let edges: Vec<(VertexIndex, VertexIndex)> = g
            .vertices()
            .flat_map(|v| v.edges().map(move |e| (v.id(), e.adjacent())))
            .filter(|(v, w)| directed || v < w)
            .collect();

        for (v, w) in edges {
            prop_assert_eq!(g.remove_edge(v, w), Ok(()));
            prop_assert!(g.check_invariants());
        }
        prop_assert_eq!(g.edge_count(), 0);
        prop_assert!(g.vertices().all(|v| v.in_degree() == 0 && v.out_degree() == 0));
    }
}
