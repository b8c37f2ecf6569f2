//! Boundary behavior: trivial graphs, unreachable targets, k = 0, s = t,
//! self-loops.

use kstar_search::{run, Edge, KStar, KStarError, KStarPolicy};
use lock_tests::fixture_helpers::{costs, load_fixture};

#[test]
fn single_edge_graph_has_exactly_one_path() {
    let file = load_fixture("single_edge");
    let paths = run(&file.graph, 5, &KStarPolicy::default()).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].edges, vec![Edge::new(0, 1, 0)]);
    assert!((paths[0].cost - 2.5).abs() < f64::EPSILON);
}

#[test]
fn unreachable_target_yields_empty_sequence() {
    let file = load_fixture("unreachable");
    let mut kstar = KStar::new(&file.graph, &KStarPolicy::default()).unwrap();
    assert!(kstar.next().is_none());
    assert!(kstar.next().is_none(), "stays finished");
    assert!(kstar.tree().is_exhausted());
}

#[test]
fn k_zero_returns_nothing() {
    let file = load_fixture("diamond");
    assert!(run(&file.graph, 0, &KStarPolicy::default()).unwrap().is_empty());
}

#[test]
fn source_equal_to_target_starts_with_empty_path() {
    let file = load_fixture("cycle");
    let paths = run(&file.graph, 3, &KStarPolicy::default()).unwrap();
    assert_eq!(costs(&paths), vec![0.0, 2.0, 4.0]);
    assert!(paths[0].edges.is_empty());
    assert_eq!(paths[1].edges, vec![Edge::new(0, 1, 0), Edge::new(1, 0, 0)]);
}

#[test]
fn self_loop_is_taken_once_more_per_path() {
    let file = load_fixture("selfloop");
    let paths = run(&file.graph, 3, &KStarPolicy::default()).unwrap();
    assert_eq!(costs(&paths), vec![2.0, 4.0, 6.0]);
    assert_eq!(paths[0].edges, vec![Edge::new(0, 1, 0), Edge::new(1, 2, 0)]);
    assert_eq!(
        paths[2].edges,
        vec![
            Edge::new(0, 1, 0),
            Edge::new(1, 1, 0),
            Edge::new(1, 1, 0),
            Edge::new(1, 2, 0)
        ]
    );
    for path in &paths {
        assert_eq!(file.graph.path_cost(&path.edges), Some(path.cost));
    }

    let simple = KStarPolicy {
        simple_paths_only: true,
        max_steps: Some(20),
        ..KStarPolicy::default()
    };
    let paths = run(&file.graph, 3, &simple).unwrap();
    assert_eq!(costs(&paths), vec![2.0]);
}

#[test]
fn fewer_paths_than_asked_when_graph_runs_out() {
    let file = load_fixture("grid");
    let paths = run(&file.graph, 10, &KStarPolicy::default()).unwrap();
    assert_eq!(paths.len(), 6, "a 3x3 grid has C(4,2) monotone paths");
    assert!(paths.iter().all(|p| (p.cost - 4.0).abs() < f64::EPSILON));
    let mut sequences: Vec<_> = paths.iter().map(|p| p.edges.clone()).collect();
    sequences.sort();
    sequences.dedup();
    assert_eq!(sequences.len(), 6);
}

#[test]
fn invalid_policy_rejected_before_search() {
    let file = load_fixture("diamond");
    let policy = KStarPolicy {
        max_steps: Some(0),
        ..KStarPolicy::default()
    };
    assert!(matches!(
        run(&file.graph, 1, &policy),
        Err(KStarError::InvalidPolicy { .. })
    ));
}
