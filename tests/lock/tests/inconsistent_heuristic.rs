//! An admissible but inconsistent heuristic forces node 3 to be reached
//! first through the worse parent; results must still be exact.

use kstar_search::{run, Edge, KStarPolicy};
use lock_tests::fixture_helpers::{costs, load_fixture};

#[test]
fn costs_are_edge_sums_and_first_is_optimal() {
    let file = load_fixture("inconsistent");
    let paths = run(&file.graph, 4, &KStarPolicy::default()).unwrap();

    assert_eq!(costs(&paths), vec![7.5, 8.0]);
    assert_eq!(
        paths[0].edges,
        vec![Edge::new(0, 2, 0), Edge::new(2, 3, 0), Edge::new(3, 4, 0)]
    );
    assert_eq!(
        paths[1].edges,
        vec![Edge::new(0, 1, 0), Edge::new(1, 3, 0), Edge::new(3, 4, 0)]
    );
    for path in &paths {
        assert_eq!(file.graph.path_cost(&path.edges), Some(path.cost));
    }
}

#[test]
fn no_path_emitted_twice() {
    let file = load_fixture("inconsistent");
    let paths = run(&file.graph, 10, &KStarPolicy::default()).unwrap();
    for (i, a) in paths.iter().enumerate() {
        for b in &paths[i + 1..] {
            assert_ne!(a.edges, b.edges);
        }
    }
}

#[test]
fn k_one_is_the_optimal_path() {
    let file = load_fixture("inconsistent");
    let paths = run(&file.graph, 1, &KStarPolicy::default()).unwrap();
    assert_eq!(costs(&paths), vec![7.5]);
}
