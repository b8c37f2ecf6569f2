//! Walks through a cycle are paths too, unless the loop filter is on.

use kstar_harness::digest::report_digest;
use kstar_harness::report::PathReport;
use kstar_search::{run, KStar, KStarPolicy};
use lock_tests::fixture_helpers::{costs, load_fixture};

#[test]
fn walks_around_the_cycle_are_enumerated() {
    let file = load_fixture("loop");
    let paths = run(&file.graph, 4, &KStarPolicy::default()).unwrap();
    assert_eq!(costs(&paths), vec![2.0, 4.0, 5.0, 6.0]);
    assert!(!paths[1].is_simple());
    assert!(paths[2].is_simple());
    assert_eq!(
        report_digest(&PathReport::new("loop.4", &paths)).as_str(),
        "sha256:0d5e6ef1240f6217bdcb5c8292eff69a30da866a5c924fa183435f7e01c053eb"
    );
}

#[test]
fn simple_filter_keeps_only_simple_paths_within_budget() {
    let file = load_fixture("loop");
    let policy = KStarPolicy {
        simple_paths_only: true,
        max_steps: Some(50),
        ..KStarPolicy::default()
    };
    let mut kstar = KStar::new(&file.graph, &policy).unwrap();
    let paths: Vec<_> = kstar.by_ref().take(10).collect();

    assert_eq!(costs(&paths), vec![2.0, 5.0]);
    assert!(paths.iter().all(kstar_search::Path::is_simple));
    assert_eq!(kstar.steps(), 50, "budget spent looking for a third");
}
