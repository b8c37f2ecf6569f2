//! The diamond scenario end to end: fixture file → K* → report → golden.

use kstar_harness::digest::report_digest;
use kstar_harness::report::{check_golden, GoldenStatus, PathReport};
use kstar_harness::runner::{run_case, run_case_file};
use kstar_search::{Edge, KStarPolicy};
use lock_tests::fixture_helpers::{fixtures_dir, golden_dir, load_fixture};

const DIAMOND_5_DIGEST: &str =
    "sha256:4a80d3dae5c533d58bfb9129e300a700db992dd47dad770bfee7a37b23977200";

#[test]
fn diamond_paths_in_cost_order() {
    let file = load_fixture("diamond");
    let report = run_case(&file.graph, "diamond.5", 5, &KStarPolicy::default()).unwrap();

    let costs: Vec<f64> = report.paths.iter().map(|p| p.cost).collect();
    assert_eq!(costs, vec![3.0, 6.0, 6.0, 9.0]);
    assert_eq!(
        report.paths[0].edges,
        vec![Edge::new(0, 1, 0), Edge::new(1, 2, 0), Edge::new(2, 3, 0)]
    );
    assert_eq!(report.paths[3].edges, vec![Edge::new(0, 1, 1), Edge::new(1, 3, 0)]);
}

#[test]
fn diamond_report_matches_checked_in_golden() {
    let file = load_fixture("diamond");
    let report = run_case(&file.graph, "diamond.5", 5, &KStarPolicy::default()).unwrap();
    let status = check_golden(&report, &golden_dir().join("diamond.5.json")).unwrap();
    assert_eq!(status, GoldenStatus::Compared(Ok(())));
}

#[test]
fn diamond_report_digest_is_pinned() {
    let file = load_fixture("diamond");
    let report = run_case(&file.graph, "diamond.5", 5, &KStarPolicy::default()).unwrap();
    assert_eq!(report_digest(&report).as_str(), DIAMOND_5_DIGEST);
}

#[test]
fn case_file_runs_each_k() {
    let dir = fixtures_dir();
    let reports = run_case_file(
        &dir.join("diamond.graph"),
        &dir.join("diamond.in"),
        &KStarPolicy::default(),
    )
    .unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].name, "diamond.1");
    assert_eq!(reports[0].paths.len(), 1);
    assert_eq!(reports[1].name, "diamond.5");
    assert_eq!(reports[1].paths.len(), 4);

    let golden = PathReport::read(&golden_dir().join("diamond.5.json")).unwrap();
    assert_eq!(reports[1].compare(&golden), Ok(()));
}

#[test]
fn new_golden_is_recorded_once() {
    let file = load_fixture("diamond");
    let report = run_case(&file.graph, "diamond.5", 5, &KStarPolicy::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diamond.5.json");

    assert_eq!(check_golden(&report, &path).unwrap(), GoldenStatus::Recorded);
    let recorded = PathReport::read(&path).unwrap();
    let checked_in = PathReport::read(&golden_dir().join("diamond.5.json")).unwrap();
    assert_eq!(recorded.compare(&checked_in), Ok(()));
}
