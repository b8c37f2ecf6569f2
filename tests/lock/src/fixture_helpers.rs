//! Locating and loading the checked-in graph fixtures.

use std::path::{Path, PathBuf};

use kstar_harness::graph_file::{load_graph, GraphFile};
use kstar_search::{Cost, Path as KPath};

/// `tests/lock/fixtures`.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// `tests/lock/golden`.
#[must_use]
pub fn golden_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load `fixtures/<name>.graph`.
///
/// # Panics
///
/// Panics if the fixture is missing or malformed. Fixtures are checked in,
/// so either is a broken tree.
#[must_use]
pub fn load_fixture(name: &str) -> GraphFile {
    let path = fixtures_dir().join(format!("{name}.graph"));
    load_graph(&path).unwrap_or_else(|e| panic!("fixture {name}: {e}"))
}

/// Costs of a path list, in order.
#[must_use]
pub fn costs(paths: &[KPath]) -> Vec<Cost> {
    paths.iter().map(|p| p.cost).collect()
}
