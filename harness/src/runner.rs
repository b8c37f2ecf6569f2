//! Case runner: graph + k → path report.
//!
//! # Pipeline
//!
//! ```text
//! load_graph() → load_cases() → [run_case() × cases] → PathReport
//! ```

use std::path::Path;

use kstar_search::{Graph, KStarError, KStarPolicy};
use thiserror::Error;
use tracing::info;

use crate::graph_file::{load_cases, load_graph, GraphFileError};
use crate::report::PathReport;

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Search(#[from] KStarError),
    #[error(transparent)]
    GraphFile(#[from] GraphFileError),
}

/// Run K* for one case and package the result.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is invalid.
pub fn run_case(
    graph: &dyn Graph,
    name: &str,
    k: usize,
    policy: &KStarPolicy,
) -> Result<PathReport, RunError> {
    let paths = kstar_search::run(graph, k, policy)?;
    info!(
        case = name,
        k,
        found = paths.len(),
        best = ?paths.first().map(|p| p.cost),
        "case finished"
    );
    Ok(PathReport::new(name, &paths))
}

/// Run every case of a case file against one graph file.
///
/// # Errors
///
/// Returns [`RunError::GraphFile`] if either file cannot be loaded, or
/// [`RunError::Search`] if the policy is invalid.
pub fn run_case_file(
    graph_path: &Path,
    cases_path: &Path,
    policy: &KStarPolicy,
) -> Result<Vec<PathReport>, RunError> {
    let file = load_graph(graph_path)?;
    let cases = load_cases(cases_path, &file.name)?;
    cases
        .iter()
        .map(|case| run_case(&file.graph, &case.name, case.k, policy))
        .collect()
}
