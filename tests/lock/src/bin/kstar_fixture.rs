//! Binary that runs K* on a graph file and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `kstar_fixture <graph-file> <k> [--simple]`
//!
//! Output: key=value lines (see source for format). Logs go to stderr,
//! filtered by `RUST_LOG` (default `warn`).

use std::path::Path;

use kstar_harness::digest::report_digest;
use kstar_harness::graph_file::load_graph;
use kstar_harness::report::PathReport;
use kstar_search::{KStar, KStarPolicy};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (graph_arg, k_arg) = match args.as_slice() {
        [graph, k] | [graph, k, _] => (graph, k),
        _ => {
            eprintln!("usage: kstar_fixture <graph-file> <k> [--simple]");
            std::process::exit(2);
        }
    };
    let k: usize = k_arg.parse().expect("k must be a non-negative integer");
    let policy = KStarPolicy {
        simple_paths_only: args.get(2).is_some_and(|flag| flag == "--simple"),
        ..KStarPolicy::default()
    };

    let file = load_graph(Path::new(graph_arg)).expect("graph file loads");
    let mut kstar = KStar::new(&file.graph, &policy).expect("default policy is valid");
    let paths: Vec<_> = kstar.by_ref().take(k).collect();
    tracing::info!(graph = %file.name, k, found = paths.len(), "fixture run finished");

    let report = PathReport::new(format!("{}.{k}", file.name), &paths);

    println!("name={}", report.name);
    println!("path_count={}", paths.len());
    for (i, path) in paths.iter().enumerate() {
        let edges: Vec<String> = path.edges.iter().map(ToString::to_string).collect();
        println!("path_{i}_cost={}", path.cost);
        println!("path_{i}_edges={}", edges.join(","));
    }
    println!("nodes_expanded={}", kstar.tree().nodes_expanded());
    println!("steps={}", kstar.steps());
    println!("report_digest={}", report_digest(&report));
}
