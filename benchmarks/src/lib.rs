//! Shared graph generators for the K* benchmark suites.

use kstar_harness::memory::MemoryGraph;
use kstar_search::{Cost, NodeId, PathGraph, SearchTree};

/// Edge costs cycle through this table so that ties are common but not
/// universal.
const COSTS: [Cost; 5] = [1.0, 2.0, 3.0, 1.5, 2.5];

/// Shape of a benchmark graph.
#[derive(Debug, Clone, Copy)]
pub struct Regime {
    pub name: &'static str,
    pub rows: usize,
    pub cols: usize,
    /// Add leftward edges, making the path count infinite.
    pub back_edges: bool,
    /// Use the Manhattan estimate instead of zero.
    pub heuristic: bool,
}

pub const REGIMES: &[Regime] = &[
    Regime {
        name: "grid_10x10",
        rows: 10,
        cols: 10,
        back_edges: false,
        heuristic: false,
    },
    Regime {
        name: "grid_10x10_guided",
        rows: 10,
        cols: 10,
        back_edges: false,
        heuristic: true,
    },
    Regime {
        name: "grid_30x30",
        rows: 30,
        cols: 30,
        back_edges: false,
        heuristic: true,
    },
    Regime {
        name: "cyclic_20x20",
        rows: 20,
        cols: 20,
        back_edges: true,
        heuristic: true,
    },
];

fn node(cols: usize, r: usize, c: usize) -> NodeId {
    (r * cols + c) as NodeId
}

fn cost(r: usize, c: usize) -> Cost {
    COSTS[(r * 7 + c * 13) % COSTS.len()]
}

/// A `rows × cols` grid from the top-left to the bottom-right corner.
///
/// Every node has a right and a down edge where the grid allows; every
/// third node gets a second, dearer right edge. The heuristic, when on, is
/// the Manhattan distance times the cheapest edge cost, so it stays
/// admissible.
#[must_use]
pub fn grid_graph(regime: &Regime) -> MemoryGraph {
    let Regime {
        rows,
        cols,
        back_edges,
        heuristic,
        ..
    } = *regime;
    let mut graph = MemoryGraph::new(0, node(cols, rows - 1, cols - 1));
    for r in 0..rows {
        for c in 0..cols {
            let here = node(cols, r, c);
            if c + 1 < cols {
                graph.add_edge(here, node(cols, r, c + 1), cost(r, c));
                if (r + c) % 3 == 0 {
                    graph.add_edge(here, node(cols, r, c + 1), cost(r, c) + 2.0);
                }
            }
            if r + 1 < rows {
                graph.add_edge(here, node(cols, r + 1, c), cost(c, r));
            }
            if back_edges && c > 0 {
                graph.add_edge(here, node(cols, r, c - 1), 3.0);
            }
            if heuristic {
                let hops = u32::try_from((rows - 1 - r) + (cols - 1 - c)).unwrap_or(u32::MAX);
                graph.set_heuristic(here, f64::from(hops) * COSTS[0]);
            }
        }
    }
    graph
}

/// Grow the search tree to exhaustion and build the full path graph.
///
/// Only valid on graphs with finitely many reachable nodes.
#[must_use]
pub fn exhausted_path_graph(graph: &MemoryGraph) -> (SearchTree<'_>, PathGraph) {
    let mut tree = SearchTree::new(graph, 2);
    let mut path_graph = PathGraph::new();
    loop {
        let outcome = tree.run();
        path_graph.apply(&tree, &outcome);
        if outcome.exhausted {
            return (tree, path_graph);
        }
    }
}
