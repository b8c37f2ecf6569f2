//! Splice sidetrack edges into the search tree to get a concrete path.

use crate::astar::SearchTree;
use crate::node::{Edge, Path};

/// Build the path that follows the tree except at `sidetracks`.
///
/// `sidetracks` must be ordered target side first, as produced by
/// [`crate::enumerator::Deviation::sidetracks`]. The walk starts at the
/// target; whenever the next pending sidetrack enters the current node it is
/// taken, otherwise the tree edge is. The returned edges run source → target.
///
/// # Panics
///
/// If the sidetracks do not describe a path over the tree, which surfaces as
/// a request for the source's parent, or if an edge was never examined.
#[must_use]
pub fn assemble(tree: &SearchTree<'_>, sidetracks: &[Edge]) -> Path {
    let mut pending = sidetracks.iter().copied().peekable();
    let mut edges = Vec::new();
    let mut current = tree.target();
    while current != tree.source() || pending.peek().is_some() {
        let edge = match pending.next_if(|s| s.head == current) {
            Some(sidetrack) => sidetrack,
            None => tree.parent_edge(current),
        };
        edges.push(edge);
        current = edge.tail;
    }
    edges.reverse();

    let cost = edges
        .iter()
        .map(|edge| {
            tree.edge_cost(edge)
                .unwrap_or_else(|| panic!("edge {edge} has not been examined"))
        })
        .sum();
    Path { edges, cost }
}
