//! Graph capability contract.

use crate::node::{Cost, NodeId};

/// All parallel edges from one node to one neighbor.
///
/// `costs[i]` is the cost of edge `(tail, head, i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGroup {
    pub head: NodeId,
    pub costs: Vec<Cost>,
}

/// Trait for graphs that K* can search.
///
/// The search never holds the whole graph: it asks for the outgoing edges of
/// a node when it expands that node, and for the heuristic of a node when it
/// first sees it.
///
/// # Contract
///
/// - Edge costs must be strictly positive and finite. This is not validated;
///   zero or negative cycles can make a search run forever.
/// - `heuristic` must be non-negative and should be consistent
///   (`h(u) <= cost(u, v) + h(v)`); an inconsistent heuristic is tolerated by
///   reopening nodes, but path order is only guaranteed for consistent ones.
/// - `connections` must be deterministic and ordered by `head`: the same node
///   must produce the same groups in the same order on every call.
/// - Calls should be O(1) amortized in the size of the answer.
pub trait Graph {
    /// The departure node.
    fn source(&self) -> NodeId;

    /// The arrival node.
    fn target(&self) -> NodeId;

    /// Outgoing edges of `node`, grouped by neighbor.
    fn connections(&self, node: NodeId) -> Vec<EdgeGroup>;

    /// Estimated remaining cost from `node` to the target.
    fn heuristic(&self, node: NodeId) -> Cost;
}
