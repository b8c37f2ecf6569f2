//! Core value types: node ids, edges, paths and frontier ordering keys.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Graph node identifier. Ids are not required to be contiguous.
pub type NodeId = u64;

/// Edge and path cost. Edge costs supplied by a graph must be strictly positive.
pub type Cost = f64;

/// The `index`-th parallel edge from `tail` to `head`.
///
/// `index` is the position of the edge's cost in the list returned by
/// [`crate::contract::Graph::connections`] for the `(tail, head)` pair.
/// Ordering is `(tail, head, index)`, which keeps every map keyed by edges
/// deterministic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Edge {
    pub tail: NodeId,
    pub head: NodeId,
    pub index: usize,
}

impl Edge {
    #[must_use]
    pub const fn new(tail: NodeId, head: NodeId, index: usize) -> Self {
        Self { tail, head, index }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}#{}", self.tail, self.head, self.index)
    }
}

/// A cost with a total order (IEEE 754 `totalOrder`), usable as a heap key.
#[derive(Debug, Clone, Copy)]
pub struct CostKey(pub Cost);

impl PartialEq for CostKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CostKey {}

impl PartialOrd for CostKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CostKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The enumerator frontier ordering key: `(cost, creation_order)`.
///
/// Lower accumulated cost first; ties broken by older `creation_order`, so
/// equal-cost deviations come out in the order they were discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub cost: CostKey,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

/// A walk from the source to the target.
///
/// `edges` are ordered source → target. `cost` is the sum of the edge costs.
/// An empty edge list is the trivial path of a search whose source is its
/// target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub edges: Vec<Edge>,
    pub cost: Cost,
}

impl Path {
    /// Nodes visited in order, endpoints included. Empty for the trivial path.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        let Some(first) = self.edges.first() else {
            return Vec::new();
        };
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        nodes.push(first.tail);
        nodes.extend(self.edges.iter().map(|e| e.head));
        nodes
    }

    /// Returns `true` if no node is visited twice.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.nodes().into_iter().all(|n| seen.insert(n))
    }
}
