//! In-memory multigraph implementing the search's `Graph` capability.

use std::collections::BTreeMap;

use kstar_search::{Cost, Edge, EdgeGroup, Graph, NodeId};

/// A `BTreeMap`-backed directed multigraph with a per-node heuristic.
///
/// Parallel edges between the same pair keep their insertion order, which is
/// their edge index. Nodes without a heuristic estimate get `0.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryGraph {
    source: NodeId,
    target: NodeId,
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, Vec<Cost>>>,
    heuristics: BTreeMap<NodeId, Cost>,
}

impl MemoryGraph {
    #[must_use]
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            adjacency: BTreeMap::new(),
            heuristics: BTreeMap::new(),
        }
    }

    /// Add an edge and return its identity.
    pub fn add_edge(&mut self, tail: NodeId, head: NodeId, cost: Cost) -> Edge {
        let costs = self
            .adjacency
            .entry(tail)
            .or_default()
            .entry(head)
            .or_default();
        costs.push(cost);
        Edge::new(tail, head, costs.len() - 1)
    }

    pub fn set_heuristic(&mut self, node: NodeId, estimate: Cost) {
        self.heuristics.insert(node, estimate);
    }

    /// Cost of an edge, looked up directly in the graph.
    #[must_use]
    pub fn edge_cost(&self, edge: &Edge) -> Option<Cost> {
        self.adjacency
            .get(&edge.tail)?
            .get(&edge.head)?
            .get(edge.index)
            .copied()
    }

    /// Total cost of an edge sequence, or `None` if an edge does not exist.
    #[must_use]
    pub fn path_cost(&self, edges: &[Edge]) -> Option<Cost> {
        edges.iter().map(|edge| self.edge_cost(edge)).sum()
    }

    /// All edges in `(tail, head, index)` order.
    pub fn edges(&self) -> impl Iterator<Item = (Edge, Cost)> + '_ {
        self.adjacency.iter().flat_map(|(&tail, heads)| {
            heads.iter().flat_map(move |(&head, costs)| {
                costs
                    .iter()
                    .enumerate()
                    .map(move |(index, &cost)| (Edge::new(tail, head, index), cost))
            })
        })
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

impl Graph for MemoryGraph {
    fn source(&self) -> NodeId {
        self.source
    }

    fn target(&self) -> NodeId {
        self.target
    }

    fn connections(&self, node: NodeId) -> Vec<EdgeGroup> {
        let Some(heads) = self.adjacency.get(&node) else {
            return Vec::new();
        };
        heads
            .iter()
            .map(|(&head, costs)| EdgeGroup {
                head,
                costs: costs.clone(),
            })
            .collect()
    }

    fn heuristic(&self, node: NodeId) -> Cost {
        self.heuristics.get(&node).copied().unwrap_or(0.0)
    }
}
