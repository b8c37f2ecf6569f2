//! Small in-crate graph for unit tests.

use std::collections::BTreeMap;

use crate::contract::{EdgeGroup, Graph};
use crate::node::{Cost, NodeId};

pub(crate) struct TestGraph {
    source: NodeId,
    target: NodeId,
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, Vec<Cost>>>,
    heuristic: BTreeMap<NodeId, Cost>,
}

impl TestGraph {
    pub(crate) fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            adjacency: BTreeMap::new(),
            heuristic: BTreeMap::new(),
        }
    }

    pub(crate) fn edge(mut self, tail: NodeId, head: NodeId, cost: Cost) -> Self {
        self.adjacency
            .entry(tail)
            .or_default()
            .entry(head)
            .or_default()
            .push(cost);
        self
    }

    pub(crate) fn h(mut self, node: NodeId, estimate: Cost) -> Self {
        self.heuristic.insert(node, estimate);
        self
    }

    /// `0→1 (1.0)`, `0→1 (4.0)`, `1→2 (1.0)`, `1→3 (5.0)`, `2→3 (1.0)`.
    pub(crate) fn diamond() -> Self {
        Self::new(0, 3)
            .edge(0, 1, 1.0)
            .edge(0, 1, 4.0)
            .edge(1, 2, 1.0)
            .edge(1, 3, 5.0)
            .edge(2, 3, 1.0)
    }
}

impl Graph for TestGraph {
    fn source(&self) -> NodeId {
        self.source
    }

    fn target(&self) -> NodeId {
        self.target
    }

    fn connections(&self, node: NodeId) -> Vec<EdgeGroup> {
        self.adjacency
            .get(&node)
            .map(|heads| {
                heads
                    .iter()
                    .map(|(&head, costs)| EdgeGroup {
                        head,
                        costs: costs.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn heuristic(&self, node: NodeId) -> Cost {
        self.heuristic.get(&node).copied().unwrap_or(0.0)
    }
}
