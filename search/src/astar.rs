//! Incremental A*: a pausable shortest-path tree rooted at the source.
//!
//! Each call to [`SearchTree::run`] expands nodes in increasing
//! `f = g + h` order (ties by node id) until the [`ExpansionPolicy`] asks for
//! a pause or the open set empties. The call reports every sidetrack edge it
//! observed and every node whose tree parent changed, which is exactly what
//! the path graph needs to stay consistent with the tree.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::contract::Graph;
use crate::heap::IndexedHeap;
use crate::node::{Cost, CostKey, Edge, NodeId};
use crate::policy::ExpansionPolicy;

/// Per-node search state.
#[derive(Debug, Clone)]
struct TreeNode {
    g: Cost,
    h: Cost,
    parent: Option<Edge>,
    children: BTreeSet<NodeId>,
    /// Set once the node has been expanded. A later expansion is a reopening.
    expanded: bool,
}

impl TreeNode {
    fn new(h: Cost) -> Self {
        Self {
            g: 0.0,
            h,
            parent: None,
            children: BTreeSet::new(),
            expanded: false,
        }
    }
}

/// What one [`SearchTree::run`] call changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthOutcome {
    /// Edges observed as sidetracks during this call, in discovery order.
    /// An edge may appear again in a later call if it was a tree edge in
    /// between.
    pub new_sidetracks: Vec<Edge>,
    /// Nodes attached to the tree or moved to a new parent (or the same
    /// parent with a lower `g`) during this call.
    pub relinked: BTreeSet<NodeId>,
    /// The open set is empty: the tree will never change again.
    pub exhausted: bool,
}

/// The incremental A* shortest-path tree.
pub struct SearchTree<'g> {
    graph: &'g dyn Graph,
    source: NodeId,
    target: NodeId,
    nodes: BTreeMap<NodeId, TreeNode>,
    open: IndexedHeap<NodeId>,
    edge_costs: BTreeMap<Edge, Cost>,
    /// Edges seen arriving at nodes that are open and not yet expanded.
    arriving: BTreeMap<NodeId, u64>,
    policy: ExpansionPolicy,
    exhausted: bool,
}

fn open_key(nodes: &BTreeMap<NodeId, TreeNode>) -> impl Fn(&NodeId) -> (CostKey, NodeId) + '_ {
    |id| {
        let f = nodes.get(id).map_or(Cost::INFINITY, |n| n.g + n.h);
        (CostKey(f), *id)
    }
}

/// Index of the first minimum cost in a parallel-edge group.
fn cheapest(costs: &[Cost]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &cost) in costs.iter().enumerate() {
        match best {
            Some(b) if costs[b] <= cost => {}
            _ => best = Some(i),
        }
    }
    best
}

impl<'g> SearchTree<'g> {
    /// Seed the tree with the source. No node is expanded until [`run`](Self::run).
    #[must_use]
    pub fn new(graph: &'g dyn Graph, growth_factor: u64) -> Self {
        let source = graph.source();
        let mut nodes = BTreeMap::new();
        nodes.insert(source, TreeNode::new(graph.heuristic(source)));
        let mut open = IndexedHeap::new();
        open.push(source, &open_key(&nodes));
        Self {
            graph,
            source,
            target: graph.target(),
            nodes,
            open,
            edge_costs: BTreeMap::new(),
            arriving: BTreeMap::new(),
            policy: ExpansionPolicy::new(growth_factor),
            exhausted: false,
        }
    }

    /// Grow the tree until the pause policy stops it or the open set empties.
    pub fn run(&mut self) -> GrowthOutcome {
        let mut outcome = GrowthOutcome::default();
        loop {
            let Some(top) = self.open.top() else {
                self.exhausted = true;
                break;
            };
            if self.policy.should_pause(top == self.target) {
                debug!(
                    expanded = self.policy.nodes_expanded(),
                    inner_edges = self.policy.inner_edges(),
                    open = self.open.len(),
                    "search tree paused"
                );
                break;
            }
            self.open.pop(&open_key(&self.nodes));
            self.expand(top, &mut outcome);
        }
        if self.exhausted {
            debug!(
                expanded = self.policy.nodes_expanded(),
                inner_edges = self.policy.inner_edges(),
                "search tree exhausted"
            );
        }
        outcome.exhausted = self.exhausted;
        outcome
    }

    fn expand(&mut self, current: NodeId, outcome: &mut GrowthOutcome) {
        let node = self.node_mut(current);
        let reopening = node.expanded;
        node.expanded = true;
        let g_current = node.g;
        trace!(node = current, g = g_current, reopening, "expand");

        let mut inner = self.arriving.remove(&current).unwrap_or(0);
        for group in self.graph.connections(current) {
            let Some(best) = cheapest(&group.costs) else {
                continue;
            };
            let hits = group.costs.len() as u64;
            if self.nodes.get(&group.head).is_some_and(|n| n.expanded) {
                inner += hits;
            } else {
                *self.arriving.entry(group.head).or_default() += hits;
            }
            for (index, &cost) in group.costs.iter().enumerate() {
                self.edge_costs
                    .insert(Edge::new(current, group.head, index), cost);
            }
            if !reopening {
                outcome.new_sidetracks.extend(
                    (0..group.costs.len())
                        .filter(|&i| i != best)
                        .map(|i| Edge::new(current, group.head, i)),
                );
            }
            let candidate = Edge::new(current, group.head, best);
            self.relax(candidate, g_current + group.costs[best], reopening, outcome);
        }

        self.policy.record_expansion();
        self.policy.record_inner_edges(inner);
    }

    fn relax(&mut self, candidate: Edge, tentative: Cost, reopening: bool, outcome: &mut GrowthOutcome) {
        let head = candidate.head;
        if !self.nodes.contains_key(&head) {
            let h = self.graph.heuristic(head);
            self.nodes.insert(head, TreeNode::new(h));
        }

        let node = self.node(head);
        let keeps_parent =
            head == self.source || (node.parent.is_some() && tentative >= node.g);
        if keeps_parent {
            if !reopening {
                outcome.new_sidetracks.push(candidate);
            }
            return;
        }

        let old_parent = node.parent;
        if let Some(old) = old_parent {
            if old != candidate {
                outcome.new_sidetracks.push(old);
            }
            self.node_mut(old.tail).children.remove(&head);
        }
        self.node_mut(candidate.tail).children.insert(head);
        let node = self.node_mut(head);
        node.parent = Some(candidate);
        node.g = tentative;
        outcome.relinked.insert(head);
        self.open.push(head, &open_key(&self.nodes));
    }

    fn node(&self, id: NodeId) -> &TreeNode {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("node {id} is not in the search tree"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("node {id} is not in the search tree"))
    }

    #[must_use]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Whether `node` has been discovered.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Current `g` of a discovered node.
    #[must_use]
    pub fn g(&self, node: NodeId) -> Option<Cost> {
        self.nodes.get(&node).map(|n| n.g)
    }

    /// Tree edge into `node`, if it has one.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<Edge> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// Tree edge into `node`.
    ///
    /// # Panics
    ///
    /// If `node` is the source or is not attached to the tree.
    #[must_use]
    pub fn parent_edge(&self, node: NodeId) -> Edge {
        self.parent(node)
            .unwrap_or_else(|| panic!("node {node} has no tree parent"))
    }

    /// Tree children of `node`, in id order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(&node)
            .into_iter()
            .flat_map(|n| n.children.iter().copied())
    }

    /// Cached cost of an examined edge.
    #[must_use]
    pub fn edge_cost(&self, edge: &Edge) -> Option<Cost> {
        self.edge_costs.get(edge).copied()
    }

    /// Extra cost of taking `edge` instead of the tree edge into its head,
    /// measured against the current `g` values.
    ///
    /// # Panics
    ///
    /// If `edge` has not been examined.
    #[must_use]
    pub fn detour(&self, edge: &Edge) -> Cost {
        let cost = self
            .edge_cost(edge)
            .unwrap_or_else(|| panic!("edge {edge} has not been examined"));
        self.node(edge.tail).g + cost - self.node(edge.head).g
    }

    /// Cost of the tree path from the source to the target, or `None` if the
    /// target is not attached to the tree yet.
    #[must_use]
    pub fn min_path_cost(&self) -> Option<Cost> {
        let mut cost = 0.0;
        let mut current = self.target;
        while current != self.source {
            let edge = self.parent(current)?;
            cost += self.edge_cost(&edge)?;
            current = edge.tail;
        }
        Some(cost)
    }

    /// Smallest `f` in the open set. Every path costing less than this is
    /// made of expanded nodes only.
    #[must_use]
    pub fn frontier_bound(&self) -> Option<Cost> {
        self.open
            .top()
            .and_then(|id| self.nodes.get(&id))
            .map(|n| n.g + n.h)
    }

    /// Whether the open set has emptied.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[must_use]
    pub fn nodes_expanded(&self) -> u64 {
        self.policy.nodes_expanded()
    }

    #[must_use]
    pub fn edges_seen(&self) -> u64 {
        self.policy.inner_edges()
    }
}
