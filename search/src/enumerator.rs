//! Best-first enumeration of the implicit path graph.
//!
//! Every path-graph path from the root stands for one source → target path:
//! the root alone is the tree path, and each further node adds or swaps one
//! sidetrack. Popping frontier entries in `(cost, creation_order)` order
//! yields those paths in non-decreasing cost.
//!
//! Frontier entries do not own their path. They point into an append-only
//! trail arena, and each trail link points to its predecessor, so entries
//! that share a prefix share its links.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::node::{Cost, CostKey, Edge, FrontierKey, NodeId};
use crate::path_graph::{PathGraph, PathGraphNode};

/// How a path-graph node was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The root, entered from nowhere.
    Root,
    /// Into the top of an `Ht`: keeps the previous sidetrack and adds one.
    Cross,
    /// Down one heap level: swaps the previous sidetrack for a costlier one.
    Sibling,
}

#[derive(Debug, Clone, Copy)]
struct TrailLink {
    node: PathGraphNode,
    transition: Transition,
    parent: Option<usize>,
}

/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// cheapest (then oldest) entry first.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    link: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// One enumerated path-graph path.
#[derive(Debug, Clone, PartialEq)]
pub struct Deviation {
    /// Nodes from the root, each with the transition that entered it.
    pub nodes: Vec<(PathGraphNode, Transition)>,
    /// Accumulated detour over the tree path.
    pub cost: Cost,
    /// The frontier was empty after this step.
    pub frontier_empty: bool,
}

impl Deviation {
    /// The sidetrack edges the path takes, target side first.
    ///
    /// A node entered by a cross transition keeps the sidetrack of the node
    /// before it; the last node contributes its own.
    #[must_use]
    pub fn sidetracks(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .nodes
            .windows(2)
            .filter(|pair| pair[1].1 == Transition::Cross)
            .filter_map(|pair| pair[0].0.sidetrack())
            .collect();
        if let Some(last) = self.nodes.last().and_then(|(node, _)| node.sidetrack()) {
            edges.push(last);
        }
        edges
    }
}

/// Best-first enumerator with step/resume control.
#[derive(Debug)]
pub struct Enumerator {
    target: NodeId,
    frontier: BinaryHeap<FrontierEntry>,
    trail: Vec<TrailLink>,
    next_creation_order: u64,
    former_top: Option<PathGraphNode>,
    steps: u64,
    high_water: u64,
}

impl Enumerator {
    /// A fresh enumerator whose frontier holds only the root.
    #[must_use]
    pub fn new(target: NodeId) -> Self {
        let mut enumerator = Self {
            target,
            frontier: BinaryHeap::new(),
            trail: Vec::new(),
            next_creation_order: 0,
            former_top: None,
            steps: 0,
            high_water: 0,
        };
        enumerator.push(PathGraphNode::Root, Transition::Root, None, 0.0);
        enumerator
    }

    fn push(&mut self, node: PathGraphNode, transition: Transition, parent: Option<usize>, cost: Cost) {
        let link = self.trail.len();
        self.trail.push(TrailLink {
            node,
            transition,
            parent,
        });
        self.frontier.push(FrontierEntry {
            key: Reverse(FrontierKey {
                cost: CostKey(cost),
                creation_order: self.next_creation_order,
            }),
            link,
        });
        self.next_creation_order += 1;
        self.high_water = self.high_water.max(self.frontier.len() as u64);
    }

    /// Accumulated cost of the next deviation, without popping it.
    #[must_use]
    pub fn peek_cost(&self) -> Option<Cost> {
        self.frontier.peek().map(|entry| entry.key.0.cost.0)
    }

    /// Pop the cheapest entry, push its children, and return its path.
    ///
    /// Returns `None` when the frontier is empty.
    pub fn step(&mut self, path_graph: &PathGraph) -> Option<Deviation> {
        let entry = self.frontier.pop()?;
        let cost = entry.key.0.cost.0;
        let node = self.trail[entry.link].node;

        if let Some(child) = path_graph.cross_child(&node, self.target) {
            let child_cost = cost + path_graph.node_detour(&child);
            self.push(child, Transition::Cross, Some(entry.link), child_cost);
        }
        let node_detour = path_graph.node_detour(&node);
        for child in path_graph.sibling_children(&node) {
            let child_cost = cost + path_graph.node_detour(&child) - node_detour;
            self.push(child, Transition::Sibling, Some(entry.link), child_cost);
        }

        let frontier_empty = self.frontier.is_empty();
        if frontier_empty {
            self.former_top = Some(node);
        }
        self.steps += 1;
        trace!(step = self.steps, cost, ?node, frontier = self.frontier.len(), "deviation");

        Some(Deviation {
            nodes: self.trace(entry.link),
            cost,
            frontier_empty,
        })
    }

    fn trace(&self, link: usize) -> Vec<(PathGraphNode, Transition)> {
        let mut nodes = Vec::new();
        let mut current = Some(link);
        while let Some(index) = current {
            let link = self.trail[index];
            nodes.push((link.node, link.transition));
            current = link.parent;
        }
        nodes.reverse();
        nodes
    }

    /// Restart from the root over an extended path graph.
    ///
    /// Heap positions move when the path graph grows, so every pending entry
    /// is discarded and the walk starts over; deviations already returned
    /// come out again. Returns `true` if the node that last emptied the
    /// frontier still has no children.
    pub fn resume(&mut self, path_graph: &PathGraph) -> bool {
        let branch_exhausted = self.former_top.take().is_some_and(|node| {
            path_graph.cross_child(&node, self.target).is_none()
                && path_graph.sibling_children(&node).is_empty()
        });
        self.frontier.clear();
        self.trail.clear();
        self.push(PathGraphNode::Root, Transition::Root, None, 0.0);
        debug!(steps = self.steps, branch_exhausted, "enumerator resumed");
        branch_exhausted
    }

    /// Total steps taken, replays included.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Largest frontier size seen.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
