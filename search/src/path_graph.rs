//! The path graph: sidetrack heaps over the search tree.
//!
//! `Hin(v)` holds every known sidetrack edge whose head is `v`, ordered by
//! detour. `Ht(v)` holds the `Hin` tops of every node on the tree path from
//! the source to `v` (inclusive); it is built as a structural copy of the
//! parent's `Ht` plus one entry. All heaps hold edge handles and read detours
//! from one shared table, so a detour change is a table write followed by a
//! re-fix of every heap holding the edge.
//!
//! The implicit path graph the enumerator walks is defined over these heaps
//! by [`PathGraph::cross_child`] and [`PathGraph::sibling_children`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::astar::{GrowthOutcome, SearchTree};
use crate::heap::IndexedHeap;
use crate::node::{Cost, CostKey, Edge, NodeId};

/// Min-heap of sidetrack edges keyed by `(detour, edge)`.
pub type SidetrackHeap = IndexedHeap<Edge>;

fn detour_key(detours: &BTreeMap<Edge, Cost>) -> impl Fn(&Edge) -> (CostKey, Edge) + '_ {
    |edge| {
        let detour = detours.get(edge).copied().unwrap_or(Cost::INFINITY);
        (CostKey(detour), *edge)
    }
}

/// A node of the implicit path graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathGraphNode {
    /// The root: the tree path itself.
    Root,
    /// An entry of `Hin(edge.head)`.
    Hin { edge: Edge },
    /// An entry of `Ht(owner)`.
    Ht { owner: NodeId, edge: Edge },
}

impl PathGraphNode {
    /// The sidetrack edge this node stands for. `None` for the root.
    #[must_use]
    pub fn sidetrack(&self) -> Option<Edge> {
        match *self {
            Self::Root => None,
            Self::Hin { edge } | Self::Ht { edge, .. } => Some(edge),
        }
    }
}

/// The `Hin`/`Ht` collection, kept consistent with a [`SearchTree`].
#[derive(Debug, Clone, Default)]
pub struct PathGraph {
    detours: BTreeMap<Edge, Cost>,
    hin: BTreeMap<NodeId, SidetrackHeap>,
    ht: BTreeMap<NodeId, SidetrackHeap>,
    by_tail: BTreeMap<NodeId, BTreeSet<Edge>>,
    /// Nodes whose `Ht` must be rebuilt by the next `generate_hts`.
    stale: BTreeSet<NodeId>,
}

impl PathGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tree growth into the path graph: insert the new sidetracks,
    /// re-key entries around relinked nodes, then rebuild stale `Ht`s.
    pub fn apply(&mut self, tree: &SearchTree<'_>, outcome: &GrowthOutcome) {
        self.update_hin_nodes(tree, &outcome.new_sidetracks);
        self.refresh(tree, &outcome.relinked);
        self.generate_hts(tree);
        debug!(
            sidetracks = self.detours.len(),
            new = outcome.new_sidetracks.len(),
            relinked = outcome.relinked.len(),
            "path graph updated"
        );
    }

    /// Insert or re-key each edge in `Hin(edge.head)` at its current detour,
    /// patching every `Ht` that holds a changed `Hin` top.
    pub fn update_hin_nodes(&mut self, tree: &SearchTree<'_>, edges: &[Edge]) {
        for edge in edges {
            self.set_detour(tree, *edge, tree.detour(edge));
        }
    }

    /// Bring entries around `rescored` nodes in line with their new `g` and
    /// parent. Entries that became tree edges are dropped.
    pub fn refresh(&mut self, tree: &SearchTree<'_>, rescored: &BTreeSet<NodeId>) {
        for &node in rescored {
            if let Some(parent) = tree.parent(node) {
                self.remove_sidetrack(tree, &parent);
            }
            let mut touched: Vec<Edge> = self
                .hin
                .get(&node)
                .map(|heap| heap.iter().copied().collect())
                .unwrap_or_default();
            if let Some(outgoing) = self.by_tail.get(&node) {
                touched.extend(outgoing.iter().copied());
            }
            for edge in touched {
                self.set_detour(tree, edge, tree.detour(&edge));
            }
        }
        self.stale.extend(rescored.iter().copied());
    }

    /// Build `Ht` for every tree node that has none, was relinked, or sits
    /// below a rebuilt node.
    pub fn generate_hts(&mut self, tree: &SearchTree<'_>) {
        let key = detour_key(&self.detours);
        let mut rebuilt = 0usize;
        let mut stack = vec![(tree.source(), false)];
        while let Some((node, inherited)) = stack.pop() {
            let rebuild = inherited || self.stale.contains(&node) || !self.ht.contains_key(&node);
            if rebuild {
                let mut heap = tree
                    .parent(node)
                    .and_then(|edge| self.ht.get(&edge.tail))
                    .cloned()
                    .unwrap_or_default();
                if let Some(top) = self.hin.get(&node).and_then(IndexedHeap::top) {
                    heap.push(top, &key);
                }
                self.ht.insert(node, heap);
                rebuilt += 1;
            }
            stack.extend(tree.children(node).map(|child| (child, rebuild)));
        }
        self.stale.clear();
        trace!(rebuilt, "generated Ht heaps");
    }

    fn hin_top(&self, node: NodeId) -> Option<(Edge, CostKey)> {
        let edge = self.hin.get(&node)?.top()?;
        Some((edge, CostKey(self.detours.get(&edge).copied()?)))
    }

    fn set_detour(&mut self, tree: &SearchTree<'_>, edge: Edge, detour: Cost) {
        let old_top = self.hin_top(edge.head);
        self.detours.insert(edge, detour);
        self.by_tail.entry(edge.tail).or_default().insert(edge);
        self.hin
            .entry(edge.head)
            .or_default()
            .push(edge, &detour_key(&self.detours));
        self.propagate(tree, edge.head, old_top);
    }

    fn remove_sidetrack(&mut self, tree: &SearchTree<'_>, edge: &Edge) {
        if !self.hin.get(&edge.head).is_some_and(|heap| heap.contains(edge)) {
            return;
        }
        let old_top = self.hin_top(edge.head);
        if let Some(heap) = self.hin.get_mut(&edge.head) {
            heap.remove(edge, &detour_key(&self.detours));
        }
        self.propagate(tree, edge.head, old_top);
        self.detours.remove(edge);
        if let Some(outgoing) = self.by_tail.get_mut(&edge.tail) {
            outgoing.remove(edge);
        }
    }

    /// Patch `Ht(head)` and the `Ht`s below it after `Hin(head)`'s top moved
    /// from `old_top`. Descent stops wherever the old top is absent.
    fn propagate(&mut self, tree: &SearchTree<'_>, head: NodeId, old_top: Option<(Edge, CostKey)>) {
        let new_top = self.hin_top(head);
        if old_top == new_top {
            return;
        }
        let key = detour_key(&self.detours);
        let mut stack = vec![head];
        while let Some(node) = stack.pop() {
            let Some(ht) = self.ht.get_mut(&node) else {
                continue;
            };
            let patched = match (old_top, new_top) {
                (Some((old, _)), Some((new, _))) => ht.replace(&old, new, &key),
                (None, Some((new, _))) => {
                    ht.push(new, &key);
                    true
                }
                (Some((old, _)), None) => ht.remove(&old, &key),
                (None, None) => false,
            };
            if patched {
                stack.extend(tree.children(node));
            }
        }
    }

    /// Stored detour of a sidetrack edge.
    #[must_use]
    pub fn detour(&self, edge: &Edge) -> Option<Cost> {
        self.detours.get(edge).copied()
    }

    /// Detour of the sidetrack a path-graph node stands for (zero for the root).
    #[must_use]
    pub fn node_detour(&self, node: &PathGraphNode) -> Cost {
        node.sidetrack()
            .and_then(|edge| self.detour(&edge))
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn hin(&self, node: NodeId) -> Option<&SidetrackHeap> {
        self.hin.get(&node)
    }

    #[must_use]
    pub fn ht(&self, node: NodeId) -> Option<&SidetrackHeap> {
        self.ht.get(&node)
    }

    /// Number of stored sidetrack edges.
    #[must_use]
    pub fn sidetrack_count(&self) -> usize {
        self.detours.len()
    }

    /// The cross child of `node`: the top of `Ht(target)` for the root, the
    /// top of `Ht(tail)` for a node standing for sidetrack `(tail, head, i)`.
    #[must_use]
    pub fn cross_child(&self, node: &PathGraphNode, target: NodeId) -> Option<PathGraphNode> {
        let owner = node.sidetrack().map_or(target, |edge| edge.tail);
        let edge = self.ht.get(&owner)?.top()?;
        Some(PathGraphNode::Ht { owner, edge })
    }

    /// Heap children of `node` inside its own heaps.
    #[must_use]
    pub fn sibling_children(&self, node: &PathGraphNode) -> Vec<PathGraphNode> {
        match *node {
            PathGraphNode::Root => Vec::new(),
            PathGraphNode::Hin { edge } => self.hin_children(&edge).collect(),
            PathGraphNode::Ht { owner, edge } => {
                let mut children: Vec<PathGraphNode> = self
                    .ht
                    .get(&owner)
                    .and_then(|heap| Some((heap, heap.position(&edge)?)))
                    .into_iter()
                    .flat_map(|(heap, pos)| heap.children(pos))
                    .map(|child| PathGraphNode::Ht { owner, edge: child })
                    .collect();
                children.extend(self.hin_children(&edge));
                children
            }
        }
    }

    fn hin_children(&self, edge: &Edge) -> impl Iterator<Item = PathGraphNode> + '_ {
        self.hin
            .get(&edge.head)
            .and_then(|heap| Some((heap, heap.position(edge)?)))
            .into_iter()
            .flat_map(|(heap, pos)| heap.children(pos))
            .map(|child| PathGraphNode::Hin { edge: child })
    }
}
