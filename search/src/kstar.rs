//! K* orchestration: interleave tree growth with path-graph enumeration.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::assemble::assemble;
use crate::astar::SearchTree;
use crate::contract::Graph;
use crate::enumerator::Enumerator;
use crate::error::KStarError;
use crate::node::{Edge, Path};
use crate::path_graph::PathGraph;
use crate::policy::KStarPolicy;

/// Lazily yields source → target paths in non-decreasing cost.
///
/// Nothing is searched until the first call to `next`. The iterator ends
/// when every path has been produced (possibly never, on a graph with a
/// cycle reachable between source and target), the step budget runs out,
/// or too many tree growths in a row turn up no new path.
pub struct KStar<'g> {
    tree: SearchTree<'g>,
    path_graph: PathGraph,
    enumerator: Enumerator,
    policy: KStarPolicy,
    emitted: BTreeSet<Vec<Edge>>,
    idle_growths: u64,
    started: bool,
    finished: bool,
}

impl<'g> KStar<'g> {
    /// Prepare a search over `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`KStarError::InvalidPolicy`] if the policy fails validation.
    pub fn new(graph: &'g dyn Graph, policy: &KStarPolicy) -> Result<Self, KStarError> {
        policy.validate()?;
        Ok(Self {
            tree: SearchTree::new(graph, policy.growth_factor),
            path_graph: PathGraph::new(),
            enumerator: Enumerator::new(graph.target()),
            policy: policy.clone(),
            emitted: BTreeSet::new(),
            idle_growths: 0,
            started: false,
            finished: false,
        })
    }

    /// The underlying search tree.
    #[must_use]
    pub fn tree(&self) -> &SearchTree<'g> {
        &self.tree
    }

    /// Enumerator steps taken so far, replays and filtered paths included.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.enumerator.steps()
    }

    fn start(&mut self) -> bool {
        self.started = true;
        let outcome = self.tree.run();
        if outcome.exhausted {
            debug!(
                source = self.tree.source(),
                target = self.tree.target(),
                "target unreachable"
            );
            return false;
        }
        self.path_graph.apply(&self.tree, &outcome);
        debug!(
            shortest = ?self.tree.min_path_cost(),
            sidetracks = self.path_graph.sidetrack_count(),
            "first pause reached"
        );
        true
    }

    fn grow(&mut self) {
        let outcome = self.tree.run();
        self.path_graph.apply(&self.tree, &outcome);
        let branch_exhausted = self.enumerator.resume(&self.path_graph);
        debug!(
            expanded = self.tree.nodes_expanded(),
            exhausted = outcome.exhausted,
            sidetracks = outcome.new_sidetracks.len(),
            branch_exhausted,
            bound = ?self.tree.frontier_bound(),
            "search tree grown"
        );
    }

    /// Whether the next deviation could still be undercut by a path through
    /// nodes the tree has not expanded.
    fn needs_growth(&self, peek: f64) -> bool {
        if self.tree.is_exhausted() {
            return false;
        }
        match (self.tree.min_path_cost(), self.tree.frontier_bound()) {
            (Some(base), Some(bound)) => base + peek > bound,
            _ => false,
        }
    }

    fn next_path(&mut self) -> Option<Path> {
        if self.finished {
            return None;
        }
        if !self.started && !self.start() {
            self.finished = true;
            return None;
        }
        loop {
            let Some(peek) = self.enumerator.peek_cost() else {
                if self.tree.is_exhausted() {
                    debug!(emitted = self.emitted.len(), "all paths enumerated");
                    self.finished = true;
                    return None;
                }
                if self
                    .policy
                    .max_idle_growths
                    .is_some_and(|max| self.idle_growths >= max)
                {
                    debug!(
                        idle_growths = self.idle_growths,
                        expanded = self.tree.nodes_expanded(),
                        "no new path after growing, giving up"
                    );
                    self.finished = true;
                    return None;
                }
                self.idle_growths += 1;
                self.grow();
                continue;
            };
            if self.needs_growth(peek) {
                self.grow();
                continue;
            }
            if self
                .policy
                .max_steps
                .is_some_and(|max| self.enumerator.steps() >= max)
            {
                debug!(steps = self.enumerator.steps(), "step budget spent");
                self.finished = true;
                return None;
            }
            let Some(deviation) = self.enumerator.step(&self.path_graph) else {
                continue;
            };
            let path = assemble(&self.tree, &deviation.sidetracks());
            if !self.emitted.insert(path.edges.clone()) {
                trace!(cost = path.cost, "replayed path skipped");
                continue;
            }
            self.idle_growths = 0;
            if self.policy.simple_paths_only && !path.is_simple() {
                trace!(cost = path.cost, "path with loop skipped");
                continue;
            }
            return Some(path);
        }
    }
}

impl Iterator for KStar<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        self.next_path()
    }
}

/// Find up to `k` shortest paths from `graph.source()` to `graph.target()`.
///
/// Fewer than `k` paths are returned when fewer exist (none when the target
/// is unreachable). The result for `k` is always a prefix of the result for
/// `k + 1`.
///
/// # Errors
///
/// Returns [`KStarError::InvalidPolicy`] if the policy fails validation.
pub fn run(graph: &dyn Graph, k: usize, policy: &KStarPolicy) -> Result<Vec<Path>, KStarError> {
    Ok(KStar::new(graph, policy)?.take(k).collect())
}
