//! Search policy types.

use crate::error::KStarError;

/// Fruitless growths tolerated by the default policy.
pub const DEFAULT_IDLE_GROWTHS: u64 = 4;

/// Caller-facing search configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KStarPolicy {
    /// Factor by which both the inner-edge count and the expansion count
    /// must grow between two pauses of the tree search.
    pub growth_factor: u64,
    /// Discard paths that visit a node twice. Discarded paths do not count
    /// toward k.
    pub simple_paths_only: bool,
    /// Budget on enumerator steps (including replayed and discarded
    /// deviations). `None` is unbounded.
    pub max_steps: Option<u64>,
    /// How many tree growths in a row may leave the enumerator without a
    /// new path before the search gives up. Growth is geometric, so each
    /// one at least doubles the explored part of the graph. `None` keeps
    /// growing until the tree is exhausted, which never happens on an
    /// unbounded graph.
    pub max_idle_growths: Option<u64>,
}

impl KStarPolicy {
    /// Validate the policy before any search work.
    ///
    /// # Errors
    ///
    /// Returns [`KStarError::InvalidPolicy`] if `growth_factor < 2`, or if
    /// `max_steps` or `max_idle_growths` is `Some(0)`.
    pub fn validate(&self) -> Result<(), KStarError> {
        if self.growth_factor < 2 {
            return Err(KStarError::InvalidPolicy {
                detail: format!("growth_factor must be at least 2, got {}", self.growth_factor),
            });
        }
        if self.max_steps == Some(0) {
            return Err(KStarError::InvalidPolicy {
                detail: "max_steps must be positive when set".into(),
            });
        }
        if self.max_idle_growths == Some(0) {
            return Err(KStarError::InvalidPolicy {
                detail: "max_idle_growths must be positive when set".into(),
            });
        }
        Ok(())
    }
}

impl Default for KStarPolicy {
    fn default() -> Self {
        Self {
            growth_factor: 2,
            simple_paths_only: false,
            max_steps: None,
            max_idle_growths: Some(DEFAULT_IDLE_GROWTHS),
        }
    }
}

/// Pause bookkeeping for the incremental A*.
///
/// The first pause happens when the target first reaches the top of the
/// frontier. After that, a pause needs both counters to have grown by
/// `growth_factor` since the previous pause, so the cost of re-growing the
/// tree is amortized against the work already done.
#[derive(Debug, Clone)]
pub struct ExpansionPolicy {
    growth_factor: u64,
    target_reached: bool,
    inner_edges: u64,
    nodes_expanded: u64,
    inner_at_pause: u64,
    expanded_at_pause: u64,
}

impl ExpansionPolicy {
    #[must_use]
    pub fn new(growth_factor: u64) -> Self {
        Self {
            growth_factor,
            target_reached: false,
            inner_edges: 0,
            nodes_expanded: 0,
            inner_at_pause: 0,
            expanded_at_pause: 0,
        }
    }

    /// Decide whether the search should pause before popping the frontier
    /// top. Records the counters as the new baseline when it does.
    pub fn should_pause(&mut self, top_is_target: bool) -> bool {
        let pause = if self.target_reached {
            // A resumed run expands at least one node before pausing again.
            self.nodes_expanded > self.expanded_at_pause
                && has_grown(self.inner_edges, self.inner_at_pause, self.growth_factor)
                && has_grown(
                    self.nodes_expanded,
                    self.expanded_at_pause,
                    self.growth_factor,
                )
        } else if top_is_target {
            self.target_reached = true;
            true
        } else {
            false
        };

        if pause {
            self.inner_at_pause = self.inner_edges;
            self.expanded_at_pause = self.nodes_expanded;
        }
        pause
    }

    pub fn record_expansion(&mut self) {
        self.nodes_expanded += 1;
    }

    /// Count edges whose head is already expanded. Edges into a node that is
    /// still open are counted by the caller when that node is expanded.
    pub fn record_inner_edges(&mut self, count: u64) {
        self.inner_edges += count;
    }

    /// Whether the first pause (target on top of the frontier) has happened.
    #[must_use]
    pub fn target_reached(&self) -> bool {
        self.target_reached
    }

    #[must_use]
    pub fn nodes_expanded(&self) -> u64 {
        self.nodes_expanded
    }

    #[must_use]
    pub fn inner_edges(&self) -> u64 {
        self.inner_edges
    }
}

/// Growth test. A zero baseline is compared as `(current + 2) / (0 + 1)`.
fn has_grown(current: u64, previous: u64, factor: u64) -> bool {
    if previous == 0 {
        current + 2 >= factor
    } else {
        current >= previous.saturating_mul(factor)
    }
}
