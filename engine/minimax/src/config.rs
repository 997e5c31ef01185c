//! Search configuration parameters.

use std::time::Duration;

/// Configuration for a minimax search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Depth at which the heuristic is applied (root is depth 0).
    pub max_depth: usize,

    /// Lowest depth the adaptive depth manager may fall back to.
    pub min_depth: usize,

    /// Wall-clock budget per move. The search stops expanding once 90% of
    /// it has elapsed.
    pub max_time: Duration,

    /// Prune with alpha-beta bounds. Off means plain minimax; the best
    /// score is the same either way.
    pub alpha_beta: bool,

    /// Pick uniformly among equally scored root moves. Off always takes
    /// the first one in candidate order.
    pub randomize_moves: bool,

    /// Let a [`crate::DepthManager`] move the depth between turns.
    pub adaptive_depth: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_depth: 2,
            max_time: Duration::from_secs(5),
            alpha_beta: true,
            randomize_moves: true,
            adaptive_depth: false,
        }
    }
}

impl SearchConfig {
    /// Shallow, deterministic config with a generous time budget for tests.
    pub fn for_testing() -> Self {
        Self {
            max_depth: 2,
            min_depth: 1,
            max_time: Duration::from_secs(60),
            alpha_beta: true,
            randomize_moves: false,
            adaptive_depth: false,
        }
    }

    /// Builder pattern: set maximum depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder pattern: set minimum depth.
    pub fn with_min_depth(mut self, depth: usize) -> Self {
        self.min_depth = depth;
        self
    }

    /// Builder pattern: set the per-move time budget.
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = max_time;
        self
    }

    /// Builder pattern: toggle alpha-beta pruning.
    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    /// Builder pattern: toggle random tie-breaking at the root.
    pub fn with_randomize_moves(mut self, enabled: bool) -> Self {
        self.randomize_moves = enabled;
        self
    }

    /// Builder pattern: toggle adaptive depth.
    pub fn with_adaptive_depth(mut self, enabled: bool) -> Self {
        self.adaptive_depth = enabled;
        self
    }
}
