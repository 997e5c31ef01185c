//! Search statistics accumulated over a game.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters owned by a game and passed into every search.
///
/// Never reset mid-game; each computer turn adds to the running totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited, keyed by depth below the root.
    pub evaluations_per_depth: BTreeMap<usize, u64>,
    /// Nodes that were expanded (had their candidates enumerated).
    pub parents: u64,
    /// Children produced by expanded nodes.
    pub children: u64,
    /// Wall-clock time spent searching, across all turns.
    pub total_seconds: f64,
    /// Number of searches run.
    pub searches: u32,
    /// Searches that hit the time budget before finishing.
    pub timeouts: u32,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a node visit at `depth`.
    pub fn record_node(&mut self, depth: usize) {
        *self.evaluations_per_depth.entry(depth).or_insert(0) += 1;
    }

    /// Count one expanded node and the children it produced.
    pub fn record_branch(&mut self, children: u64) {
        self.parents += 1;
        self.children += children;
    }

    /// Record the end of one search.
    pub fn record_search(&mut self, elapsed: Duration, timed_out: bool) {
        self.total_seconds += elapsed.as_secs_f64();
        self.searches += 1;
        if timed_out {
            self.timeouts += 1;
        }
    }

    pub fn total_evaluations(&self) -> u64 {
        self.evaluations_per_depth.values().sum()
    }

    /// Average children per expanded node, 0.0 before any expansion.
    pub fn branching_factor(&self) -> f64 {
        if self.parents == 0 {
            0.0
        } else {
            self.children as f64 / self.parents as f64
        }
    }

    /// Mean depth of visited nodes, weighted by visit count.
    pub fn average_depth(&self) -> f64 {
        let total = self.total_evaluations();
        if total == 0 {
            return 0.0;
        }
        let weighted: u64 = self
            .evaluations_per_depth
            .iter()
            .map(|(&depth, &count)| depth as u64 * count)
            .sum();
        weighted as f64 / total as f64
    }

    /// Evaluations per second over all searches.
    pub fn evaluations_per_second(&self) -> f64 {
        if self.total_seconds > 0.0 {
            self.total_evaluations() as f64 / self.total_seconds
        } else {
            0.0
        }
    }

    /// `depth:count` pairs, e.g. `0:1 1:30 2:812`.
    pub fn format_per_depth(&self) -> String {
        self.evaluations_per_depth
            .iter()
            .map(|(depth, count)| format!("{depth}:{count}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_nodes_by_depth() {
        let mut stats = SearchStats::new();
        stats.record_node(0);
        stats.record_node(1);
        stats.record_node(1);
        stats.record_node(2);

        assert_eq!(stats.total_evaluations(), 4);
        assert_eq!(stats.evaluations_per_depth[&1], 2);
        assert_eq!(stats.format_per_depth(), "0:1 1:2 2:1");
        // (0 + 1 + 1 + 2) / 4
        assert!((stats.average_depth() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_branching_factor() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.branching_factor(), 0.0);

        stats.record_branch(10);
        stats.record_branch(20);
        assert!((stats.branching_factor() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_search_accumulates() {
        let mut stats = SearchStats::new();
        stats.record_search(Duration::from_millis(500), false);
        stats.record_search(Duration::from_millis(1500), true);

        assert_eq!(stats.searches, 2);
        assert_eq!(stats.timeouts, 1);
        assert!((stats.total_seconds - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_without_data_are_zero() {
        let stats = SearchStats::new();
        assert_eq!(stats.evaluations_per_second(), 0.0);
        assert_eq!(stats.average_depth(), 0.0);
        assert!(!stats.branching_factor().is_nan());
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut stats = SearchStats::new();
        stats.record_node(3);
        let json = serde_json::to_string(&stats).unwrap();
        let parsed: SearchStats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stats);
    }
}
