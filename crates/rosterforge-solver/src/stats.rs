//! Search statistics.

use std::time::Duration;

/// Counters collected during one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Nodes visited, including the root.
    pub nodes: u64,
    /// Nodes cut because their objective bound could not beat the incumbent.
    pub pruned: u64,
    /// Nodes cut because propagation emptied a domain.
    pub conflicts: u64,
    /// Improving solutions found.
    pub incumbents: u64,
    /// Deepest decision level reached.
    pub max_depth: usize,
    /// Wall-clock time of the solve.
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Nodes per second, zero when nothing was measured.
    pub fn node_speed(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.nodes as f64 / secs) as u64
        } else {
            0
        }
    }
}
