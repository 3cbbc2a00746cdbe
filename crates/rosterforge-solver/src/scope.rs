//! Search-level scope.

use std::time::{Duration, Instant};

/// Progress of a running search, as seen by terminations.
#[derive(Debug, Clone)]
pub struct SearchScope {
    start_time: Instant,
    node_count: u64,
    depth: usize,
}

impl SearchScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            node_count: 0,
            depth: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn increment_node_count(&mut self) -> u64 {
        self.node_count += 1;
        self.node_count
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}
