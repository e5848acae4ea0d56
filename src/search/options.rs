use crate::search::SearchStatistics;

/// A user-supplied stop condition, polled once per explored node.
pub trait Stop {
    /// Returns `true` when the engine should stop searching.
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool;
}

/// Configuration of a search engine.
pub struct SearchOptions {
    /// Stop after this many explored nodes.
    pub node_limit: Option<u64>,
    /// Stop after this many failed nodes.
    pub fail_limit: Option<u64>,
    /// The commit distance: a snapshot clone is kept every `clone_rate` levels of the search
    /// tree, and intermediate spaces are recomputed by replaying commits from the nearest
    /// snapshot. A rate of 1 keeps a clone at every level.
    pub clone_rate: usize,
    /// Whether clones may share immutable sub-objects (see
    /// [`Space::clone_space`](crate::Space::clone_space)).
    pub share: bool,
    /// An additional stop condition polled with the current statistics.
    pub stop: Option<Box<dyn Stop>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            node_limit: None,
            fail_limit: None,
            clone_rate: 1,
            share: true,
            stop: None,
        }
    }
}
