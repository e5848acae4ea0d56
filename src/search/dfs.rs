use log::debug;

use crate::basic_types::SpaceStatus;
use crate::engine::Choice;
use crate::engine::Space;
use crate::search::SearchOptions;
use crate::search::SearchStatistics;
use crate::search::StopReason;

/// One open node of the search tree: the choice taken there, the next alternative to try, and
/// optionally a snapshot of the space before the choice was committed.
struct Frame {
    choice: Choice,
    next_alternative: u32,
    snapshot: Option<Space>,
}

/// Depth-first search over the tree of space clones.
///
/// The engine walks the tree by cloning and committing: at every branch it commits the first
/// alternative on the current space and records the choice on a stack; on backtracking it
/// reconstructs the sibling space by cloning the nearest snapshot above and replaying the
/// committed alternatives. With the default commit distance of 1 every level holds a snapshot
/// and no replay is needed.
///
/// Each call to [`next`](Dfs::next) returns an owned solution space, or `None` once the tree
/// is exhausted or a limit was hit (see [`SearchStatistics::stop_reason`]).
pub struct Dfs {
    options: SearchOptions,
    clone_rate: usize,
    statistics: SearchStatistics,
    stack: Vec<Frame>,
    current: Option<Space>,
}

impl Dfs {
    pub fn new(space: Space, options: SearchOptions) -> Dfs {
        let clone_rate = options.clone_rate.max(1);
        Dfs {
            options,
            clone_rate,
            statistics: SearchStatistics::default(),
            stack: Vec::new(),
            current: Some(space),
        }
    }

    /// The next solution, or `None` when the tree is exhausted or a limit was hit.
    pub fn next(&mut self) -> Option<Space> {
        loop {
            if self.check_stop() {
                return None;
            }

            let Some(mut space) = self.current.take() else {
                if !self.backtrack() {
                    debug!("search exhausted after {} nodes", self.statistics.nodes);
                    return None;
                }
                continue;
            };

            let status = space.status();
            self.statistics.nodes += 1;
            self.statistics.propagations += space.take_propagation_count();

            match status {
                SpaceStatus::Failed => {
                    self.statistics.failures += 1;
                }
                SpaceStatus::Solved => {
                    self.statistics.solutions += 1;
                    debug!("solution found after {} nodes", self.statistics.nodes);
                    return Some(space);
                }
                SpaceStatus::Branch => {
                    let choice = space.choice();
                    let snapshot = (self.stack.len() % self.clone_rate == 0)
                        .then(|| space.clone_space(self.options.share));
                    space.commit(&choice, 0);
                    self.stack.push(Frame {
                        choice,
                        next_alternative: 1,
                        snapshot,
                    });
                    self.statistics.peak_depth = self.statistics.peak_depth.max(self.stack.len());
                    self.current = Some(space);
                }
            }
        }
    }

    /// Re-roots the search at `space`, discarding the current tree walk but keeping the
    /// cumulative statistics.
    pub fn reset(&mut self, space: Space) {
        self.stack.clear();
        self.current = Some(space);
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Pops exhausted frames, then reconstructs the space for the next untried alternative of
    /// the deepest open frame. Returns `false` when the stack is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some(frame) = self.stack.last() {
            if frame.next_alternative < frame.choice.alternatives() {
                break;
            }
            let _ = self.stack.pop();
        }
        if self.stack.is_empty() {
            return false;
        }

        let target = self.stack.len() - 1;
        let base = (0..=target)
            .rev()
            .find(|&index| self.stack[index].snapshot.is_some())
            .expect("the bottom frame always stores a snapshot");

        let mut space = self.stack[base]
            .snapshot
            .as_ref()
            .expect("the frame was picked for its snapshot")
            .clone_space(self.options.share);
        // Replay the alternatives the current path took between the snapshot and the target;
        // propagation catches up in one status() call afterwards.
        for index in base..target {
            let frame = &self.stack[index];
            space.commit(&frame.choice, frame.next_alternative - 1);
        }

        let frame = &mut self.stack[target];
        space.commit(&frame.choice, frame.next_alternative);
        frame.next_alternative += 1;
        self.current = Some(space);
        true
    }

    fn check_stop(&mut self) -> bool {
        if self.statistics.stop_reason.is_some() {
            return true;
        }
        let reason = if self
            .options
            .node_limit
            .is_some_and(|limit| self.statistics.nodes >= limit)
        {
            Some(StopReason::NodeLimit)
        } else if self
            .options
            .fail_limit
            .is_some_and(|limit| self.statistics.failures >= limit)
        {
            Some(StopReason::FailLimit)
        } else if self
            .options
            .stop
            .as_mut()
            .is_some_and(|stop| stop.should_stop(&self.statistics))
        {
            Some(StopReason::Condition)
        } else {
            None
        };

        if let Some(reason) = reason {
            debug!("search stopped: {reason:?}");
            self.statistics.stop_reason = Some(reason);
            return true;
        }
        false
    }
}
