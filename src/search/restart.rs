use log::debug;

use crate::basic_types::SpaceStatus;
use crate::engine::Space;
use crate::search::Dfs;
use crate::search::Objective;
use crate::search::SearchOptions;
use crate::search::SearchStatistics;

/// Branch-and-bound by restarting: a DFS engine wrapped with an [`Objective`].
///
/// The engine keeps `root`, a clone of the initial space, as its reset point. Whenever a
/// solution has been found, the next call tightens `root` with
/// [`Objective::constrain`] relative to that solution and restarts the inner DFS from a clone
/// of `root`. Every returned solution is therefore strictly better than the previous one, and
/// `None` proves the last returned solution optimal.
pub struct Restart<O> {
    dfs: Dfs,
    root: Option<Space>,
    best: Option<Space>,
    objective: O,
    share: bool,
    exhausted: bool,
}

impl<O: Objective> Restart<O> {
    pub fn new(mut space: Space, options: SearchOptions, objective: O) -> Restart<O> {
        let share = options.share;
        let root = match space.status() {
            SpaceStatus::Failed => None,
            _ => Some(space.clone_space(share)),
        };

        Restart {
            dfs: Dfs::new(space, options),
            root,
            best: None,
            objective,
            share,
            exhausted: false,
        }
    }

    /// The next solution, strictly better than the previous one, or `None` when the last
    /// solution is optimal (or no solution exists).
    pub fn next(&mut self) -> Option<Space> {
        if self.exhausted {
            return None;
        }

        if let Some(best) = self.best.take() {
            let Some(root) = self.root.as_mut() else {
                self.exhausted = true;
                return None;
            };
            if self.objective.constrain(root, &best).is_err()
                || root.status() == SpaceStatus::Failed
            {
                debug!("the tightened root is infeasible; the last solution is optimal");
                self.exhausted = true;
                return None;
            }
            debug!("restarting with a tightened objective");
            self.dfs.reset(root.clone_space(self.share));
        }

        let Some(solution) = self.dfs.next() else {
            self.exhausted = true;
            return None;
        };
        let result = solution.clone_space(self.share);
        self.best = Some(solution);
        Some(result)
    }

    pub fn statistics(&self) -> &SearchStatistics {
        self.dfs.statistics()
    }
}
