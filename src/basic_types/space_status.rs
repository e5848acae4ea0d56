use std::fmt::Display;

/// The outcome of driving a [`Space`](crate::Space) to fixpoint with
/// [`status`](crate::Space::status).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpaceStatus {
    /// Propagation emptied a domain; the space admits no solution.
    Failed,
    /// All propagators are at fixpoint and no brancher has a further choice: the current
    /// assignment is a solution.
    Solved,
    /// All propagators are at fixpoint and at least one brancher can still produce a choice.
    Branch,
}

impl Display for SpaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaceStatus::Failed => write!(f, "failed"),
            SpaceStatus::Solved => write!(f, "solved"),
            SpaceStatus::Branch => write!(f, "branch"),
        }
    }
}
