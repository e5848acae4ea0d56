/// The result of invoking a propagator. Propagation either succeeds, reporting how the
/// propagator relates to its fixpoint, or identifies that it has made the space inconsistent.
pub type PropagationStatus = Result<ExecStatus, Inconsistency>;

/// The successful outcomes of [`propagate`](crate::propagation::Propagator::propagate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecStatus {
    /// The propagator is at fixpoint for the events it consumed: running it again without new
    /// events would not prune anything. Events the propagator raised itself are not replayed to
    /// it.
    AtFixpoint,
    /// The propagator may be able to prune more; it is re-enqueued unconditionally.
    NotAtFixpoint,
    /// The constraint holds for every remaining combination of values. The propagator is
    /// detached from all its subscriptions and never scheduled again, in this space or any
    /// clone of it.
    Subsumed,
}

/// Error which indicates that a domain became empty, the expected outcome of over-constraint.
///
/// This is recovered from by search through backtracking and never surfaces to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// A propagator determined that the current space admits no solution, either because a mutation
/// emptied a domain or because the propagator's own reasoning found a contradiction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inconsistency;

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency
    }
}
