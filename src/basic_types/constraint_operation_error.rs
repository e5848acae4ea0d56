use thiserror::Error;

#[cfg(doc)]
use crate::Space;

/// Errors related to posting constraints to a [`Space`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// Error which indicates that a propagator was posted to a [`Space`] which had already
    /// failed.
    #[error("Posting the constraint failed because the space is in an infeasible state")]
    InfeasibleState,
    /// Error which indicates that attaching a propagator led to infeasibility at the root.
    #[error("Posting the constraint failed because it is infeasible at the root")]
    InfeasiblePropagator,
}
