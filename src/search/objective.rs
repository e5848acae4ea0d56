use crate::basic_types::ConstraintOperationError;
use crate::constraints;
use crate::engine::Space;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;

/// The seam through which the [`Restart`](crate::search::Restart) engine tightens a space
/// relative to the best solution found so far.
///
/// Implementations post a constraint on `space` that excludes `best` and everything at most as
/// good; the posted constraint must be strictly tightening, otherwise the engine does not
/// terminate.
pub trait Objective {
    fn constrain(&self, space: &mut Space, best: &Space) -> Result<(), ConstraintOperationError>;
}

/// An [`Objective`] driving the value of a view down: each solution must be strictly smaller
/// than the previous one.
#[derive(Clone, Debug)]
pub struct Minimise<Var> {
    objective: Var,
}

impl<Var> Minimise<Var> {
    pub fn new(objective: Var) -> Self {
        Minimise { objective }
    }
}

impl<Var> Objective for Minimise<Var>
where
    Var: IntegerVariable,
{
    fn constrain(&self, space: &mut Space, best: &Space) -> Result<(), ConstraintOperationError> {
        let bound = best.value(&self.objective);
        constraints::less_than_or_equals(space, vec![self.objective.clone()], bound - 1)
    }
}

/// An [`Objective`] driving the value of a view up: each solution must be strictly larger than
/// the previous one.
#[derive(Clone, Debug)]
pub struct Maximise<Var> {
    objective: Var,
}

impl<Var> Maximise<Var> {
    pub fn new(objective: Var) -> Self {
        Maximise { objective }
    }
}

impl<Var> Objective for Maximise<Var>
where
    Var: IntegerVariable + TransformableVariable<Var::AffineView>,
{
    fn constrain(&self, space: &mut Space, best: &Space) -> Result<(), ConstraintOperationError> {
        let bound = best.value(&self.objective);
        constraints::less_than_or_equals(space, vec![self.objective.negated()], -(bound + 1))
    }
}
