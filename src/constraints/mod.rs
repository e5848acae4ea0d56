//! Posting helpers: each function creates the propagators enforcing one constraint and
//! attaches them to a [`Space`].
//!
//! Posting reports a [`ConstraintOperationError`] when the constraint is infeasible at the
//! root or the space has already failed; in both cases the space is failed.
//!
//! # Example
//! ```
//! use butternut_solver::constraints;
//! use butternut_solver::Space;
//!
//! let mut space = Space::new();
//! let a = space.new_variable(0, 3);
//! let b = space.new_variable(0, 3);
//!
//! constraints::equals(&mut space, vec![a, b], 3).expect("feasible at the root");
//! ```

use itertools::Itertools;

use crate::basic_types::ConstraintOperationError;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;
use crate::engine::Space;
use crate::propagators::AllDifferentPropagator;
use crate::propagators::LinearLessOrEqualPropagator;
use crate::propagators::NotEqualPropagator;

/// Posts `\sum terms <= rhs`.
pub fn less_than_or_equals<Var: IntegerVariable>(
    space: &mut Space,
    terms: Vec<Var>,
    rhs: i32,
) -> Result<(), ConstraintOperationError> {
    space.post(LinearLessOrEqualPropagator::new(
        terms.into_boxed_slice(),
        rhs,
    ))
}

/// Posts `\sum terms = rhs` as a pair of inequalities over the terms and their negations.
pub fn equals<Var>(
    space: &mut Space,
    terms: Vec<Var>,
    rhs: i32,
) -> Result<(), ConstraintOperationError>
where
    Var: IntegerVariable + TransformableVariable<Var::AffineView>,
{
    let negated = terms.iter().map(|term| term.negated()).collect_vec();
    less_than_or_equals(space, terms, rhs)?;
    less_than_or_equals(space, negated, -rhs)
}

/// Posts the binary comparison `x <= y`.
pub fn less_or_equal<Var>(
    space: &mut Space,
    x: Var,
    y: Var,
) -> Result<(), ConstraintOperationError>
where
    Var: IntegerVariable + TransformableVariable<Var::AffineView>,
{
    less_than_or_equals(space, vec![x.scaled(1), y.negated()], 0)
}

/// Posts the binary comparison `x < y`.
pub fn less<Var>(space: &mut Space, x: Var, y: Var) -> Result<(), ConstraintOperationError>
where
    Var: IntegerVariable + TransformableVariable<Var::AffineView>,
{
    less_than_or_equals(space, vec![x.scaled(1), y.negated()], -1)
}

/// Posts `x != y`.
pub fn not_equals<VarX, VarY>(
    space: &mut Space,
    x: VarX,
    y: VarY,
) -> Result<(), ConstraintOperationError>
where
    VarX: IntegerVariable,
    VarY: IntegerVariable,
{
    space.post(NotEqualPropagator::new(x, y))
}

/// Posts the constraint that all variables take pairwise distinct values.
pub fn all_different<Var: IntegerVariable>(
    space: &mut Space,
    variables: Vec<Var>,
) -> Result<(), ConstraintOperationError> {
    space.post(AllDifferentPropagator::new(variables))
}
