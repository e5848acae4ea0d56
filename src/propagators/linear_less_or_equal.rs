use itertools::Itertools;

use crate::basic_types::ExecStatus;
use crate::basic_types::Inconsistency;
use crate::basic_types::ModEventDelta;
use crate::basic_types::PropagationStatus;
use crate::engine::notifications::DomainDelta;
use crate::engine::notifications::DomainEvents;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::PropagationCost;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Propagator for the constraint `\sum x_i <= c`.
///
/// The lower bound of the left-hand side is maintained incrementally through advised
/// subscriptions, so a run of the propagator never has to sum over all terms.
#[derive(Clone, Debug)]
pub struct LinearLessOrEqualPropagator<Var> {
    x: Box<[Var]>,
    c: i32,
    /// The lower bound of the sum of the left-hand side. This is incremental state.
    lower_bound_left_hand_side: i64,
    /// The value at index `i` is the lower bound currently accounted for `x[i]`.
    current_bounds: Box<[i64]>,
}

impl<Var> LinearLessOrEqualPropagator<Var>
where
    Var: IntegerVariable,
{
    pub fn new(x: Box<[Var]>, c: i32) -> Self {
        let current_bounds = (0..x.len()).map(|_| 0).collect_vec().into();

        // The incremental state is initialised in `Propagator::initialise`.
        LinearLessOrEqualPropagator::<Var> {
            x,
            c,
            lower_bound_left_hand_side: 0,
            current_bounds,
        }
    }
}

impl<Var: 'static> Propagator for LinearLessOrEqualPropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        let mut lower_bound_left_hand_side = 0_i64;
        for (i, x_i) in self.x.iter().enumerate() {
            let _ = context.register_advised(
                x_i.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(i as u32),
            );
            let bound = context.lower_bound(x_i) as i64;
            lower_bound_left_hand_side += bound;
            self.current_bounds[i] = bound;
        }
        self.lower_bound_left_hand_side = lower_bound_left_hand_side;

        if (self.c as i64) < self.lower_bound_left_hand_side {
            Err(Inconsistency)
        } else {
            Ok(())
        }
    }

    fn advise(
        &mut self,
        context: PropagationContext<'_>,
        local_id: LocalId,
        _delta: DomainDelta,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;

        // Several batched mutations of the same variable may already be reflected in the
        // current bound, in which case the later deltas contribute nothing.
        let new_bound = context.lower_bound(&self.x[index]) as i64;
        let old_bound = self.current_bounds[index];
        self.lower_bound_left_hand_side += new_bound - old_bound;
        self.current_bounds[index] = new_bound;

        EnqueueDecision::Enqueue
    }

    fn cost(&self, _context: PropagationContext<'_>, _delta: ModEventDelta) -> PropagationCost {
        PropagationCost::for_arity(self.x.len())
    }

    fn propagate(
        &mut self,
        mut context: PropagationContextMut<'_>,
        _delta: ModEventDelta,
    ) -> PropagationStatus {
        if (self.c as i64) < self.lower_bound_left_hand_side {
            return Err(Inconsistency);
        }

        let mut sum_of_upper_bounds = 0_i64;
        for (i, x_i) in self.x.iter().enumerate() {
            let bound = self.c as i64 - (self.lower_bound_left_hand_side - self.current_bounds[i]);

            if (context.upper_bound(x_i) as i64) > bound {
                let clamped = bound.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
                let _ = context.set_upper_bound(x_i, clamped)?;
            }
            sum_of_upper_bounds += context.upper_bound(x_i) as i64;
        }

        // Once even the largest admissible values satisfy the constraint, it can never be
        // violated again.
        if sum_of_upper_bounds <= self.c as i64 {
            Ok(ExecStatus::Subsumed)
        } else {
            Ok(ExecStatus::AtFixpoint)
        }
    }

    fn clone_boxed(&self, _share: bool) -> Box<dyn Propagator> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::SpaceStatus;
    use crate::engine::Space;

    #[test]
    fn upper_bounds_are_tightened_by_the_lower_bounds_of_the_other_terms() {
        let mut space = Space::new();
        let x = space.new_variable(2, 10);
        let y = space.new_variable(0, 10);
        space
            .post(LinearLessOrEqualPropagator::new(vec![x, y].into(), 7))
            .expect("feasible at the root");

        assert_eq!(SpaceStatus::Solved, space.status());
        assert_eq!(7, space.upper_bound(&x));
        assert_eq!(5, space.upper_bound(&y));
    }

    #[test]
    fn a_violated_sum_of_lower_bounds_is_infeasible_at_the_root() {
        let mut space = Space::new();
        let x = space.new_variable(3, 5);
        let y = space.new_variable(3, 5);

        let result = space.post(LinearLessOrEqualPropagator::new(vec![x, y].into(), 5));
        assert!(result.is_err());
        assert!(space.is_failed());
    }
}
