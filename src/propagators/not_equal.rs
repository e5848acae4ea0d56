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

/// Propagator for the binary constraint `x != y`.
///
/// Nothing can be pruned until one side is assigned; once it is, its value is removed from the
/// other side and the propagator is subsumed.
#[derive(Clone, Debug)]
pub struct NotEqualPropagator<VarX, VarY> {
    x: VarX,
    y: VarY,
}

impl<VarX, VarY> NotEqualPropagator<VarX, VarY>
where
    VarX: IntegerVariable,
    VarY: IntegerVariable,
{
    pub fn new(x: VarX, y: VarY) -> Self {
        NotEqualPropagator { x, y }
    }
}

impl<VarX, VarY> Propagator for NotEqualPropagator<VarX, VarY>
where
    VarX: IntegerVariable,
    VarY: IntegerVariable,
{
    fn name(&self) -> &str {
        "IntNe"
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        let _ = context.register_advised(self.x.clone(), DomainEvents::ASSIGN, LocalId::from(0));
        let _ = context.register_advised(self.y.clone(), DomainEvents::ASSIGN, LocalId::from(1));

        if context.is_assigned(&self.x)
            && context.is_assigned(&self.y)
            && context.value(&self.x) == context.value(&self.y)
        {
            Err(Inconsistency)
        } else {
            Ok(())
        }
    }

    fn advise(
        &mut self,
        context: PropagationContext<'_>,
        _local_id: LocalId,
        _delta: DomainDelta,
    ) -> EnqueueDecision {
        if context.is_assigned(&self.x) && context.is_assigned(&self.y) {
            if context.value(&self.x) == context.value(&self.y) {
                EnqueueDecision::Fail
            } else {
                // Both sides are fixed to different values; there is nothing left to prune.
                EnqueueDecision::Skip
            }
        } else {
            EnqueueDecision::Enqueue
        }
    }

    fn cost(&self, _context: PropagationContext<'_>, _delta: ModEventDelta) -> PropagationCost {
        PropagationCost::Binary
    }

    fn propagate(
        &mut self,
        mut context: PropagationContextMut<'_>,
        _delta: ModEventDelta,
    ) -> PropagationStatus {
        if context.is_assigned(&self.x) {
            let value = context.value(&self.x);
            let _ = context.remove(&self.y, value)?;
            return Ok(ExecStatus::Subsumed);
        }
        if context.is_assigned(&self.y) {
            let value = context.value(&self.y);
            let _ = context.remove(&self.x, value)?;
            return Ok(ExecStatus::Subsumed);
        }
        if context.upper_bound(&self.x) < context.lower_bound(&self.y)
            || context.upper_bound(&self.y) < context.lower_bound(&self.x)
        {
            return Ok(ExecStatus::Subsumed);
        }

        Ok(ExecStatus::AtFixpoint)
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
    fn the_value_of_an_assigned_side_is_removed_from_the_other() {
        let mut space = Space::new();
        let x = space.new_variable(2, 2);
        let y = space.new_variable(0, 4);
        space
            .post(NotEqualPropagator::new(x, y))
            .expect("feasible at the root");

        assert_eq!(SpaceStatus::Solved, space.status());
        assert!(!space.contains(&y, 2));
        assert_eq!(0, space.num_propagators());
    }

    #[test]
    fn two_equal_assigned_sides_are_infeasible_at_the_root() {
        let mut space = Space::new();
        let x = space.new_variable(3, 3);
        let y = space.new_variable(3, 3);

        let result = space.post(NotEqualPropagator::new(x, y));
        assert!(result.is_err());
        assert!(space.is_failed());
    }
}
