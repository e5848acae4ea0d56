use std::sync::Arc;

use fixedbitset::FixedBitSet;
use itertools::Itertools;

use crate::basic_types::ExecStatus;
use crate::basic_types::Inconsistency;
use crate::basic_types::ModEventDelta;
use crate::basic_types::PropagationStatus;
use crate::engine::notifications::DomainEvents;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Value-based propagator for the all-different constraint: whenever a variable is assigned,
/// its value is removed from every other domain, to an internal fixpoint.
///
/// The variable list is immutable after posting and shared between space clones when cloning
/// with `share = true`; the scratch bit set is duplicated regardless.
#[derive(Clone, Debug)]
pub struct AllDifferentPropagator<Var> {
    variables: Arc<[Var]>,
    seen: FixedBitSet,
    offset: i32,
}

impl<Var> AllDifferentPropagator<Var>
where
    Var: IntegerVariable,
{
    pub fn new(variables: impl Into<Arc<[Var]>>) -> Self {
        AllDifferentPropagator {
            variables: variables.into(),
            seen: FixedBitSet::new(),
            offset: 0,
        }
    }
}

impl<Var: 'static> Propagator for AllDifferentPropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        for (i, variable) in self.variables.iter().enumerate() {
            let _ = context.register(
                variable.clone(),
                DomainEvents::ASSIGN,
                LocalId::from(i as u32),
            );
        }

        let lowest = self
            .variables
            .iter()
            .map(|variable| context.lower_bound(variable))
            .min();
        let highest = self
            .variables
            .iter()
            .map(|variable| context.upper_bound(variable))
            .max();
        if let (Some(lowest), Some(highest)) = (lowest, highest) {
            self.offset = lowest;
            self.seen = FixedBitSet::with_capacity((highest - lowest + 1) as usize);
        }

        // Two variables assigned to the same value make the constraint infeasible at the root.
        for variable in self.variables.iter() {
            if !context.is_assigned(variable) {
                continue;
            }
            let bit = (context.value(variable) - self.offset) as usize;
            if self.seen.contains(bit) {
                return Err(Inconsistency);
            }
            self.seen.insert(bit);
        }

        Ok(())
    }

    fn propagate(
        &mut self,
        mut context: PropagationContextMut<'_>,
        _delta: ModEventDelta,
    ) -> PropagationStatus {
        loop {
            let assigned = self
                .variables
                .iter()
                .enumerate()
                .filter(|(_, variable)| context.is_assigned(*variable))
                .map(|(i, variable)| (i, context.value(variable)))
                .collect_vec();

            self.seen.clear();
            for &(_, value) in &assigned {
                let bit = (value - self.offset) as usize;
                if self.seen.contains(bit) {
                    return Err(Inconsistency);
                }
                self.seen.insert(bit);
            }

            let mut newly_assigned = false;
            for (i, variable) in self.variables.iter().enumerate() {
                if context.is_assigned(variable) {
                    continue;
                }
                for &(owner, value) in &assigned {
                    if owner == i {
                        continue;
                    }
                    let _ = context.remove(variable, value)?;
                }
                newly_assigned |= context.is_assigned(variable);
            }

            if !newly_assigned {
                break;
            }
        }

        let all_assigned = self
            .variables
            .iter()
            .all(|variable| context.is_assigned(variable));
        if all_assigned {
            Ok(ExecStatus::Subsumed)
        } else {
            Ok(ExecStatus::AtFixpoint)
        }
    }

    fn clone_boxed(&self, share: bool) -> Box<dyn Propagator> {
        if share {
            Box::new(self.clone())
        } else {
            Box::new(AllDifferentPropagator {
                variables: self.variables.iter().cloned().collect(),
                seen: self.seen.clone(),
                offset: self.offset,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::SpaceStatus;
    use crate::engine::Space;

    #[test]
    fn assigned_values_are_removed_from_the_other_domains() {
        let mut space = Space::new();
        let x = space.new_variable(0, 0);
        let y = space.new_variable(0, 2);
        let z = space.new_variable(0, 2);
        space
            .post(AllDifferentPropagator::new(vec![x, y, z]))
            .expect("feasible at the root");

        assert_eq!(SpaceStatus::Solved, space.status());
        assert_eq!(1, space.lower_bound(&y));
        assert_eq!(1, space.lower_bound(&z));
    }

    #[test]
    fn removals_cascade_to_an_internal_fixpoint() {
        let mut space = Space::new();
        let x = space.new_variable(0, 0);
        let y = space.new_variable(0, 1);
        let z = space.new_variable(0, 2);
        space
            .post(AllDifferentPropagator::new(vec![x, y, z]))
            .expect("feasible at the root");

        assert_eq!(SpaceStatus::Solved, space.status());
        assert_eq!(1, space.value(&y));
        assert_eq!(2, space.value(&z));
    }

    #[test]
    fn duplicate_assignments_are_infeasible_at_the_root() {
        let mut space = Space::new();
        let x = space.new_variable(1, 1);
        let y = space.new_variable(1, 1);

        let result = space.post(AllDifferentPropagator::new(vec![x, y]));
        assert!(result.is_err());
        assert!(space.is_failed());
    }
}
