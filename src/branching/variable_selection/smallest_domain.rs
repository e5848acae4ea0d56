use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the unfixed variable with the smallest domain,
/// breaking ties by the order in the provided list (the first-fail heuristic).
#[derive(Clone, Debug)]
pub struct SmallestDomain<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> SmallestDomain<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The SmallestDomain variable selector was not provided with any variables");
        }
        SmallestDomain {
            variables: variables.to_vec(),
        }
    }
}

impl<Var> VariableSelector<Var> for SmallestDomain<Var>
where
    Var: IntegerVariable,
{
    fn select_variable(&mut self, context: &SelectionContext<'_>) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_assigned(*variable))
            .min_by_key(|variable| context.size(*variable))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::DomainStore;

    #[test]
    fn the_smallest_unfixed_domain_is_selected() {
        let mut domains = DomainStore::default();
        let x = domains.grow(0, 10);
        let y = domains.grow(0, 2);
        let z = domains.grow(4, 4);
        let mut strategy = SmallestDomain::new(&[x, y, z]);

        let context = SelectionContext::new(&domains);
        assert_eq!(Some(y), strategy.select_variable(&context));
    }
}
