use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the first variable which is not fixed given the order
/// in the provided list.
#[derive(Clone, Debug)]
pub struct InputOrder<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> InputOrder<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl<Var> VariableSelector<Var> for InputOrder<Var>
where
    Var: IntegerVariable,
{
    fn select_variable(&mut self, context: &SelectionContext<'_>) -> Option<Var> {
        self.variables
            .iter()
            .find(|variable| !context.is_assigned(*variable))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::DomainStore;

    #[test]
    fn the_first_unfixed_variable_is_selected() {
        let mut domains = DomainStore::default();
        let x = domains.grow(0, 10);
        let y = domains.grow(5, 20);
        let mut strategy = InputOrder::new(&[x, y]);

        {
            let context = SelectionContext::new(&domains);
            assert_eq!(Some(x), strategy.select_variable(&context));
        }

        let _ = domains.assign(x, 0).expect("non-empty");

        let context = SelectionContext::new(&domains);
        assert_eq!(Some(y), strategy.select_variable(&context));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let mut domains = DomainStore::default();
        let x = domains.grow(10, 10);
        let y = domains.grow(20, 20);
        let mut strategy = InputOrder::new(&[x, y]);

        let context = SelectionContext::new(&domains);
        assert_eq!(None, strategy.select_variable(&context));
    }
}
