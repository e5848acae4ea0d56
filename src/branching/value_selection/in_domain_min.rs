use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// [`ValueSelector`] which chooses the lower bound of the provided variable.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMin {
    fn select_value(&mut self, context: &SelectionContext<'_>, decision_variable: Var) -> i32 {
        context.lower_bound(&decision_variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::DomainStore;

    #[test]
    fn the_lower_bound_is_selected() {
        let mut domains = DomainStore::default();
        let x = domains.grow(3, 10);

        let context = SelectionContext::new(&domains);
        assert_eq!(3, InDomainMin.select_value(&context, x));
    }
}
