use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// [`ValueSelector`] which chooses the upper bound of the provided variable.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMax;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMax {
    fn select_value(&mut self, context: &SelectionContext<'_>, decision_variable: Var) -> i32 {
        context.upper_bound(&decision_variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::DomainStore;

    #[test]
    fn the_upper_bound_is_selected() {
        let mut domains = DomainStore::default();
        let x = domains.grow(3, 10);

        let context = SelectionContext::new(&domains);
        assert_eq!(10, InDomainMax.select_value(&context, x));
    }
}
