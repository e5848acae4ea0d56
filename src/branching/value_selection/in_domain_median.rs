use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::propagation::HasDomains;
use crate::engine::variables::IntegerVariable;

/// [`ValueSelector`] which chooses the median of the domain of the provided variable.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMedian;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMedian {
    fn select_value(&mut self, context: &SelectionContext<'_>, decision_variable: Var) -> i32 {
        decision_variable.median(context.domains())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::DomainStore;

    #[test]
    fn the_median_is_selected() {
        let mut domains = DomainStore::default();
        let x = domains.grow(0, 10);
        let _ = domains.remove_value(x, 4).expect("non-empty");

        let context = SelectionContext::new(&domains);
        assert_eq!(5, InDomainMedian.select_value(&context, x));
    }
}
