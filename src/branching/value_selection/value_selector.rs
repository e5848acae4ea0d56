use crate::branching::SelectionContext;

/// A strategy for picking the value to branch on for a selected variable.
pub trait ValueSelector<Var> {
    /// Returns the value the first alternative of the choice assigns to `decision_variable`;
    /// the second alternative removes it.
    fn select_value(&mut self, context: &SelectionContext<'_>, decision_variable: Var) -> i32;
}
