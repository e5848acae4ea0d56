use crate::branching::SelectionContext;

/// A strategy for picking the next variable to branch on.
pub trait VariableSelector<Var> {
    /// Returns the variable to branch on next, or `None` if all variables under consideration
    /// are assigned.
    fn select_variable(&mut self, context: &SelectionContext<'_>) -> Option<Var>;
}
