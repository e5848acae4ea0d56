use std::marker::PhantomData;

use crate::basic_types::Inconsistency;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::ChoiceData;
use crate::branching::SelectionContext;
use crate::butternut_assert_simple;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::variables::IntegerVariable;

/// The standard integer brancher: a [`VariableSelector`] picks the variable, a
/// [`ValueSelector`] picks a value `v`, and the resulting binary choice tries `x = v` first and
/// `x != v` second.
#[derive(Clone, Debug)]
pub struct IntBrancher<Var, VarSel, ValSel> {
    variable_selector: VarSel,
    value_selector: ValSel,
    variable: PhantomData<Var>,
}

impl<Var, VarSel, ValSel> IntBrancher<Var, VarSel, ValSel> {
    pub fn new(variable_selector: VarSel, value_selector: ValSel) -> Self {
        IntBrancher {
            variable_selector,
            value_selector,
            variable: PhantomData,
        }
    }
}

/// The payload of a choice produced by an [`IntBrancher`].
#[derive(Clone, Debug)]
pub struct IntChoice<Var> {
    variable: Var,
    value: i32,
}

impl<Var: IntegerVariable + std::fmt::Debug> ChoiceData for IntChoice<Var> {
    fn alternatives(&self) -> u32 {
        2
    }
}

impl<Var, VarSel, ValSel> Brancher for IntBrancher<Var, VarSel, ValSel>
where
    Var: IntegerVariable + std::fmt::Debug,
    VarSel: VariableSelector<Var> + Clone + 'static,
    ValSel: ValueSelector<Var> + Clone + 'static,
{
    fn status(&mut self, context: &SelectionContext<'_>) -> bool {
        self.variable_selector.select_variable(context).is_some()
    }

    fn choice(&mut self, context: &SelectionContext<'_>) -> Box<dyn ChoiceData> {
        let variable = self
            .variable_selector
            .select_variable(context)
            .expect("choice() is only called when status() reported remaining work");
        let value = self.value_selector.select_value(context, variable.clone());

        Box::new(IntChoice { variable, value })
    }

    fn commit(
        &self,
        mut context: PropagationContextMut<'_>,
        choice: &dyn ChoiceData,
        alternative: u32,
    ) -> Result<(), Inconsistency> {
        let choice = choice
            .downcast_ref::<IntChoice<Var>>()
            .expect("the committed choice was produced by this brancher");
        butternut_assert_simple!(alternative < 2);

        if alternative == 0 {
            let _ = context.assign(&choice.variable, choice.value)?;
        } else {
            let _ = context.remove(&choice.variable, choice.value)?;
        }
        Ok(())
    }

    fn clone_boxed(&self, _share: bool) -> Box<dyn Brancher> {
        Box::new(self.clone())
    }
}
