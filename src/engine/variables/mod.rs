mod affine_view;
mod bool_view;
mod constant_view;
mod int_var_id;
mod integer_variable;

pub use affine_view::AffineView;
pub use bool_view::BoolView;
pub use constant_view::ConstantView;
pub use int_var_id::IntVarId;
pub use integer_variable::IntegerVariable;
pub use integer_variable::TransformableVariable;
