//! The propagator implementations shipped with the solver.
//!
//! The kernel is constraint-agnostic: anything implementing
//! [`Propagator`](crate::propagation::Propagator) can be posted to a
//! [`Space`](crate::Space). The implementations here cover the arithmetic and distinctness
//! constraints the posting helpers in [`constraints`](crate::constraints) build on.

mod all_different;
mod linear_less_or_equal;
mod not_equal;

pub use all_different::AllDifferentPropagator;
pub use linear_less_or_equal::LinearLessOrEqualPropagator;
pub use not_equal::NotEqualPropagator;
