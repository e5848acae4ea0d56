//! # Butternut
//! Butternut is a finite-domain constraint programming kernel built around copy-based search:
//! a [`Space`] holds variables, propagators and branchers; [`Space::status`] drives the
//! propagators to a fixpoint; and the search engines explore alternatives by cloning spaces
//! and committing choices, rather than by undoing changes.
//!
//! The solver is written in pure Rust and follows Rust best practices: failure by
//! over-constraint is threaded through `Result` values, programmer errors panic with a typed
//! diagnostic, and views compose without runtime cost through generics.
//!
//! # Using Butternut
//! The first step to solving a problem is **creating a space and adding variables**:
//! ```rust
//! # use butternut_solver::Space;
//! // We create an empty space
//! let mut space = Space::new();
//!
//! // We create 2 variables
//! let x = space.new_variable(0, 3);
//! let y = space.new_variable(0, 3);
//! ```
//!
//! Then we can **post constraints** over the variables:
//! ```rust
//! # use butternut_solver::Space;
//! # use butternut_solver::constraints;
//! # let mut space = Space::new();
//! # let x = space.new_variable(0, 3);
//! # let y = space.new_variable(0, 3);
//! // We post the constraints:
//! // x + y = 4
//! // x <= y
//! constraints::equals(&mut space, vec![x, y], 4).expect("feasible at the root");
//! constraints::less_or_equal(&mut space, x, y).expect("feasible at the root");
//! ```
//!
//! For finding a solution, a [`branching::Brancher`] determines the shape of the search tree,
//! and a search engine explores it:
//! ```rust
//! # use butternut_solver::Space;
//! # use butternut_solver::constraints;
//! # use butternut_solver::branching::branchers::IntBrancher;
//! # use butternut_solver::branching::value_selection::InDomainMin;
//! # use butternut_solver::branching::variable_selection::InputOrder;
//! # use butternut_solver::search::Dfs;
//! # use butternut_solver::search::SearchOptions;
//! # let mut space = Space::new();
//! # let x = space.new_variable(0, 3);
//! # let y = space.new_variable(0, 3);
//! # constraints::equals(&mut space, vec![x, y], 4).expect("feasible at the root");
//! # constraints::less_or_equal(&mut space, x, y).expect("feasible at the root");
//! // Branch over x and y in order, trying the smallest value first
//! space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMin));
//!
//! // Then we enumerate solutions with depth-first search
//! let mut search = Dfs::new(space, SearchOptions::default());
//!
//! let solution = search.next().expect("this problem has a solution");
//! assert_eq!(1, solution.value(&x));
//! assert_eq!(3, solution.value(&y));
//! ```
//!
//! **Optimising an objective** uses the [`search::Restart`] engine, which re-posts a
//! tightening constraint between restarts through a [`search::Objective`]:
//! ```rust
//! # use butternut_solver::Space;
//! # use butternut_solver::constraints;
//! # use butternut_solver::branching::branchers::IntBrancher;
//! # use butternut_solver::branching::value_selection::InDomainMax;
//! # use butternut_solver::branching::variable_selection::InputOrder;
//! # use butternut_solver::search::Minimise;
//! # use butternut_solver::search::Restart;
//! # use butternut_solver::search::SearchOptions;
//! # use butternut_solver::variables::TransformableVariable;
//! # let mut space = Space::new();
//! # let x = space.new_variable(0, 5);
//! # let y = space.new_variable(0, 5);
//! # let z = space.new_variable(0, 10);
//! # constraints::equals(&mut space, vec![x.scaled(1), y.scaled(1), z.negated()], 0)
//! #     .expect("feasible at the root");
//! # space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMax));
//! let mut search = Restart::new(space, SearchOptions::default(), Minimise::new(z));
//!
//! let mut best = None;
//! while let Some(solution) = search.next() {
//!     best = Some(solution.value(&z));
//! }
//! assert_eq!(Some(0), best);
//! ```

pub(crate) mod basic_types;
pub mod branching;
pub(crate) mod butternut_asserts;
pub mod constraints;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub mod propagators;
pub mod search;

pub use basic_types::ConstraintOperationError;
pub use basic_types::EmptyDomain;
pub use basic_types::ExecStatus;
pub use basic_types::Inconsistency;
pub use basic_types::ModEvent;
pub use basic_types::ModEventDelta;
pub use basic_types::PropagationStatus;
pub use basic_types::SpaceStatus;
pub use engine::Choice;
pub use engine::Space;

/// The view types through which propagators and branchers observe variables.
pub mod variables {
    pub use crate::engine::domains::DomainStore;
    pub use crate::engine::variables::AffineView;
    pub use crate::engine::variables::BoolView;
    pub use crate::engine::variables::ConstantView;
    pub use crate::engine::variables::IntVarId;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::TransformableVariable;
}

/// The interface for implementing propagators.
pub mod propagation {
    pub use crate::engine::propagation::EnqueueDecision;
    pub use crate::engine::propagation::HasDomains;
    pub use crate::engine::propagation::LocalId;
    pub use crate::engine::propagation::PropagationContext;
    pub use crate::engine::propagation::PropagationContextMut;
    pub use crate::engine::propagation::PropagationCost;
    pub use crate::engine::propagation::Propagator;
    pub use crate::engine::propagation::PropagatorId;
    pub use crate::engine::propagation::PropagatorInitialisationContext;
    pub use crate::engine::propagation::ReadDomains;
}

/// The event vocabulary raised by domain mutations and consumed by subscriptions.
pub mod notifications {
    pub use crate::engine::notifications::DomainDelta;
    pub use crate::engine::notifications::DomainEvent;
    pub use crate::engine::notifications::DomainEvents;
    pub use crate::engine::notifications::Watchers;
}
