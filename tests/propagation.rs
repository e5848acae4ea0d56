//! Space-level propagation behaviour: fixpoints, failure, idempotence, cloning, and
//! subsumption.

use butternut_solver::branching::branchers::IntBrancher;
use butternut_solver::branching::value_selection::InDomainMin;
use butternut_solver::branching::variable_selection::InputOrder;
use butternut_solver::constraints;
use butternut_solver::search::Dfs;
use butternut_solver::search::SearchOptions;
use butternut_solver::variables::ConstantView;
use butternut_solver::variables::TransformableVariable;
use butternut_solver::ConstraintOperationError;
use butternut_solver::Space;
use butternut_solver::SpaceStatus;

#[test]
fn an_assignment_constraint_solves_without_branching() {
    let mut space = Space::new();
    let x = space.new_variable(0, 10);
    constraints::equals(&mut space, vec![x], 5).expect("feasible at the root");

    assert_eq!(SpaceStatus::Solved, space.status());
    assert_eq!(5, space.value(&x));
}

#[test]
fn linear_inequalities_prune_to_a_fixpoint() {
    let mut space = Space::new();
    let x = space.new_variable(0, 5);
    let y = space.new_variable(0, 5);
    constraints::less_than_or_equals(&mut space, vec![x, y], 3).expect("feasible at the root");

    assert_eq!(SpaceStatus::Solved, space.status());
    assert_eq!(3, space.upper_bound(&x));
    assert_eq!(3, space.upper_bound(&y));

    // Assigning x reawakens the inequality through its advised subscription.
    constraints::equals(&mut space, vec![x], 2).expect("feasible at the root");
    assert_eq!(SpaceStatus::Solved, space.status());
    assert_eq!(1, space.upper_bound(&y));
}

#[test]
fn infeasibility_at_the_root_is_a_posting_error() {
    let mut space = Space::new();
    let x = space.new_variable(2, 3);
    let y = space.new_variable(2, 3);

    let result = constraints::less_than_or_equals(&mut space, vec![x, y], 3);
    assert_eq!(Err(ConstraintOperationError::InfeasiblePropagator), result);
    assert!(space.is_failed());
    assert_eq!(SpaceStatus::Failed, space.status());
}

#[test]
fn posting_to_a_failed_space_is_rejected() {
    let mut space = Space::new();
    let x = space.new_variable(2, 3);
    let _ = constraints::less_than_or_equals(&mut space, vec![x], 1);
    assert!(space.is_failed());

    let result = constraints::equals(&mut space, vec![x], 2);
    assert_eq!(Err(ConstraintOperationError::InfeasibleState), result);
}

#[test]
fn status_is_idempotent() {
    let mut space = Space::new();
    let x = space.new_variable(0, 3);
    let y = space.new_variable(0, 3);
    constraints::equals(&mut space, vec![x, y], 4).expect("feasible at the root");

    let first = space.status();
    let propagations = space.propagation_count();

    // The second call reuses the cached status and runs no propagator.
    assert_eq!(first, space.status());
    assert_eq!(propagations, space.propagation_count());
}

#[test]
fn an_over_constrained_pair_has_no_solution() {
    let mut space = Space::new();
    let x = space.new_variable(0, 1);
    let y = space.new_variable(0, 1);
    constraints::not_equals(&mut space, x, y).expect("feasible at the root");
    constraints::equals(&mut space, vec![x.scaled(1), y.negated()], 0)
        .expect("feasible at the root");
    space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMin));

    // Bounds propagation alone cannot refute the conjunction; either branch on x fails the
    // space immediately through the advised disequality.
    let mut search = Dfs::new(space, SearchOptions::default());
    assert!(search.next().is_none());
    assert_eq!(0, search.statistics().solutions);
    assert!(search.statistics().failures > 0);
}

#[test]
fn a_clone_is_independent_of_the_original() {
    let mut space = Space::new();
    let x = space.new_variable(0, 3);
    let y = space.new_variable(0, 3);
    constraints::equals(&mut space, vec![x, y], 4).expect("feasible at the root");
    constraints::less_or_equal(&mut space, x, y).expect("feasible at the root");
    space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMin));

    assert_eq!(SpaceStatus::Branch, space.status());
    let lower_bounds = (space.lower_bound(&x), space.lower_bound(&y));
    let upper_bounds = (space.upper_bound(&x), space.upper_bound(&y));
    let propagators = space.num_propagators();

    let mut clone = space.clone_space(false);
    let choice = clone.choice();
    clone.commit(&choice, 0);
    let _ = clone.status();
    assert!(clone.is_assigned(&x));

    // The original is untouched by everything that happened to the clone.
    assert!(!space.is_failed());
    assert_eq!(lower_bounds, (space.lower_bound(&x), space.lower_bound(&y)));
    assert_eq!(upper_bounds, (space.upper_bound(&x), space.upper_bound(&y)));
    assert_eq!(propagators, space.num_propagators());
}

#[test]
fn two_clones_have_equal_observable_state() {
    let mut space = Space::new();
    let x = space.new_variable(0, 3);
    let y = space.new_variable(0, 3);
    constraints::equals(&mut space, vec![x, y], 4).expect("feasible at the root");

    let _ = space.status();
    let first = space.clone_space(true);
    let second = space.clone_space(false);

    assert_eq!(first.lower_bound(&x), second.lower_bound(&x));
    assert_eq!(first.upper_bound(&x), second.upper_bound(&x));
    assert_eq!(first.lower_bound(&y), second.lower_bound(&y));
    assert_eq!(first.upper_bound(&y), second.upper_bound(&y));
    assert_eq!(first.size(&x), second.size(&x));
    assert_eq!(first.num_propagators(), second.num_propagators());
    assert_eq!(first.is_failed(), second.is_failed());
}

#[test]
fn subsumed_propagators_stay_subsumed_in_clones() {
    let mut space = Space::new();
    let x = space.new_variable(0, 5);
    let y = space.new_variable(0, 5);
    constraints::not_equals(&mut space, x, y).expect("feasible at the root");
    constraints::equals(&mut space, vec![x], 2).expect("feasible at the root");

    assert_eq!(SpaceStatus::Solved, space.status());
    // The two halves of the equality are entailed and the disequality has done its pruning.
    assert_eq!(0, space.num_propagators());
    assert!(!space.contains(&y, 2));

    let clone = space.clone_space(true);
    assert_eq!(0, clone.num_propagators());
}

#[test]
fn strict_comparison_over_a_sparse_domain() {
    let mut space = Space::new();
    let x = space.new_sparse_variable(&[1, 4, 9]);
    let y = space.new_variable(0, 4);
    assert_eq!(3, space.size(&x));
    assert!(!space.contains(&x, 5));

    constraints::less(&mut space, x.scaled(1), y.scaled(1)).expect("feasible at the root");

    // x < y <= 4 leaves only the value 1 in the sparse domain.
    assert_eq!(SpaceStatus::Solved, space.status());
    assert_eq!(1, space.value(&x));
    assert_eq!(2, space.lower_bound(&y));
}

#[test]
fn a_settled_disequality_declines_further_scheduling() {
    let mut space = Space::new();
    let x = space.new_variable(0, 5);
    let y = space.new_variable(0, 5);
    constraints::not_equals(&mut space, x, y).expect("feasible at the root");
    constraints::equals(&mut space, vec![x], 1).expect("feasible at the root");
    constraints::equals(&mut space, vec![y], 2).expect("feasible at the root");

    assert_eq!(SpaceStatus::Solved, space.status());
    assert_eq!(2, space.num_variables());
    assert_eq!(0, space.num_propagators());
}

#[test]
fn a_disequality_with_a_constant_fails_when_the_value_is_forced() {
    let mut space = Space::new();
    let x = space.new_variable(0, 5);
    constraints::not_equals(&mut space, x, ConstantView::new(3)).expect("feasible at the root");
    constraints::equals(&mut space, vec![x], 3).expect("feasible at the root");

    assert_eq!(SpaceStatus::Failed, space.status());
}
