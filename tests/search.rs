//! End-to-end search scenarios: depth-first enumeration, recomputation, limits, and restart
//! optimisation.

use butternut_solver::branching::branchers::IntBrancher;
use butternut_solver::branching::value_selection::InDomainMax;
use butternut_solver::branching::value_selection::InDomainMin;
use butternut_solver::branching::variable_selection::InputOrder;
use butternut_solver::branching::variable_selection::SmallestDomain;
use butternut_solver::constraints;
use butternut_solver::search::Dfs;
use butternut_solver::search::Maximise;
use butternut_solver::search::Minimise;
use butternut_solver::search::Restart;
use butternut_solver::search::SearchOptions;
use butternut_solver::search::SearchStatistics;
use butternut_solver::search::Stop;
use butternut_solver::search::StopReason;
use butternut_solver::variables::IntVarId;
use butternut_solver::variables::TransformableVariable;
use butternut_solver::Space;

/// The space of `x + y = 4`, `x <= y` over `x, y in [0, 3]`.
fn sum_and_order() -> (Space, IntVarId, IntVarId) {
    let mut space = Space::new();
    let x = space.new_variable(0, 3);
    let y = space.new_variable(0, 3);
    constraints::equals(&mut space, vec![x, y], 4).expect("feasible at the root");
    constraints::less_or_equal(&mut space, x, y).expect("feasible at the root");
    space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMin));
    (space, x, y)
}

#[test]
fn dfs_enumerates_the_sum_and_order_solutions_in_order() {
    let (space, x, y) = sum_and_order();
    let mut search = Dfs::new(space, SearchOptions::default());

    let mut solutions = Vec::new();
    while let Some(solution) = search.next() {
        solutions.push((solution.value(&x), solution.value(&y)));
    }

    assert_eq!(vec![(1, 3), (2, 2)], solutions);
    assert_eq!(2, search.statistics().solutions);
}

#[test]
fn dfs_enumerates_every_permutation_exactly_once() {
    let mut space = Space::new();
    let x = space.new_variable(0, 2);
    let y = space.new_variable(0, 2);
    let z = space.new_variable(0, 2);
    constraints::all_different(&mut space, vec![x, y, z]).expect("feasible at the root");
    space.branch(IntBrancher::new(InputOrder::new(&[x, y, z]), InDomainMin));

    let mut search = Dfs::new(space, SearchOptions::default());
    let mut solutions = Vec::new();
    while let Some(solution) = search.next() {
        solutions.push((solution.value(&x), solution.value(&y), solution.value(&z)));
    }

    let expected = vec![
        (0, 1, 2),
        (0, 2, 1),
        (1, 0, 2),
        (1, 2, 0),
        (2, 0, 1),
        (2, 1, 0),
    ];
    assert_eq!(expected, solutions);

    // Exhaustion is stable: the engine keeps reporting that there is nothing left.
    assert!(search.next().is_none());
}

#[test]
fn recomputation_visits_the_same_solutions_as_cloning_every_node() {
    let solve = |clone_rate: usize| {
        let mut space = Space::new();
        let variables: Vec<IntVarId> = (0..4).map(|_| space.new_variable(0, 3)).collect();
        constraints::all_different(&mut space, variables.clone()).expect("feasible at the root");
        space.branch(IntBrancher::new(
            SmallestDomain::new(&variables),
            InDomainMin,
        ));

        let mut search = Dfs::new(
            space,
            SearchOptions {
                clone_rate,
                ..SearchOptions::default()
            },
        );
        let mut solutions = Vec::new();
        while let Some(solution) = search.next() {
            solutions.push(
                variables
                    .iter()
                    .map(|variable| solution.value(variable))
                    .collect::<Vec<i32>>(),
            );
        }
        solutions
    };

    let reference = solve(1);
    assert_eq!(24, reference.len());
    assert_eq!(reference, solve(3));
    assert_eq!(reference, solve(8));
}

#[test]
fn the_node_limit_stops_the_search() {
    let (space, _, _) = sum_and_order();
    let mut search = Dfs::new(
        space,
        SearchOptions {
            node_limit: Some(1),
            ..SearchOptions::default()
        },
    );

    while search.next().is_some() {}
    assert_eq!(Some(StopReason::NodeLimit), search.statistics().stop_reason);
}

#[test]
fn the_fail_limit_stops_the_search() {
    let mut space = Space::new();
    let x = space.new_variable(0, 5);
    let y = space.new_variable(0, 5);
    constraints::not_equals(&mut space, x, y).expect("feasible at the root");
    constraints::equals(&mut space, vec![x.scaled(1), y.negated()], 0)
        .expect("feasible at the root");
    space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMin));

    let mut search = Dfs::new(
        space,
        SearchOptions {
            fail_limit: Some(2),
            ..SearchOptions::default()
        },
    );

    assert!(search.next().is_none());
    assert_eq!(Some(StopReason::FailLimit), search.statistics().stop_reason);
}

#[test]
fn a_custom_stop_condition_is_polled() {
    struct AfterNodes(u64);

    impl Stop for AfterNodes {
        fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
            statistics.nodes >= self.0
        }
    }

    let (space, _, _) = sum_and_order();
    let mut search = Dfs::new(
        space,
        SearchOptions {
            stop: Some(Box::new(AfterNodes(1))),
            ..SearchOptions::default()
        },
    );

    while search.next().is_some() {}
    assert_eq!(Some(StopReason::Condition), search.statistics().stop_reason);
}

#[test]
fn restart_minimisation_improves_strictly_until_the_optimum() {
    let mut space = Space::new();
    let x = space.new_variable(0, 5);
    let y = space.new_variable(0, 5);
    let z = space.new_variable(0, 10);
    // z = x + y, x + y >= 3
    constraints::equals(&mut space, vec![x.scaled(1), y.scaled(1), z.negated()], 0)
        .expect("feasible at the root");
    constraints::less_than_or_equals(&mut space, vec![x.negated(), y.negated()], -3)
        .expect("feasible at the root");
    space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMax));

    let mut search = Restart::new(space, SearchOptions::default(), Minimise::new(z));
    let mut objective_values = Vec::new();
    while let Some(solution) = search.next() {
        assert_eq!(
            solution.value(&z),
            solution.value(&x) + solution.value(&y)
        );
        objective_values.push(solution.value(&z));
    }

    // Every restart is strictly better, ending at the optimum of 3.
    assert!(objective_values.windows(2).all(|pair| pair[1] < pair[0]));
    assert_eq!(Some(&10), objective_values.first());
    assert_eq!(Some(&3), objective_values.last());

    // The engine keeps reporting optimality once the bound cannot be improved.
    assert!(search.next().is_none());
}

#[test]
fn restart_maximisation_improves_strictly_upward() {
    let mut space = Space::new();
    let x = space.new_variable(0, 5);
    let y = space.new_variable(0, 5);
    constraints::less_or_equal(&mut space, x, y).expect("feasible at the root");
    space.branch(IntBrancher::new(InputOrder::new(&[x, y]), InDomainMin));

    let mut search = Restart::new(space, SearchOptions::default(), Maximise::new(x));
    let mut objective_values = Vec::new();
    while let Some(solution) = search.next() {
        objective_values.push(solution.value(&x));
    }

    assert_eq!(vec![0, 1, 2, 3, 4, 5], objective_values);
}

#[test]
fn restart_on_an_infeasible_space_finds_nothing() {
    let mut space = Space::new();
    let x = space.new_variable(0, 1);
    let _ = constraints::less_than_or_equals(&mut space, vec![x], -1);
    space.branch(IntBrancher::new(InputOrder::new(&[x]), InDomainMin));

    let mut search = Restart::new(space, SearchOptions::default(), Minimise::new(x));
    assert!(search.next().is_none());
}

#[test]
fn booleans_participate_in_linear_constraints() {
    let mut space = Space::new();
    let first = space.new_boolean_variable();
    let second = space.new_boolean_variable();
    // first + second <= 1, first >= 1 (so first is true and second must be false).
    constraints::less_than_or_equals(&mut space, vec![first.scaled(1), second.scaled(1)], 1)
        .expect("feasible at the root");
    constraints::less_than_or_equals(&mut space, vec![first.scaled(-1)], -1)
        .expect("feasible at the root");

    assert_eq!(butternut_solver::SpaceStatus::Solved, space.status());
    assert_eq!(1, space.value(&first));
    assert_eq!(0, space.value(&second));
}
