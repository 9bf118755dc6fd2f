mod common;

use parcelgrid_lib::{
    compare, solve, Assignment, AssignmentPlanner, AssignmentPolicy, Coord, Scenario,
    SolveOptions, Strategy,
};

const POLICIES: [AssignmentPolicy; 2] = [
    AssignmentPolicy::UniqueTruck,
    AssignmentPolicy::ReusableTruck,
];

/// Two stores in opposite corners, two customers, two tunnels.
fn two_tunnel_scenario() -> Scenario {
    common::uniform_scenario(5, 5, 2)
        .with_store(Coord::new(0, 0))
        .with_store(Coord::new(4, 4))
        .with_customer(Coord::new(1, 3))
        .with_customer(Coord::new(3, 1))
        .with_tunnel(Coord::new(0, 4), Coord::new(4, 0))
        .with_tunnel(Coord::new(1, 1), Coord::new(3, 3))
}

/// Both customers sit next to store 0; store 1 is far away.
fn crowded_scenario() -> Scenario {
    common::uniform_scenario(1, 6, 1)
        .with_store(Coord::new(0, 0))
        .with_store(Coord::new(0, 5))
        .with_customer(Coord::new(0, 1))
        .with_customer(Coord::new(0, 2))
}

#[test]
fn unreachable_customer_becomes_a_warning() {
    let scenario = common::uniform_scenario(3, 3, 1)
        .with_store(Coord::new(0, 0))
        .with_customer(Coord::new(2, 2))
        .with_customer(Coord::new(0, 2))
        .with_edge(Coord::new(1, 2), Coord::new(2, 2), 0)
        .with_edge(Coord::new(2, 1), Coord::new(2, 2), 0);

    for policy in POLICIES {
        let plan = solve(
            &scenario,
            &SolveOptions::default()
                .with_strategy(Strategy::UniformCost)
                .with_policy(policy),
        )
        .expect("scenario solves");

        assert_eq!(plan.warnings.len(), 1, "{policy}");
        assert!(plan.warnings[0].contains("Customer 0 at (2,2)"), "{policy}");
        assert!(plan.deliveries.iter().all(|d| d.customer != 0), "{policy}");
        assert_eq!(plan.deliveries.len(), 1, "{policy}");
        assert_eq!(plan.deliveries[0].customer, 1, "{policy}");
    }
}

#[test]
fn all_strategies_complete_and_optimal_ones_agree() {
    let summaries = compare(&two_tunnel_scenario(), &SolveOptions::default())
        .expect("comparison runs");
    assert_eq!(summaries.len(), Strategy::ALL.len());

    for summary in &summaries {
        assert_eq!(summary.deliveries, 2, "{}", summary.strategy);
    }

    let optimal: Vec<u64> = summaries
        .iter()
        .filter(|summary| summary.strategy.is_cost_optimal())
        .map(|summary| summary.total_cost)
        .collect();
    assert_eq!(optimal.len(), 3);
    assert!(optimal.windows(2).all(|pair| pair[0] == pair[1]));

    for summary in &summaries {
        assert!(summary.total_cost >= optimal[0], "{}", summary.strategy);
    }
}

#[test]
fn policies_differ_when_one_truck_is_closest_to_everyone() {
    let scenario = crowded_scenario();
    let grid = scenario.build_grid().expect("valid scenario");

    let mut assignments = Vec::new();
    for policy in POLICIES {
        let mut planner =
            AssignmentPlanner::new(&grid, scenario.truck_positions(), scenario.customers.clone())
                .with_strategy(Strategy::UniformCost)
                .with_policy(policy);
        let plan = planner.assign().expect("assignment runs");
        let stats = planner.stats(&plan).expect("stats computed");
        assert_eq!(stats.total_assignments, 2, "{policy}");
        assignments.push((plan, stats));
    }

    let (unique, unique_stats) = &assignments[0];
    assert_eq!(
        unique,
        &vec![
            Assignment {
                truck: 0,
                customer: 0
            },
            Assignment {
                truck: 1,
                customer: 1
            },
        ]
    );
    assert_eq!(unique_stats.total_cost, 1 + 3);
    assert_eq!(unique_stats.max_deliveries_per_truck, 1);

    let (reusable, reusable_stats) = &assignments[1];
    assert!(reusable.iter().all(|assignment| assignment.truck == 0));
    assert_eq!(reusable_stats.total_cost, 1 + 2);
    assert_eq!(reusable_stats.max_deliveries_per_truck, 2);
    assert_eq!(reusable_stats.min_deliveries_per_truck, 2);
}

#[test]
fn unique_policy_warns_when_trucks_run_out() {
    let scenario = common::uniform_scenario(2, 2, 1)
        .with_store(Coord::new(0, 0))
        .with_customer(Coord::new(0, 1))
        .with_customer(Coord::new(1, 1));
    let plan = solve(&scenario, &SolveOptions::default()).expect("scenario solves");
    assert_eq!(plan.deliveries.len(), 1);
    assert_eq!(plan.warnings.len(), 1);
    assert!(plan.warnings[0].contains("already assigned"));
}

#[test]
fn repeated_queries_hit_the_cache() {
    let scenario = two_tunnel_scenario();
    let grid = scenario.build_grid().expect("valid scenario");

    for parallel in [false, true] {
        let mut planner =
            AssignmentPlanner::new(&grid, scenario.truck_positions(), scenario.customers.clone())
                .with_strategy(Strategy::AStarManhattan)
                .with_parallel(parallel);

        let first = planner.assign().expect("assignment runs");
        assert_eq!(planner.searches_run(), 4);
        assert_eq!(planner.cache_len(), 4);

        let second = planner.assign().expect("assignment runs");
        planner.stats(&second).expect("stats computed");
        planner.route(0, 1).expect("route cached");
        assert_eq!(first, second);
        assert_eq!(planner.searches_run(), 4, "parallel = {parallel}");

        planner.set_strategy(Strategy::BreadthFirst);
        planner.assign().expect("assignment runs");
        assert_eq!(planner.searches_run(), 8);
        assert_eq!(planner.cache_len(), 8);

        planner.clear_cache();
        planner.assign().expect("assignment runs");
        assert_eq!(planner.searches_run(), 12);
    }
}

#[test]
fn duplicate_trucks_share_cache_entries() {
    let grid = parcelgrid_lib::Grid::uniform(3, 3, 1).expect("valid grid");
    let mut planner = AssignmentPlanner::new(
        &grid,
        vec![Coord::new(0, 0), Coord::new(0, 0)],
        vec![Coord::new(2, 2)],
    )
    .with_policy(AssignmentPolicy::ReusableTruck);
    let assignments = planner.assign().expect("assignment runs");
    assert_eq!(planner.searches_run(), 1);
    assert_eq!(assignments[0].truck, 0);
    assert_eq!(planner.cached_cost(1, 0), Some(4.0));
}

#[test]
fn parallel_and_serial_plans_match() {
    let scenario = two_tunnel_scenario();
    for strategy in Strategy::ALL {
        let serial = solve(
            &scenario,
            &SolveOptions {
                parallel: false,
                ..SolveOptions::default().with_strategy(strategy)
            },
        )
        .expect("scenario solves");
        let parallel = solve(&scenario, &SolveOptions::default().with_strategy(strategy))
            .expect("scenario solves");
        assert_eq!(serial.deliveries, parallel.deliveries, "{strategy}");
    }
}
