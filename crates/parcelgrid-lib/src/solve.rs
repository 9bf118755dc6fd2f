//! Query surface: whole-scenario planning, single path queries and the
//! all-strategy comparison.

use serde::{Deserialize, Serialize};

use crate::delivery::DeliveryProblem;
use crate::error::Result;
use crate::grid::{Action, Coord, Grid};
use crate::heuristic::DEFAULT_MIN_TRAFFIC;
use crate::planner::{AssignmentPlanner, AssignmentPolicy, AssignmentStats};
use crate::scenario::Scenario;
use crate::search::{SearchResult, Strategy};

/// Knobs for a planning run. Every field has a default, so a scenario's
/// `options` block may set any subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    pub strategy: Strategy,
    pub policy: AssignmentPolicy,
    /// Per-step lower bound used by the traffic-aware heuristic.
    pub min_traffic: u32,
    /// Build the cost matrix with one problem instance per rayon worker.
    pub parallel: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            policy: AssignmentPolicy::default(),
            min_traffic: DEFAULT_MIN_TRAFFIC,
            parallel: true,
        }
    }
}

impl SolveOptions {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// One completed delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub truck: usize,
    pub customer: usize,
    pub actions: Vec<Action>,
    pub cost: u64,
    pub nodes_expanded: usize,
}

/// Result of planning a whole scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryPlan {
    pub strategy: Strategy,
    pub policy: AssignmentPolicy,
    /// In the order customers were processed.
    pub deliveries: Vec<Delivery>,
    pub warnings: Vec<String>,
    pub stats: AssignmentStats,
}

impl DeliveryPlan {
    pub fn total_cost(&self) -> u64 {
        self.deliveries.iter().map(|delivery| delivery.cost).sum()
    }

    pub fn total_nodes_expanded(&self) -> usize {
        self.deliveries
            .iter()
            .map(|delivery| delivery.nodes_expanded)
            .sum()
    }
}

/// Per-strategy totals from [`compare`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub deliveries: usize,
    pub total_cost: u64,
    pub nodes_expanded: usize,
    pub warnings: usize,
}

impl From<&DeliveryPlan> for StrategySummary {
    fn from(plan: &DeliveryPlan) -> Self {
        Self {
            strategy: plan.strategy,
            deliveries: plan.deliveries.len(),
            total_cost: plan.total_cost(),
            nodes_expanded: plan.total_nodes_expanded(),
            warnings: plan.warnings.len(),
        }
    }
}

/// Validate `scenario` and plan every customer with `options`.
pub fn solve(scenario: &Scenario, options: &SolveOptions) -> Result<DeliveryPlan> {
    let grid = scenario.build_grid()?;
    solve_on_grid(
        &grid,
        scenario.truck_positions(),
        scenario.customers.clone(),
        options,
    )
}

/// Plan deliveries on an already-built grid.
pub fn solve_on_grid(
    grid: &Grid,
    trucks: Vec<Coord>,
    customers: Vec<Coord>,
    options: &SolveOptions,
) -> Result<DeliveryPlan> {
    let mut planner = planner_for(grid, trucks, customers, options);
    build_plan(&mut planner)
}

/// Run all eight strategies over the same scenario. Routes are cached per
/// strategy, so no query is repeated within a strategy.
pub fn compare(scenario: &Scenario, options: &SolveOptions) -> Result<Vec<StrategySummary>> {
    let grid = scenario.build_grid()?;
    let mut planner = planner_for(
        &grid,
        scenario.truck_positions(),
        scenario.customers.clone(),
        options,
    );

    let mut summaries = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        planner.set_strategy(strategy);
        let plan = build_plan(&mut planner)?;
        summaries.push(StrategySummary::from(&plan));
    }
    Ok(summaries)
}

/// Retarget `problem` to `start -> goal` and search it with `strategy`.
pub fn path(
    problem: &mut DeliveryProblem<'_>,
    start: Coord,
    goal: Coord,
    strategy: Strategy,
) -> Result<SearchResult<Action>> {
    problem.grid().check_bounds(start, "start")?;
    problem.grid().check_bounds(goal, "goal")?;
    problem.retarget(start, goal);
    problem.search(strategy)
}

fn planner_for<'g>(
    grid: &'g Grid,
    trucks: Vec<Coord>,
    customers: Vec<Coord>,
    options: &SolveOptions,
) -> AssignmentPlanner<'g> {
    AssignmentPlanner::new(grid, trucks, customers)
        .with_strategy(options.strategy)
        .with_policy(options.policy)
        .with_min_traffic(options.min_traffic)
        .with_parallel(options.parallel)
}

fn build_plan(planner: &mut AssignmentPlanner<'_>) -> Result<DeliveryPlan> {
    let assignments = planner.assign()?;

    let mut deliveries = Vec::with_capacity(assignments.len());
    for assignment in &assignments {
        let route = planner.route(assignment.truck, assignment.customer)?;
        let Some(cost) = route.integer_cost() else {
            continue;
        };
        deliveries.push(Delivery {
            truck: assignment.truck,
            customer: assignment.customer,
            actions: route.actions.clone(),
            cost,
            nodes_expanded: route.nodes_expanded,
        });
    }

    let stats = planner.stats(&assignments)?;
    Ok(DeliveryPlan {
        strategy: planner.strategy(),
        policy: planner.policy(),
        deliveries,
        warnings: planner.warnings().to_vec(),
        stats,
    })
}
