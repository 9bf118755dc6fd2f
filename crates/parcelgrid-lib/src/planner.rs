//! Greedy truck-to-customer assignment over memoised path queries.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::delivery::DeliveryProblem;
use crate::error::{Error, Result};
use crate::grid::{Action, Coord, Grid};
use crate::heuristic::DEFAULT_MIN_TRAFFIC;
use crate::search::{SearchResult, Strategy};

/// Whether a truck may serve more than one customer in a planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// Each truck is assigned at most once; later customers only see the
    /// trucks that are still free.
    #[default]
    #[serde(alias = "unique")]
    UniqueTruck,
    /// Every customer independently takes its cheapest truck.
    #[serde(alias = "reusable")]
    ReusableTruck,
}

impl AssignmentPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentPolicy::UniqueTruck => "unique",
            AssignmentPolicy::ReusableTruck => "reusable",
        }
    }
}

impl fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unique" | "unique_truck" => Ok(AssignmentPolicy::UniqueTruck),
            "reusable" | "reusable_truck" => Ok(AssignmentPolicy::ReusableTruck),
            _ => Err(Error::UnknownAssignmentPolicy {
                name: s.to_string(),
            }),
        }
    }
}

/// A `(truck, customer)` pairing by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub truck: usize,
    pub customer: usize,
}

/// Summary figures for an assignment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignmentStats {
    pub total_assignments: usize,
    pub total_cost: u64,
    pub max_deliveries_per_truck: usize,
    /// Smallest count among trucks that deliver at least once.
    pub min_deliveries_per_truck: usize,
}

impl fmt::Display for AssignmentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Assignments: {}, Total Cost: {}, Max per truck: {}, Min per truck: {}",
            self.total_assignments,
            self.total_cost,
            self.max_deliveries_per_truck,
            self.min_deliveries_per_truck
        )
    }
}

type RouteKey = (Coord, Coord, Strategy);

/// Placeholder query for freshly built problems; every use retargets first.
const ORIGIN: Coord = Coord::new(0, 0);

/// Assigns customers to trucks by repeated path queries.
///
/// Every `(truck, customer, strategy)` query is cached, so re-planning with
/// the same strategy, or asking for stats afterwards, does not search again.
#[derive(Debug)]
pub struct AssignmentPlanner<'g> {
    grid: &'g Grid,
    trucks: Vec<Coord>,
    customers: Vec<Coord>,
    strategy: Strategy,
    policy: AssignmentPolicy,
    min_traffic: u32,
    parallel: bool,
    cache: HashMap<RouteKey, SearchResult<Action>>,
    warnings: Vec<String>,
    searches_run: usize,
}

impl<'g> AssignmentPlanner<'g> {
    pub fn new(grid: &'g Grid, trucks: Vec<Coord>, customers: Vec<Coord>) -> Self {
        Self {
            grid,
            trucks,
            customers,
            strategy: Strategy::default(),
            policy: AssignmentPolicy::default(),
            min_traffic: DEFAULT_MIN_TRAFFIC,
            parallel: false,
            cache: HashMap::new(),
            warnings: Vec::new(),
            searches_run: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_min_traffic(mut self, min_traffic: u32) -> Self {
        self.min_traffic = min_traffic;
        self
    }

    /// Compute missing cost-matrix entries on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Switch strategy. Cached results for other strategies are kept.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    pub fn trucks(&self) -> &[Coord] {
        &self.trucks
    }

    pub fn customers(&self) -> &[Coord] {
        &self.customers
    }

    /// Route from truck `truck` to customer `customer` under the current
    /// strategy, served from the cache when possible.
    pub fn route(&mut self, truck: usize, customer: usize) -> Result<&SearchResult<Action>> {
        let key = self.key(truck, customer)?;
        if self.cache.contains_key(&key) {
            tracing::debug!(truck, customer, "route cache hit");
        } else {
            let mut problem = self.problem();
            let result = Self::run_query(&mut problem, key)?;
            self.searches_run += 1;
            self.cache.insert(key, result);
        }
        Ok(&self.cache[&key])
    }

    /// Dense `trucks x customers` matrix of path costs; `f64::INFINITY`
    /// marks an unreachable pair.
    pub fn cost_matrix(&mut self) -> Result<Vec<Vec<f64>>> {
        let strategy = self.strategy;
        let mut missing: Vec<RouteKey> = Vec::new();
        for &truck in &self.trucks {
            for &customer in &self.customers {
                let key = (truck, customer, strategy);
                if !self.cache.contains_key(&key) && !missing.contains(&key) {
                    missing.push(key);
                }
            }
        }

        tracing::debug!(
            missing = missing.len(),
            cached = self.cache.len(),
            parallel = self.parallel,
            "building cost matrix"
        );

        let computed: Vec<(RouteKey, SearchResult<Action>)> = if self.parallel {
            let grid = self.grid;
            let min_traffic = self.min_traffic;
            missing
                .par_iter()
                .map_init(
                    || DeliveryProblem::new(grid, ORIGIN, ORIGIN).with_min_traffic(min_traffic),
                    |problem, &key| Self::run_query(problem, key).map(|result| (key, result)),
                )
                .collect::<Result<_>>()?
        } else {
            let mut problem = self.problem();
            missing
                .iter()
                .map(|&key| Self::run_query(&mut problem, key).map(|result| (key, result)))
                .collect::<Result<_>>()?
        };

        self.searches_run += computed.len();
        self.cache.extend(computed);

        Ok(self
            .trucks
            .iter()
            .map(|&truck| {
                self.customers
                    .iter()
                    .map(|&customer| {
                        self.cache
                            .get(&(truck, customer, strategy))
                            .map_or(f64::INFINITY, |result| result.cost)
                    })
                    .collect()
            })
            .collect())
    }

    /// Assign customers, in index order, to their cheapest reachable truck.
    ///
    /// Customers nobody can serve are skipped and reported through
    /// [`warnings`](Self::warnings); they never fail the plan.
    pub fn assign(&mut self) -> Result<Vec<Assignment>> {
        self.warnings.clear();
        let matrix = self.cost_matrix()?;
        let mut used = vec![false; self.trucks.len()];
        let mut assignments = Vec::with_capacity(self.customers.len());

        for (customer, &at) in self.customers.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            let mut reachable = false;
            for (truck, row) in matrix.iter().enumerate() {
                let cost = row[customer];
                if !cost.is_finite() {
                    continue;
                }
                reachable = true;
                if self.policy == AssignmentPolicy::UniqueTruck && used[truck] {
                    continue;
                }
                if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                    best = Some((truck, cost));
                }
            }

            match best {
                Some((truck, cost)) => {
                    if self.policy == AssignmentPolicy::UniqueTruck {
                        used[truck] = true;
                    }
                    tracing::debug!(truck, customer, cost, "assigned");
                    assignments.push(Assignment { truck, customer });
                }
                None if reachable => {
                    tracing::warn!(customer, at = %at, "every truck that reaches customer is taken");
                    self.warnings.push(format!(
                        "Customer {customer} at {at} is reachable only by trucks that are already assigned"
                    ));
                }
                None => {
                    tracing::warn!(customer, at = %at, "customer unreachable");
                    self.warnings.push(format!(
                        "Customer {customer} at {at} is unreachable by all trucks"
                    ));
                }
            }
        }

        tracing::info!(
            strategy = %self.strategy,
            policy = %self.policy,
            assignments = assignments.len(),
            warnings = self.warnings.len(),
            "assignment complete"
        );
        Ok(assignments)
    }

    /// Warnings from the last [`assign`](Self::assign) call.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn stats(&mut self, assignments: &[Assignment]) -> Result<AssignmentStats> {
        if assignments.is_empty() {
            return Ok(AssignmentStats::default());
        }

        let mut per_truck = vec![0usize; self.trucks.len()];
        let mut total_cost = 0;
        for assignment in assignments {
            let result = self.route(assignment.truck, assignment.customer)?;
            total_cost += result.integer_cost().unwrap_or(0);
            per_truck[assignment.truck] += 1;
        }

        Ok(AssignmentStats {
            total_assignments: assignments.len(),
            total_cost,
            max_deliveries_per_truck: per_truck.iter().copied().max().unwrap_or(0),
            min_deliveries_per_truck: per_truck
                .iter()
                .copied()
                .filter(|count| *count > 0)
                .min()
                .unwrap_or(0),
        })
    }

    /// Cached cost for the pair under the current strategy, without
    /// searching. `Some(f64::INFINITY)` is a cached "no path".
    pub fn cached_cost(&self, truck: usize, customer: usize) -> Option<f64> {
        let key = self.key(truck, customer).ok()?;
        self.cache.get(&key).map(|result| result.cost)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of engine invocations so far; cache hits do not count.
    pub fn searches_run(&self) -> usize {
        self.searches_run
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn key(&self, truck: usize, customer: usize) -> Result<RouteKey> {
        let from = *self.trucks.get(truck).ok_or(Error::IndexOutOfRange {
            kind: "truck",
            index: truck,
            len: self.trucks.len(),
        })?;
        let to = *self
            .customers
            .get(customer)
            .ok_or(Error::IndexOutOfRange {
                kind: "customer",
                index: customer,
                len: self.customers.len(),
            })?;
        Ok((from, to, self.strategy))
    }

    fn problem(&self) -> DeliveryProblem<'g> {
        DeliveryProblem::new(self.grid, ORIGIN, ORIGIN).with_min_traffic(self.min_traffic)
    }

    fn run_query(
        problem: &mut DeliveryProblem<'_>,
        (truck, customer, strategy): RouteKey,
    ) -> Result<SearchResult<Action>> {
        problem.retarget(truck, customer);
        problem.search(strategy)
    }
}
