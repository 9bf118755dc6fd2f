//! Generic state-space search over any [`Problem`].
//!
//! This module provides:
//! - [`Strategy`] - the eight strategy codes (BF, DF, ID, UC, GR1, GR2, AS1, AS2)
//! - [`SearchResult`] - action sequence, path cost and expansion count
//! - [`search`] - dispatcher selecting a strategy and heuristic
//!
//! # Expansion counting
//!
//! A node counts as expanded when it is popped, fails the goal test and its
//! successors are generated. Goal nodes and nodes skipped by de-duplication
//! are not counted. Every strategy follows this rule.
//!
//! # Tie-breaking
//!
//! Priority frontiers pop equal keys in insertion order, so results are
//! reproducible for a fixed problem.

mod frontier;
mod informed;
mod node;
mod uninformed;

pub use informed::{a_star, greedy_best_first};
pub use uninformed::{
    breadth_first, depth_first, iterative_deepening, iterative_deepening_with_limit,
    uniform_cost,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::problem::{Heuristic, Problem};

/// Deepest bound iterative deepening will try before reporting no path.
/// Bounds run from 0 through this value inclusive.
pub const MAX_DEPTH_LIMIT: usize = 1001;

/// Supported search strategies.
///
/// Serialized as the upper-case code; deserialized through [`FromStr`], so
/// any casing of a code is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum Strategy {
    /// Breadth-first search (FIFO frontier).
    #[serde(rename = "BF")]
    BreadthFirst,
    /// Depth-first search (LIFO frontier).
    #[serde(rename = "DF")]
    DepthFirst,
    /// Iterative deepening depth-first search.
    #[serde(rename = "ID")]
    IterativeDeepening,
    /// Uniform-cost search ordered by path cost.
    #[serde(rename = "UC")]
    UniformCost,
    /// Greedy best-first with the Manhattan heuristic.
    #[serde(rename = "GR1")]
    GreedyManhattan,
    /// Greedy best-first with the traffic-aware heuristic.
    #[serde(rename = "GR2")]
    GreedyTrafficAware,
    /// A* with the Manhattan heuristic.
    #[serde(rename = "AS1")]
    AStarManhattan,
    /// A* with the traffic-aware heuristic.
    #[default]
    #[serde(rename = "AS2")]
    AStarTrafficAware,
}

impl Strategy {
    pub const ALL: [Strategy; 8] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::IterativeDeepening,
        Strategy::UniformCost,
        Strategy::GreedyManhattan,
        Strategy::GreedyTrafficAware,
        Strategy::AStarManhattan,
        Strategy::AStarTrafficAware,
    ];

    /// Short code used on every external surface.
    pub fn code(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "BF",
            Strategy::DepthFirst => "DF",
            Strategy::IterativeDeepening => "ID",
            Strategy::UniformCost => "UC",
            Strategy::GreedyManhattan => "GR1",
            Strategy::GreedyTrafficAware => "GR2",
            Strategy::AStarManhattan => "AS1",
            Strategy::AStarTrafficAware => "AS2",
        }
    }

    /// Human-readable label shown in textual renderings.
    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "Breadth-First",
            Strategy::DepthFirst => "Depth-First",
            Strategy::IterativeDeepening => "Iterative Deepening",
            Strategy::UniformCost => "Uniform Cost",
            Strategy::GreedyManhattan => "Greedy (Manhattan)",
            Strategy::GreedyTrafficAware => "Greedy (traffic-aware)",
            Strategy::AStarManhattan => "A* (Manhattan)",
            Strategy::AStarTrafficAware => "A* (traffic-aware)",
        }
    }

    /// Whether the strategy consults a heuristic.
    pub fn is_informed(self) -> bool {
        matches!(
            self,
            Strategy::GreedyManhattan
                | Strategy::GreedyTrafficAware
                | Strategy::AStarManhattan
                | Strategy::AStarTrafficAware
        )
    }

    /// Whether the strategy returns minimum-cost paths for non-negative
    /// costs (given an admissible heuristic for A*).
    pub fn is_cost_optimal(self) -> bool {
        matches!(
            self,
            Strategy::UniformCost | Strategy::AStarManhattan | Strategy::AStarTrafficAware
        )
    }

    fn suggestions_for(name: &str) -> Vec<String> {
        let upper = name.trim().to_ascii_uppercase();
        Strategy::ALL
            .iter()
            .map(|strategy| strategy.code())
            .filter(|code| strsim::levenshtein(&upper, code) <= 1)
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for Strategy {
    type Error = Error;

    fn try_from(code: String) -> Result<Self> {
        code.parse()
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStrategy {
                name: s.to_string(),
                suggestions: Strategy::suggestions_for(s),
            })
    }
}

/// Outcome of a single search.
///
/// "No path" is a value, not an error: `cost` is `f64::INFINITY` and
/// `actions` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<A> {
    pub actions: Vec<A>,
    pub cost: f64,
    pub nodes_expanded: usize,
}

impl<A> SearchResult<A> {
    pub fn no_path(nodes_expanded: usize) -> Self {
        Self {
            actions: Vec::new(),
            cost: f64::INFINITY,
            nodes_expanded,
        }
    }

    pub fn is_found(&self) -> bool {
        self.cost.is_finite()
    }

    /// Path cost as an integer, or `None` when no path was found.
    pub fn integer_cost(&self) -> Option<u64> {
        self.is_found().then(|| self.cost.round() as u64)
    }
}

/// Run `strategy` on `problem`.
///
/// `GR1`/`AS1` consult `h1` and `GR2`/`AS2` consult `h2`; uninformed
/// strategies ignore both.
pub fn search<P, H1, H2>(
    problem: &P,
    strategy: Strategy,
    h1: &H1,
    h2: &H2,
) -> Result<SearchResult<P::Action>>
where
    P: Problem,
    H1: Heuristic<P::State> + ?Sized,
    H2: Heuristic<P::State> + ?Sized,
{
    let result = match strategy {
        Strategy::BreadthFirst => breadth_first(problem),
        Strategy::DepthFirst => depth_first(problem),
        Strategy::IterativeDeepening => iterative_deepening(problem),
        Strategy::UniformCost => uniform_cost(problem),
        Strategy::GreedyManhattan => greedy_best_first(problem, h1),
        Strategy::GreedyTrafficAware => greedy_best_first(problem, h2),
        Strategy::AStarManhattan => a_star(problem, h1),
        Strategy::AStarTrafficAware => a_star(problem, h2),
    }?;

    tracing::debug!(
        strategy = %strategy,
        cost = result.cost,
        nodes_expanded = result.nodes_expanded,
        found = result.is_found(),
        "search finished"
    );

    Ok(result)
}

/// Legal successors of `state` as `(action, next, step_cost)`, in action
/// order. Transitions with a non-finite cost are dropped.
pub(crate) fn successors<P: Problem>(
    problem: &P,
    state: &P::State,
) -> Result<Vec<(P::Action, P::State, f64)>> {
    let actions = problem.actions(state);
    let mut out = Vec::with_capacity(actions.len());
    for action in actions {
        let next = problem.result(state, action)?;
        let cost = problem.step_cost(state, action, &next);
        if !cost.is_finite() {
            tracing::trace!(?state, ?action, "skipping impassable transition");
            continue;
        }
        debug_assert!(cost >= 0.0, "negative step cost {cost}");
        out.push((action, next, cost));
    }
    Ok(out)
}
