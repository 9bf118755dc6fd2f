//! parcelgrid library entry points.
//!
//! This crate models a delivery grid with directional traffic and tunnels,
//! runs eight uninformed and informed search strategies over it, and assigns
//! trucks to customers using memoised path queries. Higher-level consumers
//! (the CLI) should only depend on the items exported here instead of
//! reimplementing behavior.

pub mod delivery;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod output;
pub mod planner;
pub mod problem;
pub mod scenario;
pub mod search;
pub mod solve;

pub use delivery::DeliveryProblem;
pub use error::{Error, Result};
pub use grid::{Action, Coord, Grid, Tunnel, MAX_TRAFFIC_LEVEL};
pub use heuristic::{ManhattanHeuristic, TrafficAwareHeuristic, DEFAULT_MIN_TRAFFIC};
pub use output::{render_comparison, render_plan, PathSummary, RenderMode};
pub use planner::{Assignment, AssignmentPlanner, AssignmentPolicy, AssignmentStats};
pub use problem::{Heuristic, Problem, ZeroHeuristic};
pub use scenario::{Scenario, TrafficEdge};
pub use search::{search, SearchResult, Strategy, MAX_DEPTH_LIMIT};
pub use solve::{
    compare, path, solve, solve_on_grid, Delivery, DeliveryPlan, SolveOptions, StrategySummary,
};
