//! The grid delivery problem: trucks moving over a [`Grid`] between a start
//! and a goal cell.

use crate::error::{Error, Result};
use crate::grid::{Action, Coord, Grid};
use crate::heuristic::{ManhattanHeuristic, TrafficAwareHeuristic};
use crate::problem::Problem;
use crate::search::{self, SearchResult, Strategy};

/// A point-to-point query over a borrowed grid.
///
/// The `(start, goal)` pair is mutable and re-set with [`retarget`], which
/// also re-points both heuristics. One instance serves one query at a time;
/// parallel callers build one instance per worker over the same grid.
///
/// [`retarget`]: DeliveryProblem::retarget
#[derive(Debug, Clone)]
pub struct DeliveryProblem<'g> {
    grid: &'g Grid,
    start: Coord,
    goal: Coord,
    manhattan: ManhattanHeuristic,
    traffic_aware: TrafficAwareHeuristic<'g>,
}

impl<'g> DeliveryProblem<'g> {
    pub fn new(grid: &'g Grid, start: Coord, goal: Coord) -> Self {
        Self {
            grid,
            start,
            goal,
            manhattan: ManhattanHeuristic::new(goal),
            traffic_aware: TrafficAwareHeuristic::new(goal, grid.tunnels()),
        }
    }

    /// Override the per-step lower bound used by the traffic-aware heuristic.
    pub fn with_min_traffic(mut self, min_traffic: u32) -> Self {
        self.traffic_aware = self.traffic_aware.with_min_traffic(min_traffic);
        self
    }

    /// Point the problem and both heuristics at a new query.
    pub fn retarget(&mut self, start: Coord, goal: Coord) {
        self.start = start;
        self.goal = goal;
        self.manhattan.retarget(goal);
        self.traffic_aware.retarget(goal);
    }

    /// Run `strategy` on the current query.
    pub fn search(&self, strategy: Strategy) -> Result<SearchResult<Action>> {
        tracing::debug!(
            strategy = %strategy,
            start = %self.start,
            goal = %self.goal,
            "running query"
        );
        search::search(self, strategy, &self.manhattan, &self.traffic_aware)
    }

    /// Cells visited when replaying `actions` from `start`, `start` included.
    ///
    /// Fails on any step that [`Problem::actions`] would not have offered.
    pub fn trace(&self, start: Coord, actions: &[Action]) -> Result<Vec<Coord>> {
        let mut cells = Vec::with_capacity(actions.len() + 1);
        let mut at = start;
        cells.push(at);
        for &action in actions {
            let next = self.result(&at, action)?;
            if !self.step_cost(&at, action, &next).is_finite() {
                return Err(Error::InvalidTransition { state: at, action });
            }
            cells.push(next);
            at = next;
        }
        Ok(cells)
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn manhattan(&self) -> &ManhattanHeuristic {
        &self.manhattan
    }

    pub fn traffic_aware(&self) -> &TrafficAwareHeuristic<'g> {
        &self.traffic_aware
    }
}

impl Problem for DeliveryProblem<'_> {
    type State = Coord;
    type Action = Action;

    fn initial_state(&self) -> Coord {
        self.start
    }

    fn is_goal(&self, state: &Coord) -> bool {
        *state == self.goal
    }

    fn actions(&self, state: &Coord) -> Vec<Action> {
        let mut actions: Vec<Action> = Action::MOVES
            .into_iter()
            .filter(|action| {
                state
                    .step(*action)
                    .is_some_and(|next| self.grid.is_passable(*state, next))
            })
            .collect();
        if self.grid.is_tunnel_entrance(*state) {
            actions.push(Action::Tunnel);
        }
        actions
    }

    fn result(&self, state: &Coord, action: Action) -> Result<Coord> {
        match state.step(action) {
            Some(next) => Ok(next),
            None => self
                .grid
                .tunnel_exit(*state)
                .ok_or(Error::InvalidTransition {
                    state: *state,
                    action,
                }),
        }
    }

    fn step_cost(&self, state: &Coord, action: Action, next: &Coord) -> f64 {
        match action {
            Action::Tunnel => f64::from(state.manhattan(*next)),
            _ => self
                .grid
                .traffic(*state, *next)
                .filter(|level| *level > 0)
                .map_or(f64::INFINITY, f64::from),
        }
    }
}
