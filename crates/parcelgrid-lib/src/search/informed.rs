use std::collections::HashSet;

use super::frontier::PriorityFrontier;
use super::node::NodeArena;
use super::uninformed::cheapest_first;
use super::{successors, SearchResult};
use crate::error::Result;
use crate::problem::{Heuristic, Problem};

/// Greedy best-first search ordered by `h` alone.
///
/// A state is expanded at most once. Not optimal.
pub fn greedy_best_first<P, H>(problem: &P, heuristic: &H) -> Result<SearchResult<P::Action>>
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
    let mut arena = NodeArena::new();
    let mut frontier = PriorityFrontier::new();
    let mut closed = HashSet::new();
    let mut expanded = 0;

    let start = problem.initial_state();
    let h = heuristic.estimate(&start);
    frontier.push(arena.root(start), h);

    while let Some(id) = frontier.pop() {
        let state = arena.get(id).state.clone();
        if problem.is_goal(&state) {
            return Ok(arena.solution(id, expanded));
        }
        if !closed.insert(state.clone()) {
            continue;
        }
        expanded += 1;

        for (action, next, cost) in successors(problem, &state)? {
            if closed.contains(&next) {
                continue;
            }
            let h = heuristic.estimate(&next);
            frontier.push(arena.child(id, next, action, cost), h);
        }
    }

    Ok(SearchResult::no_path(expanded))
}

/// A* search ordered by `g + h`.
///
/// Optimal when `heuristic` never overestimates the remaining cost.
pub fn a_star<P, H>(problem: &P, heuristic: &H) -> Result<SearchResult<P::Action>>
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
    cheapest_first(problem, |state, path_cost| {
        path_cost + heuristic.estimate(state)
    })
}
