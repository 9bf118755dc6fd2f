use std::collections::{HashMap, HashSet, VecDeque};

use super::frontier::PriorityFrontier;
use super::node::NodeArena;
use super::{successors, SearchResult, MAX_DEPTH_LIMIT};
use crate::error::Result;
use crate::problem::Problem;

/// Breadth-first search.
///
/// Children already explored or already waiting in the frontier are not
/// generated again. Optimal only when every step costs the same.
pub fn breadth_first<P: Problem>(problem: &P) -> Result<SearchResult<P::Action>> {
    let mut arena = NodeArena::new();
    let mut frontier = VecDeque::new();
    let mut in_frontier = HashSet::new();
    let mut explored = HashSet::new();
    let mut expanded = 0;

    let start = problem.initial_state();
    in_frontier.insert(start.clone());
    frontier.push_back(arena.root(start));

    while let Some(id) = frontier.pop_front() {
        let state = arena.get(id).state.clone();
        in_frontier.remove(&state);

        if problem.is_goal(&state) {
            return Ok(arena.solution(id, expanded));
        }
        if !explored.insert(state.clone()) {
            continue;
        }
        expanded += 1;

        for (action, next, cost) in successors(problem, &state)? {
            if explored.contains(&next) || in_frontier.contains(&next) {
                continue;
            }
            in_frontier.insert(next.clone());
            frontier.push_back(arena.child(id, next, action, cost));
        }
    }

    Ok(SearchResult::no_path(expanded))
}

/// Depth-first search with a closed set.
///
/// Children are pushed in reverse so they are explored in action order.
pub fn depth_first<P: Problem>(problem: &P) -> Result<SearchResult<P::Action>> {
    let mut arena = NodeArena::new();
    let mut explored = HashSet::new();
    let mut expanded = 0;
    let mut stack = vec![arena.root(problem.initial_state())];

    while let Some(id) = stack.pop() {
        let state = arena.get(id).state.clone();

        if problem.is_goal(&state) {
            return Ok(arena.solution(id, expanded));
        }
        if !explored.insert(state.clone()) {
            continue;
        }
        expanded += 1;

        for (action, next, cost) in successors(problem, &state)?.into_iter().rev() {
            if explored.contains(&next) {
                continue;
            }
            stack.push(arena.child(id, next, action, cost));
        }
    }

    Ok(SearchResult::no_path(expanded))
}

/// Iterative deepening bounded by [`MAX_DEPTH_LIMIT`].
pub fn iterative_deepening<P: Problem>(problem: &P) -> Result<SearchResult<P::Action>> {
    iterative_deepening_with_limit(problem, MAX_DEPTH_LIMIT)
}

/// Iterative deepening over bounds `0..=max_depth`.
///
/// The reported expansion count sums every bound that was tried. When a
/// bound finishes without cutting anything off, every deeper bound would
/// replay the same traversal, so those iterations are accounted for without
/// being run.
pub fn iterative_deepening_with_limit<P: Problem>(
    problem: &P,
    max_depth: usize,
) -> Result<SearchResult<P::Action>> {
    let mut total = 0;

    for limit in 0..=max_depth {
        match depth_limited(problem, limit)? {
            DepthLimited::Found(result) => {
                return Ok(SearchResult {
                    nodes_expanded: total + result.nodes_expanded,
                    ..result
                });
            }
            DepthLimited::Cutoff(expanded) => total += expanded,
            DepthLimited::Exhausted(expanded) => {
                let replays = max_depth - limit + 1;
                tracing::debug!(limit, replays, "reachable space exhausted below depth bound");
                return Ok(SearchResult::no_path(total + expanded * replays));
            }
        }
    }

    Ok(SearchResult::no_path(total))
}

enum DepthLimited<A> {
    Found(SearchResult<A>),
    /// At least one node sat on the bound; a deeper bound may succeed.
    Cutoff(usize),
    /// Nothing reached the bound; deeper bounds cannot change the outcome.
    Exhausted(usize),
}

/// One depth-limited pass. Nodes at `depth == limit` are goal-tested but not
/// expanded. Cycles are blocked by rejecting any child already on its own
/// root-to-node chain; the same state may still be reached along other
/// branches.
fn depth_limited<P: Problem>(problem: &P, limit: usize) -> Result<DepthLimited<P::Action>> {
    let mut arena = NodeArena::new();
    let mut expanded = 0;
    let mut cutoff = false;
    let mut stack = vec![arena.root(problem.initial_state())];

    while let Some(id) = stack.pop() {
        let node = arena.get(id);
        if problem.is_goal(&node.state) {
            return Ok(DepthLimited::Found(arena.solution(id, expanded)));
        }
        if node.depth >= limit {
            cutoff = true;
            continue;
        }
        let state = node.state.clone();
        expanded += 1;

        for (action, next, cost) in successors(problem, &state)?.into_iter().rev() {
            if arena.chain_contains(id, &next) {
                continue;
            }
            stack.push(arena.child(id, next, action, cost));
        }
    }

    Ok(if cutoff {
        DepthLimited::Cutoff(expanded)
    } else {
        DepthLimited::Exhausted(expanded)
    })
}

/// Uniform-cost search ordered by path cost `g`.
pub fn uniform_cost<P: Problem>(problem: &P) -> Result<SearchResult<P::Action>> {
    cheapest_first(problem, |_, path_cost| path_cost)
}

/// Best-first search that keeps the cheapest known cost per state and only
/// re-queues a state when its cost strictly improves. Shared by uniform-cost
/// and A*.
pub(super) fn cheapest_first<P, F>(problem: &P, priority: F) -> Result<SearchResult<P::Action>>
where
    P: Problem,
    F: Fn(&P::State, f64) -> f64,
{
    let mut arena = NodeArena::new();
    let mut frontier = PriorityFrontier::new();
    let mut best_cost: HashMap<P::State, f64> = HashMap::new();
    let mut expanded = 0;

    let start = problem.initial_state();
    best_cost.insert(start.clone(), 0.0);
    let root_priority = priority(&start, 0.0);
    frontier.push(arena.root(start), root_priority);

    while let Some(id) = frontier.pop() {
        let node = arena.get(id);
        if problem.is_goal(&node.state) {
            return Ok(arena.solution(id, expanded));
        }
        if best_cost
            .get(&node.state)
            .is_some_and(|best| node.path_cost > *best)
        {
            continue;
        }
        let (state, path_cost) = (node.state.clone(), node.path_cost);
        expanded += 1;

        for (action, next, step) in successors(problem, &state)? {
            let cost = path_cost + step;
            if best_cost.get(&next).is_some_and(|best| cost >= *best) {
                continue;
            }
            best_cost.insert(next.clone(), cost);
            let next_priority = priority(&next, cost);
            frontier.push(arena.child(id, next, action, step), next_priority);
        }
    }

    Ok(SearchResult::no_path(expanded))
}
