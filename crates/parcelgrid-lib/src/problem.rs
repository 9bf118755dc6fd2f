//! Capability traits that decouple the search engine from any domain.
//!
//! The engine in [`crate::search`] only ever talks to these two traits.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;

/// A state-space search problem with a fixed start and goal test.
pub trait Problem {
    /// Search state. De-duplication in the engine keys on state equality.
    type State: Clone + Eq + Hash + Debug;
    /// Label attached to each transition.
    type Action: Copy + Debug;

    /// Start of the currently configured query.
    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Legal actions from `state`, in a stable order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Deterministic successor. Errors signal a contract violation (an action
    /// that `actions` would never offer) and abort the search.
    fn result(&self, state: &Self::State, action: Self::Action) -> Result<Self::State>;

    /// Non-negative transition cost. `f64::INFINITY` marks a transition the
    /// engine must not take.
    fn step_cost(&self, state: &Self::State, action: Self::Action, next: &Self::State) -> f64;
}

/// Cost-to-go estimate for informed strategies.
///
/// Implementations must return a non-negative value; A* optimality further
/// requires the estimate never exceed the true remaining cost.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> f64;
}

impl<S, H: Heuristic<S> + ?Sized> Heuristic<S> for &H {
    fn estimate(&self, state: &S) -> f64 {
        (**self).estimate(state)
    }
}

/// Heuristic that always returns zero, turning A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn estimate(&self, _state: &S) -> f64 {
        0.0
    }
}
