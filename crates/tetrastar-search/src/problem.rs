use std::hash::Hash;

/// A state-space search problem.
///
/// States are opaque to the search: it only clones them, compares them for
/// equality and hashes them to detect repeated states.
///
/// `start_state` and `successors` take `&mut self` so that problems can draw
/// from random sources while expanding.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;

    fn start_state(&mut self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Direct successors of `state`.
    ///
    /// An empty result marks `state` as terminal; it is not an error.
    fn successors(&mut self, state: &Self::State) -> Vec<Self::State>;

    /// Cost of the edge from `from` to `to`.
    ///
    /// Defaults to 0, leaving the ordering entirely to the heuristic.
    fn step_cost(&self, from: &Self::State, to: &Self::State) -> f32 {
        let _ = (from, to);
        0.0
    }
}
