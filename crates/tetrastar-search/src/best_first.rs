use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
    sync::atomic::{AtomicBool, Ordering as AtomicOrdering},
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::SearchProblem;

/// Bounds on a single search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Maximum number of nodes taken from the frontier and expanded.
    pub max_expansions: usize,
    /// Wall-clock budget in milliseconds; unlimited when absent.
    pub time_budget_ms: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: 2000,
            time_budget_ms: None,
        }
    }
}

impl SearchLimits {
    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The returned path ends in a goal state.
    GoalReached,
    /// The expansion or time budget ran out.
    BudgetExhausted,
    /// The cancellation flag was raised.
    Cancelled,
    /// Every reachable state was expanded without reaching a goal.
    FrontierExhausted,
}

/// Result of [`a_star_search`].
///
/// `path` always starts with the start state. When no goal was reached it
/// leads to the best node generated so far: the deepest one, ties broken by
/// the lower heuristic value.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S> {
    pub path: Vec<S>,
    pub status: SearchStatus,
    pub expanded: usize,
    pub generated: usize,
}

impl<S> SearchOutcome<S> {
    /// Last state of the path.
    #[must_use]
    pub fn terminal(&self) -> Option<&S> {
        self.path.last()
    }

    /// Number of edges in the path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Debug)]
struct Node<S> {
    state: S,
    parent: Option<usize>,
    g: f32,
    h: f32,
    depth: usize,
}

#[derive(Debug)]
struct FrontierEntry {
    priority: f32,
    depth: usize,
    index: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for FrontierEntry {}

// `BinaryHeap` is a max-heap: the greatest entry has the lowest priority,
// then the greatest depth, then the earliest insertion.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| self.depth.cmp(&other.depth))
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search ordered by `g + h`.
///
/// `heuristic` estimates the remaining cost of a state (lower is better). With
/// the default zero step cost the search is a pure greedy best-first search
/// over the heuristic.
///
/// A state already reached with an equal or lower path cost is not pushed
/// again. The goal test runs when a node leaves the frontier.
pub fn a_star_search<P, H>(
    problem: &mut P,
    mut heuristic: H,
    limits: &SearchLimits,
    cancel: Option<&AtomicBool>,
) -> SearchOutcome<P::State>
where
    P: SearchProblem,
    H: FnMut(&P::State) -> f32,
{
    let start = problem.start_state();
    let start_h = heuristic(&start);

    let mut nodes = vec![Node {
        state: start.clone(),
        parent: None,
        g: 0.0,
        h: start_h,
        depth: 0,
    }];
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        priority: start_h,
        depth: 0,
        index: 0,
    });
    let mut best_g = HashMap::<P::State, f32>::new();
    best_g.insert(start, 0.0);

    let started_at = Instant::now();
    let time_budget = limits.time_budget();
    let mut best_partial = 0;
    let mut expanded = 0usize;

    let status = loop {
        let Some(entry) = frontier.pop() else {
            break SearchStatus::FrontierExhausted;
        };
        let node = &nodes[entry.index];
        if best_g.get(&node.state).is_some_and(|best| node.g > *best) {
            continue;
        }
        if cancel.is_some_and(|flag| flag.load(AtomicOrdering::Relaxed)) {
            break SearchStatus::Cancelled;
        }
        if problem.is_goal(&node.state) {
            best_partial = entry.index;
            break SearchStatus::GoalReached;
        }
        if expanded >= limits.max_expansions
            || time_budget.is_some_and(|budget| started_at.elapsed() >= budget)
        {
            break SearchStatus::BudgetExhausted;
        }
        expanded += 1;

        let parent_state = node.state.clone();
        let parent_g = node.g;
        let child_depth = node.depth + 1;
        for child in problem.successors(&parent_state) {
            let g = parent_g + problem.step_cost(&parent_state, &child);
            if best_g.get(&child).is_some_and(|best| *best <= g) {
                continue;
            }
            let h = heuristic(&child);
            best_g.insert(child.clone(), g);

            let index = nodes.len();
            nodes.push(Node {
                state: child,
                parent: Some(entry.index),
                g,
                h,
                depth: child_depth,
            });
            let best = &nodes[best_partial];
            if child_depth > best.depth || (child_depth == best.depth && h < best.h) {
                best_partial = index;
            }
            frontier.push(FrontierEntry {
                priority: g + h,
                depth: child_depth,
                index,
            });
        }
    };

    let generated = nodes.len() - 1;
    let path = reconstruct_path(nodes, best_partial);
    log::debug!(
        "search finished: status={status:?} expanded={expanded} generated={generated} depth={} elapsed={:?}",
        path.len() - 1,
        started_at.elapsed(),
    );

    SearchOutcome {
        path,
        status,
        expanded,
        generated,
    }
}

fn reconstruct_path<S>(nodes: Vec<Node<S>>, last: usize) -> Vec<S> {
    let mut indices = vec![last];
    let mut current = last;
    while let Some(parent) = nodes[current].parent {
        indices.push(parent);
        current = parent;
    }

    let mut slots: Vec<Option<S>> = nodes.into_iter().map(|node| Some(node.state)).collect();
    indices
        .into_iter()
        .rev()
        .filter_map(|index| slots[index].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    /// Directed graph with weighted edges.
    #[derive(Debug)]
    struct Graph {
        start: &'static str,
        goal: &'static str,
        edges: BTreeMap<&'static str, Vec<(&'static str, f32)>>,
        expanded: Vec<&'static str>,
    }

    impl Graph {
        fn new(start: &'static str, goal: &'static str) -> Self {
            Self {
                start,
                goal,
                edges: BTreeMap::new(),
                expanded: vec![],
            }
        }

        fn edge(mut self, from: &'static str, to: &'static str, cost: f32) -> Self {
            self.edges.entry(from).or_default().push((to, cost));
            self
        }
    }

    impl SearchProblem for Graph {
        type State = &'static str;

        fn start_state(&mut self) -> Self::State {
            self.start
        }

        fn is_goal(&self, state: &Self::State) -> bool {
            *state == self.goal
        }

        fn successors(&mut self, state: &Self::State) -> Vec<Self::State> {
            self.expanded.push(*state);
            self.edges
                .get(state)
                .map(|edges| edges.iter().map(|(to, _)| *to).collect())
                .unwrap_or_default()
        }

        fn step_cost(&self, from: &Self::State, to: &Self::State) -> f32 {
            self.edges[from]
                .iter()
                .find(|(t, _)| t == to)
                .map(|(_, cost)| *cost)
                .unwrap()
        }
    }

    /// Counter that counts up forever; goal at `target`.
    struct Counter {
        target: u32,
    }

    impl SearchProblem for Counter {
        type State = u32;

        fn start_state(&mut self) -> u32 {
            0
        }

        fn is_goal(&self, state: &u32) -> bool {
            *state == self.target
        }

        fn successors(&mut self, state: &u32) -> Vec<u32> {
            vec![state + 1, state + 2]
        }
    }

    fn zero(_: &&'static str) -> f32 {
        0.0
    }

    #[test]
    fn test_start_is_goal() {
        let mut graph = Graph::new("a", "a").edge("a", "b", 1.0);
        let outcome = a_star_search(&mut graph, zero, &SearchLimits::default(), None);
        assert_eq!(outcome.path, vec!["a"]);
        assert!(outcome.status.is_goal_reached());
        assert_eq!(outcome.expanded, 0);
        assert!(graph.expanded.is_empty());
    }

    #[test]
    fn test_cheapest_path_wins() {
        let mut graph = Graph::new("s", "g")
            .edge("s", "a", 1.0)
            .edge("s", "b", 4.0)
            .edge("a", "g", 5.0)
            .edge("b", "g", 1.0);
        let outcome = a_star_search(&mut graph, zero, &SearchLimits::default(), None);
        assert!(outcome.status.is_goal_reached());
        assert_eq!(outcome.path, vec!["s", "b", "g"]);
        assert_eq!(outcome.depth(), 2);
    }

    #[test]
    fn test_heuristic_guides_cost_free_search() {
        let mut graph = Graph::new("s", "g")
            .edge("s", "a", 0.0)
            .edge("s", "b", 0.0)
            .edge("a", "dead", 0.0)
            .edge("b", "g", 0.0);
        let heuristic = |state: &&'static str| if *state == "b" { 1.0 } else { 5.0 };
        let outcome = a_star_search(&mut graph, heuristic, &SearchLimits::default(), None);
        assert_eq!(outcome.path, vec!["s", "b", "g"]);
        assert_eq!(graph.expanded, vec!["s", "b"]);
    }

    #[test]
    fn test_ties_prefer_deeper_then_first_inserted() {
        let mut graph = Graph::new("s", "g")
            .edge("s", "a", 0.0)
            .edge("s", "b", 0.0)
            .edge("a", "c", 0.0)
            .edge("c", "g", 0.0);
        let outcome = a_star_search(&mut graph, zero, &SearchLimits::default(), None);
        assert_eq!(outcome.path, vec!["s", "a", "c", "g"]);
        assert_eq!(graph.expanded, vec!["s", "a", "c"]);
    }

    #[test]
    fn test_repeated_states_are_not_expanded_twice() {
        let mut graph = Graph::new("s", "g")
            .edge("s", "a", 0.0)
            .edge("s", "b", 0.0)
            .edge("a", "c", 0.0)
            .edge("b", "c", 0.0)
            .edge("c", "s", 0.0);
        let outcome = a_star_search(&mut graph, zero, &SearchLimits::default(), None);
        assert!(outcome.status.is_frontier_exhausted());
        assert_eq!(graph.expanded.len(), 4);
        assert_eq!(outcome.generated, 3);
    }

    #[test]
    fn test_frontier_exhausted_returns_deepest_path() {
        let mut graph = Graph::new("s", "g")
            .edge("s", "a", 0.0)
            .edge("s", "b", 0.0)
            .edge("b", "c", 0.0);
        let outcome = a_star_search(&mut graph, zero, &SearchLimits::default(), None);
        assert!(outcome.status.is_frontier_exhausted());
        assert_eq!(outcome.terminal(), Some(&"c"));
        assert_eq!(outcome.path, vec!["s", "b", "c"]);
    }

    #[test]
    fn test_budget_exhausted_returns_best_partial_path() {
        let mut counter = Counter { target: 1_000_000 };
        let limits = SearchLimits {
            max_expansions: 10,
            time_budget_ms: None,
        };
        let outcome = a_star_search(&mut counter, |_| 0.0, &limits, None);
        assert!(outcome.status.is_budget_exhausted());
        assert_eq!(outcome.expanded, 10);
        assert_eq!(outcome.path.first(), Some(&0));
        assert!(outcome.path.windows(2).all(|w| w[1] > w[0]));
        assert!(outcome.depth() >= 1);
    }

    #[test]
    fn test_partial_path_ties_break_on_heuristic() {
        let mut graph = Graph::new("s", "g")
            .edge("s", "a", 0.0)
            .edge("s", "b", 0.0);
        let heuristic = |state: &&'static str| match *state {
            "a" => 3.0,
            "b" => 2.0,
            _ => 10.0,
        };
        let outcome = a_star_search(&mut graph, heuristic, &SearchLimits::default(), None);
        assert!(outcome.status.is_frontier_exhausted());
        assert_eq!(outcome.path, vec!["s", "b"]);
    }

    #[test]
    fn test_cancelled_before_expansion() {
        let mut counter = Counter { target: 50 };
        let cancel = AtomicBool::new(true);
        let outcome = a_star_search(
            &mut counter,
            |_| 0.0,
            &SearchLimits::default(),
            Some(&cancel),
        );
        assert!(outcome.status.is_cancelled());
        assert_eq!(outcome.expanded, 0);
        assert_eq!(outcome.path, vec![0]);
    }

    #[test]
    fn test_counter_reaches_goal_with_heuristic() {
        let mut counter = Counter { target: 20 };
        let heuristic = |state: &u32| f32::from(u16::try_from(20_u32.abs_diff(*state)).unwrap());
        let outcome = a_star_search(&mut counter, heuristic, &SearchLimits::default(), None);
        assert!(outcome.status.is_goal_reached());
        assert_eq!(outcome.terminal(), Some(&20));
        assert_eq!(outcome.depth(), 10);
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let limits: SearchLimits = serde_json::from_str(r#"{ "time_budget_ms": 250 }"#).unwrap();
        assert_eq!(limits.max_expansions, 2000);
        assert_eq!(limits.time_budget(), Some(Duration::from_millis(250)));
    }
}
