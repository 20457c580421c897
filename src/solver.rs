//! The seven search strategies.
//!
//! Each one loops over pop, goal test, expand, insert until it reaches a goal
//! or runs out of frontier, and reports a `SearchOutcome`: the path from the
//! start to the goal (or `None`) plus the number of expanded nodes.
//!
//! `expanded` counts nodes that were popped, passed the goal test and were
//! expanded, except for IDA*, which counts every child it generates across all
//! of its iterations because it has no frontier to pop from.

use crate::problem::{child_nodes, Heuristic, Node, NodeId, Problem, SearchTree};
use crate::structures::{PriorityQueue, Queue, Stack};
use std::collections::{HashMap, HashSet};

/// Result of one search: the path `[start, .., goal]` if one was found, and
/// the number of nodes expanded on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<S, A> {
    pub path: Option<Vec<Node<S, A>>>,
    pub expanded: usize,
}

impl<S, A> SearchOutcome<S, A> {
    fn found(path: Vec<Node<S, A>>, expanded: usize) -> Self {
        SearchOutcome {
            path: Some(path),
            expanded,
        }
    }

    fn exhausted(expanded: usize) -> Self {
        SearchOutcome {
            path: None,
            expanded,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }

    /// Number of actions on the path, if one was found.
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// Cooperative cap on the work a single search may do.
///
/// Once `max_expanded` nodes have been counted the search gives up and
/// reports no path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_expanded: Option<usize>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Budget { max_expanded: None }
    }

    pub fn max_expanded(limit: usize) -> Self {
        Budget {
            max_expanded: Some(limit),
        }
    }

    fn exhausted(&self, expanded: usize) -> bool {
        self.max_expanded.map_or(false, |limit| expanded >= limit)
    }
}

/// Breadth-first search over a FIFO queue.
///
/// Shortest in number of actions. States already expanded are skipped when popped.
pub fn breadth_first<P: Problem>(
    problem: &P,
    start: P::State,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action> {
    let (mut tree, root) = SearchTree::with_root(start);
    let mut frontier = Queue::new();
    frontier.enqueue(root);
    let mut explored = HashSet::new();
    let mut expanded = 0;

    while let Ok(id) = frontier.dequeue() {
        let state = tree.get(id).state.clone();
        if problem.is_goal(&state) {
            return SearchOutcome::found(tree.path_to(id), expanded);
        }
        if explored.contains(&state) {
            continue;
        }
        if budget.exhausted(expanded) {
            break;
        }
        explored.insert(state);
        expanded += 1;
        for child in tree.expand(problem, id) {
            frontier.enqueue(child);
        }
    }
    SearchOutcome::exhausted(expanded)
}

/// Depth-first search over a LIFO stack.
///
/// With `depth_limit`, nodes deeper than the limit are dropped silently, so a
/// goal beyond the limit yields no path. Not optimal.
pub fn depth_first<P: Problem>(
    problem: &P,
    start: P::State,
    depth_limit: Option<u32>,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action> {
    let (mut tree, root) = SearchTree::with_root(start);
    let mut frontier = Stack::new();
    frontier.push(root);
    let mut explored = HashSet::new();
    let mut expanded = 0;

    while let Ok(id) = frontier.pop() {
        let node = tree.get(id);
        if problem.is_goal(&node.state) {
            return SearchOutcome::found(tree.path_to(id), expanded);
        }
        if explored.contains(&node.state) {
            continue;
        }
        if depth_limit.map_or(false, |limit| node.depth > limit) {
            continue;
        }
        if budget.exhausted(expanded) {
            break;
        }
        explored.insert(node.state.clone());
        expanded += 1;
        for child in tree.expand(problem, id) {
            frontier.push(child);
        }
    }
    SearchOutcome::exhausted(expanded)
}

/// Best-first search that keeps the cheapest known `g` per state.
///
/// A child is queued only when it improves strictly on the best `g` recorded
/// for its state. Queue entries left behind by a later improvement are
/// discarded when popped.
fn best_first_relaxing<P, F>(
    problem: &P,
    start: P::State,
    priority: F,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    F: Fn(&Node<P::State, P::Action>) -> f64,
{
    let (mut tree, root) = SearchTree::with_root(start.clone());
    let mut frontier = PriorityQueue::new();
    frontier.push(priority(tree.get(root)), root);
    let mut best_g: HashMap<P::State, f64> = HashMap::new();
    best_g.insert(start, 0.0);
    let mut expanded = 0;

    while let Ok(id) = frontier.pop() {
        let node = tree.get(id);
        let is_stale = best_g.get(&node.state).map_or(false, |&g| node.g > g);
        if is_stale {
            continue;
        }
        if problem.is_goal(&node.state) {
            return SearchOutcome::found(tree.path_to(id), expanded);
        }
        if budget.exhausted(expanded) {
            break;
        }
        expanded += 1;

        for child in child_nodes(problem, node, id) {
            let improves = best_g.get(&child.state).map_or(true, |&g| child.g < g);
            if improves {
                best_g.insert(child.state.clone(), child.g);
                let f = priority(&child);
                let child_id = tree.insert(child);
                frontier.push(f, child_id);
            }
        }
    }
    SearchOutcome::exhausted(expanded)
}

/// Uniform-cost search: frontier ordered by path cost `g`. Optimal.
pub fn uniform_cost<P: Problem>(
    problem: &P,
    start: P::State,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action> {
    best_first_relaxing(problem, start, |node| node.g, budget)
}

/// A*: frontier ordered by `g + h`. Optimal when `h` is admissible.
pub fn a_star<P, H>(
    problem: &P,
    start: P::State,
    heuristic: &H,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
    best_first_relaxing(
        problem,
        start,
        |node| node.g + heuristic.estimate(&node.state),
        budget,
    )
}

/// Weighted A*: frontier ordered by `g + weight * h`.
///
/// With `weight > 1` the search is greedier and usually expands fewer nodes,
/// at the price of possibly longer paths. `weight == 1` is plain A*.
pub fn weighted_a_star<P, H>(
    problem: &P,
    start: P::State,
    heuristic: &H,
    weight: f64,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
    best_first_relaxing(
        problem,
        start,
        |node| node.g + weight * heuristic.estimate(&node.state),
        budget,
    )
}

/// Greedy best-first search: frontier ordered by `h` alone. Not optimal.
pub fn greedy<P, H>(
    problem: &P,
    start: P::State,
    heuristic: &H,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
    let (mut tree, root) = SearchTree::with_root(start);
    let mut frontier = PriorityQueue::new();
    frontier.push(heuristic.estimate(&tree.get(root).state), root);
    let mut seen = HashSet::new();
    let mut expanded = 0;

    while let Ok(id) = frontier.pop() {
        let state = tree.get(id).state.clone();
        if problem.is_goal(&state) {
            return SearchOutcome::found(tree.path_to(id), expanded);
        }
        if seen.contains(&state) {
            continue;
        }
        if budget.exhausted(expanded) {
            break;
        }
        seen.insert(state);
        expanded += 1;
        for child in tree.expand(problem, id) {
            frontier.push(heuristic.estimate(&tree.get(child).state), child);
        }
    }
    SearchOutcome::exhausted(expanded)
}

enum Probe {
    Found,
    /// Smallest `f` that exceeded the bound below this node.
    Exceeded(f64),
    OutOfBudget,
}

/// Iterative-deepening A*.
///
/// Repeats a depth-first search bounded by `f = g + h`, raising the bound to
/// the smallest `f` that exceeded it, until a goal is found or no node exceeds
/// the bound (no path). Keeps no explored set, so memory is proportional to
/// the path length and nodes are re-generated on every iteration.
pub fn ida_star<P, H>(
    problem: &P,
    start: P::State,
    heuristic: &H,
    budget: Budget,
) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
    let mut bound = heuristic.estimate(&start);
    let mut path = vec![Node::root(start)];
    let mut generated = 0;

    loop {
        match bounded_search(problem, heuristic, &mut path, bound, &mut generated, budget) {
            Probe::Found => return SearchOutcome::found(path, generated),
            Probe::Exceeded(next) if next.is_finite() => bound = next,
            Probe::Exceeded(_) | Probe::OutOfBudget => {
                return SearchOutcome::exhausted(generated)
            }
        }
    }
}

// `path` is the current branch, root first. Each node's parent is the
// previous entry, so a successful probe leaves the solution in `path`.
fn bounded_search<P, H>(
    problem: &P,
    heuristic: &H,
    path: &mut Vec<Node<P::State, P::Action>>,
    bound: f64,
    generated: &mut usize,
    budget: Budget,
) -> Probe
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
    let Some(node) = path.last() else {
        return Probe::Exceeded(f64::INFINITY);
    };
    let f = node.g + heuristic.estimate(&node.state);
    if f > bound {
        return Probe::Exceeded(f);
    }
    if problem.is_goal(&node.state) {
        return Probe::Found;
    }

    let children = child_nodes(problem, node, NodeId(path.len() - 1));
    let mut smallest = f64::INFINITY;
    for child in children {
        if budget.exhausted(*generated) {
            return Probe::OutOfBudget;
        }
        *generated += 1;
        path.push(child);
        match bounded_search(problem, heuristic, path, bound, generated, budget) {
            Probe::Found => return Probe::Found,
            Probe::OutOfBudget => return Probe::OutOfBudget,
            Probe::Exceeded(t) => smallest = smallest.min(t),
        }
        path.pop();
    }
    Probe::Exceeded(smallest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Move, Puzzle, PuzzleState};
    use crate::heuristics::TileHeuristic;
    use crate::utils::state_from_str;

    const MANHATTAN: TileHeuristic = TileHeuristic::Manhattan;

    fn puzzle(layout: &str) -> (Puzzle, PuzzleState) {
        let start = state_from_str(layout).unwrap();
        (Puzzle::new(start), start)
    }

    /// Checks that `path` starts at `start`, ends at the goal, and that every
    /// step slides the blank by exactly one cell.
    fn assert_valid_path(puzzle: &Puzzle, start: PuzzleState, path: &[Node<PuzzleState, Move>]) {
        assert_eq!(path[0].state, start);
        assert_eq!(path[0].parent, None);
        assert!(puzzle.is_goal(&path[path.len() - 1].state));
        for (i, pair) in path.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let action = next.action.expect("non-root nodes carry an action");
            assert_eq!(prev.state.apply(action), Some(next.state));
            assert_eq!(next.parent, Some(NodeId(i)));
            assert_eq!(next.depth, prev.depth + 1);
            assert_eq!(next.g, prev.g + 1.0);
            let diff = (0..9)
                .filter(|&c| prev.state.tiles()[c] != next.state.tiles()[c])
                .count();
            assert_eq!(diff, 2, "one swap per step");
        }
    }

    #[test]
    fn test_one_move_scenario_all_algorithms() {
        let (p, start) = puzzle("1234567_8");
        let unlimited = Budget::unlimited();
        let outcomes = [
            ("BFS", breadth_first(&p, start, unlimited), 3),
            ("DFS", depth_first(&p, start, None, unlimited), 1),
            ("UCS", uniform_cost(&p, start, unlimited), 3),
            ("Greedy", greedy(&p, start, &MANHATTAN, unlimited), 1),
            ("A*", a_star(&p, start, &MANHATTAN, unlimited), 1),
            ("Weighted A*", weighted_a_star(&p, start, &MANHATTAN, 1.5, unlimited), 1),
            ("IDA*", ida_star(&p, start, &MANHATTAN, unlimited), 3),
        ];
        for (name, outcome, expected_expanded) in outcomes {
            let path = outcome.path.as_ref().unwrap_or_else(|| panic!("{} found no path", name));
            assert_eq!(path.len(), 2, "{}", name);
            assert_eq!(path[1].action, Some(Move::Right), "{}", name);
            assert_valid_path(&p, start, path);
            assert_eq!(outcome.expanded, expected_expanded, "{}", name);
            assert_eq!(outcome.steps(), Some(1));
        }
    }

    #[test]
    fn test_start_at_goal() {
        let (p, start) = puzzle("12345678_");
        let outcome = breadth_first(&p, start, Budget::unlimited());
        assert_eq!(outcome.path.as_ref().map(Vec::len), Some(1));
        assert_eq!(outcome.expanded, 0);
        let outcome = ida_star(&p, start, &MANHATTAN, Budget::unlimited());
        assert_eq!(outcome.steps(), Some(0));
        assert_eq!(outcome.expanded, 0);
    }

    #[test]
    fn test_optimal_algorithms_agree() {
        // 14 moves from the goal.
        let (p, start) = puzzle("8 1 3 4 _ 2 7 6 5");
        let bfs = breadth_first(&p, start, Budget::unlimited());
        let ucs = uniform_cost(&p, start, Budget::unlimited());
        let mut lengths = vec![bfs.steps(), ucs.steps()];
        for h in TileHeuristic::ALL {
            lengths.push(a_star(&p, start, &h, Budget::unlimited()).steps());
            lengths.push(ida_star(&p, start, &h, Budget::unlimited()).steps());
            lengths.push(weighted_a_star(&p, start, &h, 1.0, Budget::unlimited()).steps());
        }
        assert!(lengths.iter().all(|&l| l == Some(14)), "{:?}", lengths);
        assert_valid_path(&p, start, bfs.path.as_ref().unwrap());
    }

    #[test]
    fn test_deeper_instance_optimal_and_valid() {
        // 20 moves from the goal.
        let (p, start) = puzzle("360157824");
        let bfs = breadth_first(&p, start, Budget::unlimited());
        let a = a_star(&p, start, &MANHATTAN, Budget::unlimited());
        let lc = a_star(&p, start, &TileHeuristic::LinearConflict, Budget::unlimited());
        assert_eq!(bfs.steps(), Some(20));
        assert_eq!(a.steps(), Some(20));
        assert_eq!(lc.steps(), Some(20));
        assert_valid_path(&p, start, a.path.as_ref().unwrap());
        // The heuristics prune the search.
        assert!(a.expanded < bfs.expanded);
        assert!(lc.expanded <= a.expanded);
    }

    #[test]
    fn test_weighted_a_star_never_shorter_than_a_star() {
        let (p, start) = puzzle("360157824");
        let optimal = a_star(&p, start, &MANHATTAN, Budget::unlimited()).steps().unwrap();
        for weight in [1.5, 2.0, 5.0] {
            let outcome = weighted_a_star(&p, start, &MANHATTAN, weight, Budget::unlimited());
            let path = outcome.path.as_ref().unwrap();
            assert_valid_path(&p, start, path);
            assert!(path.len() - 1 >= optimal, "weight {}", weight);
        }
    }

    #[test]
    fn test_greedy_and_dfs_find_valid_paths() {
        let (p, start) = puzzle("360157824");
        let g = greedy(&p, start, &TileHeuristic::Misplaced, Budget::unlimited());
        assert_valid_path(&p, start, g.path.as_ref().unwrap());
        assert!(g.steps().unwrap() >= 20);

        let d = depth_first(&p, start, None, Budget::unlimited());
        assert_valid_path(&p, start, d.path.as_ref().unwrap());
        assert!(d.steps().unwrap() >= 20);
    }

    #[test]
    fn test_depth_limit_drops_deep_branches() {
        // 6 moves from the goal.
        let (p, start) = puzzle("4 1 3 7 2 6 _ 5 8");
        let shallow = depth_first(&p, start, Some(3), Budget::unlimited());
        assert!(shallow.path.is_none());
        assert!(shallow.expanded > 0);

        let generous = depth_first(&p, start, Some(20), Budget::unlimited());
        let path = generous.path.expect("goal lies within the limit");
        assert_valid_path(&p, start, &path);
        assert!(path.len() - 1 <= 21);
    }

    #[test]
    fn test_unsolvable_start_exhausts_frontier() {
        // Odd inversion count: the goal is unreachable.
        let (p, start) = puzzle("21345678_");
        assert!(!start.is_solvable());
        let unlimited = Budget::unlimited();

        let reachable = 181_440;
        let bfs = breadth_first(&p, start, unlimited);
        assert_eq!((bfs.path.is_none(), bfs.expanded), (true, reachable));
        let dfs = depth_first(&p, start, None, unlimited);
        assert_eq!((dfs.path.is_none(), dfs.expanded), (true, reachable));
        let gr = greedy(&p, start, &MANHATTAN, unlimited);
        assert_eq!((gr.path.is_none(), gr.expanded), (true, reachable));

        for outcome in [
            uniform_cost(&p, start, unlimited),
            a_star(&p, start, &MANHATTAN, unlimited),
            weighted_a_star(&p, start, &MANHATTAN, 1.5, unlimited),
        ] {
            assert!(outcome.path.is_none());
            assert!(outcome.expanded >= reachable);
        }
    }

    #[test]
    fn test_budget_stops_every_algorithm() {
        let (p, start) = puzzle("21345678_");
        let budget = Budget::max_expanded(500);
        let outcomes = [
            breadth_first(&p, start, budget),
            depth_first(&p, start, None, budget),
            uniform_cost(&p, start, budget),
            greedy(&p, start, &MANHATTAN, budget),
            a_star(&p, start, &MANHATTAN, budget),
            weighted_a_star(&p, start, &MANHATTAN, 2.0, budget),
            ida_star(&p, start, &MANHATTAN, budget),
        ];
        for outcome in outcomes {
            assert!(outcome.path.is_none());
            assert_eq!(outcome.expanded, 500);
        }
    }

    #[test]
    fn test_budget_large_enough_still_solves() {
        let (p, start) = puzzle("8 1 3 4 _ 2 7 6 5");
        let outcome = a_star(&p, start, &MANHATTAN, Budget::max_expanded(100_000));
        assert_eq!(outcome.steps(), Some(14));
    }

    #[test]
    fn test_ida_star_counts_generated_children() {
        // IDA* re-generates nodes on every iteration, so it reports more than A* expands.
        let (p, start) = puzzle("8 1 3 4 _ 2 7 6 5");
        let ida = ida_star(&p, start, &MANHATTAN, Budget::unlimited());
        let a = a_star(&p, start, &MANHATTAN, Budget::unlimited());
        assert_eq!(ida.steps(), a.steps());
        assert!(ida.expanded > a.expanded);
        assert_eq!(ida.expanded, 1381);
        assert_valid_path(&p, start, ida.path.as_ref().unwrap());
    }

    #[test]
    fn test_random_boards_are_solved() {
        let lc = TileHeuristic::LinearConflict;
        for seed in 0..10 {
            let start = PuzzleState::random_with_seed(seed);
            let p = Puzzle::new(start);
            let outcome = a_star(&p, start, &lc, Budget::unlimited());
            assert_valid_path(&p, start, outcome.path.as_ref().expect("solvable board"));
        }
    }

    /// A directed graph with weighted edges, vertices named by letters.
    /// Actions are the target vertex; edges are enumerated in declaration order.
    struct Graph {
        edges: &'static [(char, char, f64)],
        start: char,
        goal: char,
    }

    impl Problem for Graph {
        type State = char;
        type Action = char;

        fn initial_state(&self) -> char {
            self.start
        }

        fn is_goal(&self, state: &char) -> bool {
            *state == self.goal
        }

        fn actions(&self, state: &char) -> Vec<char> {
            self.edges
                .iter()
                .filter(|&&(from, _, _)| from == *state)
                .map(|&(_, to, _)| to)
                .collect()
        }

        fn result(&self, state: &char, action: char) -> Option<char> {
            self.edges
                .iter()
                .any(|&(from, to, _)| from == *state && to == action)
                .then_some(action)
        }

        fn step_cost(&self, state: &char, action: char, _next: &char) -> f64 {
            self.edges
                .iter()
                .find(|&&(from, to, _)| from == *state && to == action)
                .map_or(f64::INFINITY, |&(_, _, cost)| cost)
        }
    }

    // S reaches A directly for 5, or through B for 2.
    const DIAMOND: Graph = Graph {
        edges: &[
            ('S', 'A', 5.0),
            ('S', 'B', 1.0),
            ('B', 'A', 1.0),
            ('A', 'G', 10.0),
        ],
        start: 'S',
        goal: 'G',
    };

    // C is reached for 2 through either A or B.
    const TIE: Graph = Graph {
        edges: &[
            ('S', 'A', 1.0),
            ('S', 'B', 1.0),
            ('A', 'C', 1.0),
            ('B', 'C', 1.0),
            ('C', 'G', 1.0),
        ],
        start: 'S',
        goal: 'G',
    };

    fn vertices(path: &[Node<char, char>]) -> String {
        path.iter().map(|n| n.state).collect()
    }

    #[test]
    fn test_stale_entries_are_skipped_uncounted() {
        let zero = |_: &char| 0.0;
        for outcome in [
            uniform_cost(&DIAMOND, 'S', Budget::unlimited()),
            a_star(&DIAMOND, 'S', &zero, Budget::unlimited()),
        ] {
            let path = outcome.path.as_ref().expect("G is reachable");
            assert_eq!(vertices(path), "SBAG");
            assert_eq!(path[3].g, 12.0);
            // S, B and A(g=2); the A(g=5) entry is popped later and dropped.
            assert_eq!(outcome.expanded, 3);
        }
    }

    #[test]
    fn test_equal_cost_keeps_first_discovery() {
        let zero = |_: &char| 0.0;
        for outcome in [
            uniform_cost(&TIE, 'S', Budget::unlimited()),
            a_star(&TIE, 'S', &zero, Budget::unlimited()),
        ] {
            let path = outcome.path.as_ref().expect("G is reachable");
            assert_eq!(vertices(path), "SACG");
            // C is queued once, so it is expanded once: S, A, B, C.
            assert_eq!(outcome.expanded, 4);
        }
    }

    #[test]
    fn test_closure_heuristic() {
        // A zero heuristic turns A* into uniform-cost search.
        let (p, start) = puzzle("4 1 3 7 2 6 _ 5 8");
        let zero = |_: &PuzzleState| 0.0;
        let a = a_star(&p, start, &zero, Budget::unlimited());
        let ucs = uniform_cost(&p, start, Budget::unlimited());
        assert_eq!(a.steps(), Some(6));
        assert_eq!(a.expanded, ucs.expanded);
    }
}
