//! The contract every search algorithm is written against.
//!
//! - `Problem`: initial state, goal test, action enumeration, transition and
//!   step cost. Queried, never mutated, during a search.
//! - `Heuristic`: an estimate of the remaining cost from a state.
//! - `Node` / `SearchTree`: the search tree stored as an arena. Nodes refer to
//!   their parent by `NodeId` and are never modified after insertion.

use std::fmt::Debug;
use std::hash::Hash;

/// A search problem over states of type `State` connected by actions of type `Action`.
pub trait Problem {
    /// States are compared and hashed by identity (their tile layout for the 8-puzzle).
    type State: Clone + Eq + Hash + Debug;
    type Action: Copy + Eq + Debug;

    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// The legal actions from `state`, in a fixed deterministic order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying `action` to `state`, or `None` if the
    /// action is not legal there.
    fn result(&self, state: &Self::State, action: Self::Action) -> Option<Self::State>;

    fn step_cost(&self, _state: &Self::State, _action: Self::Action, _next: &Self::State) -> f64 {
        1.0
    }
}

/// An estimate of the cost remaining from a state to the nearest goal.
///
/// Implemented for any `Fn(&S) -> f64`, so closures work as heuristics:
/// ```
/// use eight_puzzle_solver::problem::Heuristic;
///
/// let zero = |_: &u8| 0.0;
/// assert_eq!(zero.estimate(&3), 0.0);
/// ```
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> f64;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> f64,
{
    fn estimate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Index of a node inside the `SearchTree` (or inside a reconstructed path).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A search-tree record: a state plus how it was reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<S, A> {
    pub state: S,
    /// `None` for the root.
    pub parent: Option<NodeId>,
    /// The action applied to the parent, `None` for the root.
    pub action: Option<A>,
    /// Cumulative path cost from the root.
    pub g: f64,
    /// Number of actions from the root (0 for the root).
    pub depth: u32,
}

impl<S, A> Node<S, A> {
    /// A parentless node at depth 0 with zero path cost.
    pub fn root(state: S) -> Self {
        Node {
            state,
            parent: None,
            action: None,
            g: 0.0,
            depth: 0,
        }
    }
}

/// Generates the children of `node`, one per legal action in `problem.actions` order.
///
/// Each child records `parent` as its parent id, `g = node.g + step_cost` and
/// `depth = node.depth + 1`.
pub fn child_nodes<P: Problem>(
    problem: &P,
    node: &Node<P::State, P::Action>,
    parent: NodeId,
) -> Vec<Node<P::State, P::Action>> {
    problem
        .actions(&node.state)
        .into_iter()
        .filter_map(|action| {
            let next = problem.result(&node.state, action)?;
            let g = node.g + problem.step_cost(&node.state, action, &next);
            Some(Node {
                state: next,
                parent: Some(parent),
                action: Some(action),
                g,
                depth: node.depth + 1,
            })
        })
        .collect()
}

/// Arena owning every node generated during one search.
#[derive(Clone, Debug)]
pub struct SearchTree<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S: Clone, A: Clone> SearchTree<S, A> {
    /// Creates a tree holding only the root node for `state`, which gets `NodeId(0)`.
    pub fn with_root(state: S) -> (Self, NodeId) {
        let tree = SearchTree {
            nodes: vec![Node::root(state)],
        };
        (tree, NodeId(0))
    }

    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    pub fn insert(&mut self, node: Node<S, A>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Generates and stores the children of `id`, returning their ids in action order.
    pub fn expand<P>(&mut self, problem: &P, id: NodeId) -> Vec<NodeId>
    where
        P: Problem<State = S, Action = A>,
    {
        let children = child_nodes(problem, self.get(id), id);
        children.into_iter().map(|child| self.insert(child)).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks parent links from `goal` back to the root and returns `[root, .., goal]`.
    ///
    /// The returned nodes are re-indexed so that each node's `parent` points at
    /// the previous element of the returned vector.
    pub fn path_to(&self, goal: NodeId) -> Vec<Node<S, A>> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let node = self.get(id);
            path.push(node.clone());
            cursor = node.parent;
        }
        path.reverse();
        for (i, node) in path.iter_mut().enumerate() {
            node.parent = i.checked_sub(1).map(NodeId);
        }
        path
    }
}
