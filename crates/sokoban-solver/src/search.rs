//! Greedy best-first search over board states.
//!
//! The search keeps every node it creates in a [`SearchTree`] arena. Nodes
//! refer to their parent by [`NodeId`], so the tree needs no shared ownership
//! and is dropped in one piece when the search ends.
//!
//! # Design Notes
//!
//! - The [`Frontier`] orders nodes by heuristic score alone and breaks ties by
//!   insertion order. Path cost is ignored, so solutions are not shortest.
//! - The expansion record lists nodes in the order they were chosen. Entry `k`
//!   is expanded on iteration `k`; after expanding it, the frontier minimum is
//!   appended unconditionally, even when entry `k` turns out to be solved. That
//!   trailing entry is reported as [`SearchOutcome::lookahead`] and never used
//!   for reconstruction.

use std::{
    cmp::Reverse,
    collections::BinaryHeap,
    ops::Index,
    time::Instant,
};

use sokoban_core::{Board, Direction, Position};
use tinyvec::ArrayVec;

use crate::{
    ExploredLedger, SearchLimits, SearchStats, SolveError,
    heuristic::Evaluator,
    movegen::{MoveGenerator, Successor},
};

/// Index of a node in a [`SearchTree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, always the first node of a tree.
    pub const ROOT: Self = Self(0);

    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One state in the search tree.
///
/// Every node owns its board outright; no two nodes share a grid.
#[derive(Debug, Clone)]
pub struct SearchNode {
    board: Board,
    player: Position,
    action: Option<Direction>,
    heuristic: usize,
    parent: Option<NodeId>,
    children: ArrayVec<[NodeId; 4]>,
}

impl SearchNode {
    /// Returns the board of this state.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player's position.
    #[must_use]
    pub fn player(&self) -> Position {
        self.player
    }

    /// Returns the move that produced this node, or `None` for the root.
    #[must_use]
    pub fn action(&self) -> Option<Direction> {
        self.action
    }

    /// Returns the heuristic score of the board.
    #[must_use]
    pub fn heuristic(&self) -> usize {
        self.heuristic
    }

    /// Returns the node this one was generated from, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the live children generated when this node was expanded.
    ///
    /// Empty until the node is expanded.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena holding every node created during one search.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Creates a tree containing only the root state.
    #[must_use]
    pub fn new(board: Board, player: Position, heuristic: usize) -> Self {
        let root = SearchNode {
            board,
            player,
            action: None,
            heuristic,
            parent: None,
            children: ArrayVec::new(),
        };
        Self { nodes: vec![root] }
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &SearchNode {
        &self[NodeId::ROOT]
    }

    /// Returns the node with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a successor of `parent` and links it as one of its children.
    ///
    /// # Panics
    ///
    /// Panics if `parent` already has four children.
    pub fn attach(&mut self, parent: NodeId, successor: Successor) -> NodeId {
        let id = NodeId(self.nodes.len());
        let Successor {
            board,
            player,
            action,
            heuristic,
        } = successor;
        self.nodes.push(SearchNode {
            board,
            player,
            action: Some(action),
            heuristic,
            parent: Some(parent),
            children: ArrayVec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl Index<NodeId> for SearchTree {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Generated but unexpanded nodes, lowest heuristic first.
///
/// Nodes with equal scores come out in the order they went in.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<(usize, u64, NodeId)>>,
    next_seq: u64,
}

impl Frontier {
    /// Creates an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node with its heuristic score.
    pub fn push(&mut self, id: NodeId, heuristic: usize) {
        self.heap.push(Reverse((heuristic, self.next_seq, id)));
        self.next_seq += 1;
    }

    /// Removes and returns the node with the lowest score.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }

    /// Returns the number of waiting nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no node is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Where a successful search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The expanded node whose board is solved.
    pub goal: NodeId,
    /// The frontier minimum appended to the expansion record on the same
    /// iteration that found `goal`, or `None` if the frontier was empty then.
    ///
    /// Solutions are always reconstructed from `goal`, not from this node.
    pub lookahead: Option<NodeId>,
}

/// Drives a greedy best-first search from a single root board.
///
/// A driver is built for one level and consumed by one search. Its explored
/// ledger, frontier and tree all live and die with it.
///
/// # Examples
///
/// ```
/// use sokoban_core::Board;
/// use sokoban_solver::{SearchLimits, search::SearchDriver};
///
/// let board: Board = "#@$.#".parse()?;
/// let mut driver = SearchDriver::new(board, SearchLimits::default())?;
/// let outcome = driver.run()?;
///
/// assert_eq!(driver.tree()[outcome.goal].heuristic(), 0);
/// assert_eq!(driver.expansion_record()[0], sokoban_solver::search::NodeId::ROOT);
/// # Ok::<(), sokoban_solver::SolveError>(())
/// ```
#[derive(Debug)]
pub struct SearchDriver {
    limits: SearchLimits,
    evaluator: Evaluator,
    tree: SearchTree,
    frontier: Frontier,
    ledger: ExploredLedger,
    record: Vec<NodeId>,
    stats: SearchStats,
    result: Option<Result<SearchOutcome, SolveError>>,
}

impl SearchDriver {
    /// Prepares a search rooted at `board`.
    ///
    /// The root is scored, placed at index 0 of the expansion record, and its
    /// signature is recorded as explored.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidLevel`] if the board has no player.
    pub fn new(board: Board, limits: SearchLimits) -> Result<Self, SolveError> {
        let player = board
            .find_player()
            .ok_or(sokoban_core::LevelError::MissingPlayer)?;
        let evaluator = Evaluator::new(&board);
        let heuristic = evaluator.evaluate(&board);

        let mut ledger = ExploredLedger::new();
        ledger.record(board.signature());

        Ok(Self {
            limits,
            evaluator,
            tree: SearchTree::new(board, player, heuristic),
            frontier: Frontier::new(),
            ledger,
            record: vec![NodeId::ROOT],
            stats: SearchStats::default(),
            result: None,
        })
    }

    /// Runs the search until a solved board is expanded.
    ///
    /// Each iteration expands the next node of the expansion record, pushes its
    /// live children onto the frontier, then pops the frontier minimum onto
    /// the record. The search stops after the iteration whose expanded node
    /// scores `0`.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Unsolvable`] if the frontier is empty when the next node
    ///   must be chosen.
    /// - [`SolveError::BudgetExhausted`] if the configured limits are reached.
    ///
    /// A driver searches only once. Later calls return the first result
    /// without expanding anything.
    pub fn run(&mut self) -> Result<SearchOutcome, SolveError> {
        if let Some(result) = &self.result {
            return result.clone();
        }
        let result = self.search();
        self.result = Some(result.clone());
        result
    }

    fn search(&mut self) -> Result<SearchOutcome, SolveError> {
        let started = Instant::now();
        let mut k = 0;
        loop {
            let elapsed = started.elapsed();
            if self.limits.is_exceeded(k, elapsed) {
                log::warn!(
                    "search budget exhausted: expansions={k}, elapsed={elapsed:?}, frontier={}",
                    self.frontier.len()
                );
                return Err(SolveError::BudgetExhausted {
                    expansions: k,
                    elapsed,
                });
            }

            let current = self.record[k];
            self.expand(current);

            let heuristic = self.tree[current].heuristic;
            let goal_reached = heuristic == 0;
            log::trace!(
                "expanded #{k}: node={}, heuristic={heuristic}, children={}, frontier={}",
                current.0,
                self.tree[current].children.len(),
                self.frontier.len()
            );

            // The pop happens whether or not `current` is solved.
            let next = self.frontier.pop();
            if let Some(next) = next {
                self.record.push(next);
            }

            if goal_reached {
                return Ok(SearchOutcome {
                    goal: current,
                    lookahead: next,
                });
            }
            if next.is_none() {
                return Err(SolveError::Unsolvable);
            }
            k += 1;
        }
    }

    fn expand(&mut self, current: NodeId) {
        let node = &self.tree[current];
        let expansion =
            MoveGenerator::new(&self.evaluator).expand(&node.board, node.player, &mut self.ledger);

        self.stats.expansions += 1;
        self.stats.duplicates += expansion.duplicates;
        self.stats.deadlocks += expansion.deadlocks;
        self.stats.generated += expansion.children.len();

        for successor in expansion.children {
            let heuristic = successor.heuristic;
            let id = self.tree.attach(current, successor);
            self.frontier.push(id, heuristic);
        }
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
    }

    /// Returns the search tree built so far.
    #[must_use]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns the nodes chosen for expansion, in order.
    #[must_use]
    pub fn expansion_record(&self) -> &[NodeId] {
        &self.record
    }

    /// Returns the explored-state ledger.
    #[must_use]
    pub fn ledger(&self) -> &ExploredLedger {
        &self.ledger
    }

    /// Returns the statistics collected so far.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn driver(s: &str) -> SearchDriver {
        SearchDriver::new(s.parse().unwrap(), SearchLimits::default()).unwrap()
    }

    #[test]
    fn test_frontier_orders_by_score_then_insertion() {
        let mut frontier = Frontier::new();
        frontier.push(NodeId(1), 5);
        frontier.push(NodeId(2), 3);
        frontier.push(NodeId(3), 5);
        frontier.push(NodeId(4), 3);
        assert_eq!(frontier.len(), 4);

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(order, [NodeId(2), NodeId(4), NodeId(1), NodeId(3)]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_tree_links_parent_and_children() {
        let board: Board = "#@ .#".parse().unwrap();
        let mut tree = SearchTree::new(board.clone(), Position::new(0, 1), 0);
        let child = tree.attach(
            NodeId::ROOT,
            Successor {
                board,
                player: Position::new(0, 2),
                action: Direction::Right,
                heuristic: 0,
            },
        );
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root().children(), [child]);
        assert_eq!(tree[child].parent(), Some(NodeId::ROOT));
        assert_eq!(tree[child].action(), Some(Direction::Right));
        assert_eq!(tree.root().action(), None);
        assert!(tree.get(NodeId(2)).is_none());
    }

    #[test]
    fn test_root_is_recorded_before_search() {
        let d = driver("#@$ .#");
        assert_eq!(d.expansion_record(), [NodeId::ROOT]);
        assert!(d.ledger().contains(&d.tree().root().board().signature()));
        assert_eq!(d.tree().root().heuristic(), 2 + 2);
    }

    #[test]
    fn test_solved_root_stops_after_first_iteration() {
        let mut d = driver("#@ *#");
        let outcome = d.run().unwrap();
        assert_eq!(outcome.goal, NodeId::ROOT);
        // The root's single child was still popped onto the record.
        assert_eq!(outcome.lookahead, Some(NodeId(1)));
        assert_eq!(d.expansion_record(), [NodeId::ROOT, NodeId(1)]);
        assert_eq!(d.stats().expansions(), 1);
    }

    #[test]
    fn test_goal_is_expanded_node_not_lookahead() {
        let mut d = driver("#@$.  #");
        let outcome = d.run().unwrap();
        let goal = &d.tree()[outcome.goal];
        assert_eq!(goal.heuristic(), 0);
        assert_eq!(goal.action(), Some(Direction::Right));

        let record = d.expansion_record();
        let lookahead = outcome.lookahead.unwrap();
        assert_eq!(record[record.len() - 1], lookahead);
        assert_eq!(record[record.len() - 2], outcome.goal);
        assert_ne!(lookahead, outcome.goal);
    }

    #[test]
    fn test_exhausted_frontier_is_unsolvable() {
        let mut d = driver(
            "
            ######
            #@ $ #
            ######
            #  . #
            ######
            ",
        );
        assert_eq!(d.run(), Err(SolveError::Unsolvable));
        assert!(d.stats().expansions() > 1);
    }

    #[test]
    fn test_expansion_ceiling() {
        let board: Board = "
            ########
            #@     #
            #      #
            #   $  #
            #      #
            #     .#
            ########
        "
        .parse()
        .unwrap();
        let limits = SearchLimits::unbounded().with_max_expansions(2);
        let mut d = SearchDriver::new(board, limits).unwrap();
        let err = d.run().unwrap_err();
        assert!(matches!(
            err,
            SolveError::BudgetExhausted { expansions: 2, .. }
        ));
        assert_eq!(d.stats().expansions(), 2);
    }

    #[test]
    fn test_time_limit() {
        let board: Board = "#@$ .#".parse().unwrap();
        let limits = SearchLimits::unbounded().with_time_limit(Duration::ZERO);
        let mut d = SearchDriver::new(board, limits).unwrap();
        assert!(d.run().unwrap_err().is_budget_exhausted());
        assert_eq!(d.stats().expansions(), 0);
    }

    #[test]
    fn test_second_run_returns_first_result() {
        let mut d = driver("#@$.  #");
        let first = d.run();
        let record = d.expansion_record().to_vec();
        let stats = d.stats();
        let nodes = d.tree().len();

        assert_eq!(d.run(), first);
        assert_eq!(d.expansion_record(), record);
        assert_eq!(d.stats(), stats);
        assert_eq!(d.tree().len(), nodes);

        let mut stuck = driver("#@$#  .#");
        assert_eq!(stuck.run(), Err(SolveError::Unsolvable));
        assert_eq!(stuck.run(), Err(SolveError::Unsolvable));
        assert_eq!(stuck.stats().expansions(), 1);
    }

    #[test]
    fn test_children_are_attached_to_expanded_nodes() {
        let mut d = driver("#@$ .#");
        let outcome = d.run().unwrap();
        for &id in d.expansion_record() {
            for &child in d.tree()[id].children() {
                assert_eq!(d.tree()[child].parent(), Some(id));
            }
        }
        assert!(d.tree().len() > 1);
        assert_eq!(d.tree()[outcome.goal].board().to_string(), "#  @*#");
    }
}
