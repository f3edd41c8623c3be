use std::fmt::{self, Display};

use sokoban_core::Direction;

use crate::search::{NodeId, SearchTree};

/// A sequence of player moves that solves a level.
///
/// Displays as the concatenated move symbols, e.g. `"rrul"`.
///
/// # Examples
///
/// ```
/// use sokoban_core::Direction;
/// use sokoban_solver::Solution;
///
/// let solution = Solution::new(vec![Direction::Right, Direction::Up]);
/// assert_eq!(solution.to_string(), "ru");
/// assert_eq!(solution.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    moves: Vec<Direction>,
}

impl Solution {
    /// Creates a solution from moves in play order.
    #[must_use]
    pub fn new(moves: Vec<Direction>) -> Self {
        Self { moves }
    }

    /// Reconstructs the moves leading from the root of `tree` to `seed`.
    ///
    /// Walks parent links upward from `seed`, collecting each node's action
    /// until the root is reached. Seeding from the root yields an empty
    /// solution.
    #[must_use]
    pub fn extract(tree: &SearchTree, seed: NodeId) -> Self {
        let mut moves = Vec::new();
        let mut node = &tree[seed];
        while let (Some(action), Some(parent)) = (node.action(), node.parent()) {
            moves.push(action);
            node = &tree[parent];
        }
        moves.reverse();
        Self { moves }
    }

    /// Returns the moves in play order.
    #[must_use]
    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }

    /// Consumes the solution and returns its moves.
    #[must_use]
    pub fn into_moves(self) -> Vec<Direction> {
        self.moves
    }

    /// Returns the number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if the level was already solved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for direction in &self.moves {
            write!(f, "{direction}")?;
        }
        Ok(())
    }
}
