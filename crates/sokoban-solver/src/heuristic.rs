//! Distance-to-solution estimate.

use sokoban_core::{Board, Position};

/// Flat cost charged for every box that is not on a goal.
pub const MISPLACED_BOX_PENALTY: usize = 2;

/// Scores boards by their estimated distance from a solved configuration.
///
/// The score is the sum, over every box not on a goal, of the Manhattan
/// distance to the nearest goal plus [`MISPLACED_BOX_PENALTY`]. Boxes already on
/// a goal contribute nothing, so the score is `0` exactly when the board is
/// solved.
///
/// Goal cells never move, so an evaluator built from one board of a level can
/// score every other board of the same level.
///
/// # Examples
///
/// ```
/// use sokoban_core::Board;
/// use sokoban_solver::heuristic::Evaluator;
///
/// let board: Board = "#@$ .#".parse()?;
/// let evaluator = Evaluator::new(&board);
/// // distance 2 to the goal, plus the misplaced-box penalty
/// assert_eq!(evaluator.evaluate(&board), 4);
/// # Ok::<(), sokoban_core::LevelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    goals: Vec<Position>,
}

impl Evaluator {
    /// Creates an evaluator for the level `board` belongs to.
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self {
            goals: board.goal_positions(),
        }
    }

    /// Returns the goal cells of the level.
    #[must_use]
    pub fn goals(&self) -> &[Position] {
        &self.goals
    }

    /// Scores `board`.
    #[must_use]
    pub fn evaluate(&self, board: &Board) -> usize {
        board
            .iter()
            .filter(|(_, cell)| cell.is_box())
            .map(|(pos, _)| self.nearest_goal_distance(pos) + MISPLACED_BOX_PENALTY)
            .sum()
    }

    // A level without goals has no distance term; its boxes still carry the
    // penalty, so such a board never scores 0.
    fn nearest_goal_distance(&self, pos: Position) -> usize {
        self.goals
            .iter()
            .map(|&goal| goal.manhattan_distance(pos))
            .min()
            .unwrap_or(0)
    }
}

/// Scores a single board; see [`Evaluator`].
#[must_use]
pub fn heuristic(board: &Board) -> usize {
    Evaluator::new(board).evaluate(board)
}
