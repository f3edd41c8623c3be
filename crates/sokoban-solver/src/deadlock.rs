//! Pattern-based deadlock detection.
//!
//! The checks here are a fast filter, not a proof of unsolvability: they only
//! recognize boxes that are frozen by walls in a few fixed shapes. A missed
//! deadlock just costs search time, but a false report would prune a solvable
//! branch, so every pattern must describe a box that can never move again
//! while it is off a goal.
//!
//! Two patterns are recognized:
//!
//! - **Corner**: a box off a goal with walls on two orthogonal sides
//!   ([`is_cornered`]).
//! - **Wedged pair**: a box off a goal next to another box off a goal, with both
//!   pressed against the same wall line so neither can be pushed ([`is_wedged`]).

use sokoban_core::{Board, Cell, Direction, Position};

const CORNERS: [(Direction, Direction); 4] = [
    (Direction::Down, Direction::Left),
    (Direction::Down, Direction::Right),
    (Direction::Up, Direction::Left),
    (Direction::Up, Direction::Right),
];

/// Returns `true` if any of `boxes` is provably stuck on `board`.
///
/// `boxes` may include boxes already on a goal; those never trigger a report.
///
/// # Examples
///
/// ```
/// use sokoban_core::Board;
/// use sokoban_solver::deadlock::is_deadlocked;
///
/// let board: Board = "
/// #####
/// #$ @#
/// #  .#
/// #####
/// ".parse()?;
/// assert!(is_deadlocked(&board.box_positions(), &board));
/// # Ok::<(), sokoban_core::LevelError>(())
/// ```
#[must_use]
pub fn is_deadlocked(boxes: &[Position], board: &Board) -> bool {
    let mut wedges = WedgeMemo::new(board);
    boxes
        .iter()
        .any(|&pos| is_cornered(board, pos) || wedges.is_wedged(pos))
}

/// Returns `true` if the box at `pos` is off a goal and walled in on two
/// orthogonal sides.
#[must_use]
pub fn is_cornered(board: &Board, pos: Position) -> bool {
    if board.get(pos) != Some(Cell::Box) {
        return false;
    }
    CORNERS.iter().any(|&(vertical, horizontal)| {
        board.neighbor(pos, vertical).is_wall() && board.neighbor(pos, horizontal).is_wall()
    })
}

/// Returns `true` if the box at `pos` forms a frozen pair with the box below
/// it or to its right.
///
/// - Vertical pair against a left wall: both boxes have a wall on their left and
///   the lower box is itself wedged.
/// - Vertical pair against a right wall: both boxes have a wall on their right.
/// - Horizontal pair on a floor wall: both boxes have a wall below them and the
///   right box is itself wedged.
/// - Horizontal pair under a ceiling wall: both boxes have a wall above them and
///   the right box is itself wedged.
///
/// Only boxes off a goal take part. Recursion always moves down or right, so it
/// terminates, and each cell is evaluated at most once per call.
#[must_use]
pub fn is_wedged(board: &Board, pos: Position) -> bool {
    WedgeMemo::new(board).is_wedged(pos)
}

/// Wedge results for one board, indexed by cell.
struct WedgeMemo<'a> {
    board: &'a Board,
    results: Vec<Option<bool>>,
}

impl<'a> WedgeMemo<'a> {
    fn new(board: &'a Board) -> Self {
        Self {
            board,
            results: vec![None; board.width() * board.height()],
        }
    }

    fn is_wedged(&mut self, pos: Position) -> bool {
        if self.board.get(pos) != Some(Cell::Box) {
            return false;
        }
        let index = pos.row() * self.board.width() + pos.col();
        if let Some(wedged) = self.results[index] {
            return wedged;
        }
        let wedged = self.evaluate(pos);
        self.results[index] = Some(wedged);
        wedged
    }

    fn evaluate(&mut self, pos: Position) -> bool {
        let board = self.board;
        let at = |d_row, d_col| board.offset_cell(pos, d_row, d_col);
        let below_is_box = at(1, 0).is_box();
        let right_is_box = at(0, 1).is_box();

        if below_is_box
            && at(0, -1).is_wall()
            && at(1, -1).is_wall()
            && pos
                .step(Direction::Down)
                .is_some_and(|below| self.is_wedged(below))
        {
            return true;
        }
        if below_is_box && at(0, 1).is_wall() && at(1, 1).is_wall() {
            return true;
        }
        if !right_is_box {
            return false;
        }
        let floor = at(1, 0).is_wall() && at(1, 1).is_wall();
        let ceiling = at(-1, 0).is_wall() && at(-1, 1).is_wall();
        (floor || ceiling)
            && pos
                .step(Direction::Right)
                .is_some_and(|right| self.is_wedged(right))
    }
}
