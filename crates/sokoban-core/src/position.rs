//! Board coordinates and movement directions.

use std::fmt::{self, Display};

use crate::ParseDirectionError;

/// A board position as a 0-indexed `(row, column)` pair.
///
/// # Examples
///
/// ```
/// use sokoban_core::{Direction, Position};
///
/// let pos = Position::new(2, 3);
/// assert_eq!(pos.step(Direction::Up), Some(Position::new(1, 3)));
/// assert_eq!(Position::new(0, 0).step(Direction::Left), None);
/// assert_eq!(pos.manhattan_distance(Position::new(4, 1)), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row (0-indexed from the top).
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column (0-indexed from the left).
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the position shifted by `(d_row, d_col)`.
    ///
    /// Returns `None` if either coordinate would become negative. The upper
    /// bound is not checked here since it depends on the board.
    #[must_use]
    pub const fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(d_row) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(d_col) else {
            return None;
        };
        Some(Self { row, col })
    }

    /// Returns the adjacent position in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.offset();
        self.offset(d_row, d_col)
    }

    /// Returns the Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four player moves.
///
/// Displayed as the lowercase move symbol used in solution strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions, in successor generation order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(row, column)` delta of a single step.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Returns the move symbol (`u`, `d`, `l`, `r`).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Up => 'u',
            Self::Down => 'd',
            Self::Left => 'l',
            Self::Right => 'r',
        }
    }

    /// Parses a move symbol, accepting either case.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'u' => Some(Self::Up),
            'd' => Some(Self::Down),
            'l' => Some(Self::Left),
            'r' => Some(Self::Right),
            _ => None,
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = ParseDirectionError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Self::from_symbol(symbol).ok_or(ParseDirectionError { symbol })
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
