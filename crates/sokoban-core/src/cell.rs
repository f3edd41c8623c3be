//! Cell contents of a Sokoban board.

use std::fmt::{self, Display};

/// The contents of a single board cell.
///
/// The vocabulary is closed: once two input layers are merged into a
/// [`Board`](crate::Board), every cell holds exactly one of these values.
///
/// # Examples
///
/// ```
/// use sokoban_core::Cell;
///
/// assert_eq!(Cell::Goal.with_box(), Cell::BoxOnGoal);
/// assert_eq!(Cell::Empty.with_player(), Cell::Player);
/// assert_eq!(Cell::PlayerOnGoal.vacated(), Cell::Goal);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Cell {
    /// An empty floor cell.
    #[default]
    Empty,
    /// An impassable wall.
    Wall,
    /// An empty goal cell.
    Goal,
    /// A box on plain floor.
    Box,
    /// A box resting on a goal.
    BoxOnGoal,
    /// The player on plain floor.
    Player,
    /// The player standing on a goal.
    PlayerOnGoal,
}

impl Cell {
    /// Array containing all cell kinds.
    pub const ALL: [Self; 7] = [
        Self::Empty,
        Self::Wall,
        Self::Goal,
        Self::Box,
        Self::BoxOnGoal,
        Self::Player,
        Self::PlayerOnGoal,
    ];

    /// Returns the XSB symbol for this cell.
    ///
    /// This symbol is also the cell's contribution to a
    /// [`BoardSignature`](crate::BoardSignature).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Goal => '.',
            Self::Box => '$',
            Self::BoxOnGoal => '*',
            Self::Player => '@',
            Self::PlayerOnGoal => '+',
        }
    }

    /// Parses an XSB symbol.
    ///
    /// `' '`, `'-'` and `'_'` all denote an empty floor cell.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        let cell = match symbol {
            ' ' | '-' | '_' => Self::Empty,
            '#' => Self::Wall,
            '.' => Self::Goal,
            '$' => Self::Box,
            '*' => Self::BoxOnGoal,
            '@' => Self::Player,
            '+' => Self::PlayerOnGoal,
            _ => return None,
        };
        Some(cell)
    }

    /// Returns `true` if the cell holds a box, whether or not it sits on a goal.
    #[must_use]
    pub const fn has_box(self) -> bool {
        matches!(self, Self::Box | Self::BoxOnGoal)
    }

    /// Returns `true` if the cell holds the player.
    #[must_use]
    pub const fn has_player(self) -> bool {
        matches!(self, Self::Player | Self::PlayerOnGoal)
    }

    /// Returns `true` if the underlying floor is a goal.
    #[must_use]
    pub const fn is_goal_floor(self) -> bool {
        matches!(self, Self::Goal | Self::BoxOnGoal | Self::PlayerOnGoal)
    }

    /// Returns `true` if a box cannot be pushed into this cell.
    #[must_use]
    pub const fn blocks_box(self) -> bool {
        matches!(self, Self::Wall | Self::Box | Self::BoxOnGoal)
    }

    /// Returns the cell after a box arrives on this cell's floor.
    #[must_use]
    pub const fn with_box(self) -> Self {
        if self.is_goal_floor() {
            Self::BoxOnGoal
        } else {
            Self::Box
        }
    }

    /// Returns the cell after the player arrives on this cell's floor.
    #[must_use]
    pub const fn with_player(self) -> Self {
        if self.is_goal_floor() {
            Self::PlayerOnGoal
        } else {
            Self::Player
        }
    }

    /// Returns the bare floor left behind once the occupant leaves.
    #[must_use]
    pub const fn vacated(self) -> Self {
        match self {
            Self::Wall => Self::Wall,
            _ if self.is_goal_floor() => Self::Goal,
            _ => Self::Empty,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell of the static layer: the part of a level that never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticTile {
    /// Plain floor.
    Empty,
    /// A wall.
    Wall,
    /// A goal.
    Goal,
}

impl StaticTile {
    /// Parses a static-layer symbol (`#`, `.`, or one of the empty symbols).
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' | '-' | '_' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            '.' => Some(Self::Goal),
            _ => None,
        }
    }

    /// Returns the static-layer symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Goal => '.',
        }
    }
}

/// A cell of the dynamic layer: the movable pieces of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicTile {
    /// Nothing movable here.
    Empty,
    /// The player.
    Player,
    /// A box.
    Box,
}

impl DynamicTile {
    /// Parses a dynamic-layer symbol (`@`, `$`, or one of the empty symbols).
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' | '-' | '_' => Some(Self::Empty),
            '@' => Some(Self::Player),
            '$' => Some(Self::Box),
            _ => None,
        }
    }

    /// Returns the dynamic-layer symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Player => '@',
            Self::Box => '$',
        }
    }
}

/// Merges a static tile with the dynamic tile stacked on top of it.
///
/// Returns `None` when a movable piece sits on a wall.
#[must_use]
pub const fn merge_tiles(floor: StaticTile, item: DynamicTile) -> Option<Cell> {
    let cell = match (floor, item) {
        (StaticTile::Wall, DynamicTile::Empty) => Cell::Wall,
        (StaticTile::Wall, _) => return None,
        (StaticTile::Empty, DynamicTile::Empty) => Cell::Empty,
        (StaticTile::Goal, DynamicTile::Empty) => Cell::Goal,
        (StaticTile::Empty, DynamicTile::Box) => Cell::Box,
        (StaticTile::Goal, DynamicTile::Box) => Cell::BoxOnGoal,
        (StaticTile::Empty, DynamicTile::Player) => Cell::Player,
        (StaticTile::Goal, DynamicTile::Player) => Cell::PlayerOnGoal,
    };
    Some(cell)
}
