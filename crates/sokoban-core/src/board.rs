//! The board state model.

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{
    Cell, Direction, DynamicTile, Layer, LevelError, Position, StaticTile, cell::merge_tiles,
};

/// One complete puzzle configuration.
///
/// A board is a fixed-size, row-major grid of [`Cell`]s. Its dimensions never
/// change after construction. Boards are plain values: a successor state is
/// always produced by cloning first and then mutating the clone, so no two
/// search nodes ever share a grid.
///
/// Positions outside the grid read as [`Cell::Wall`] through [`Board::get_or_wall`],
/// [`Board::neighbor`] and [`Board::offset_cell`]. This acts as an implicit wall
/// border for levels whose outer ring is not fully walled.
///
/// # Examples
///
/// ```
/// use sokoban_core::{Board, Cell, Position};
///
/// let board: Board = "
/// #####
/// #@$.#
/// #####
/// ".parse()?;
///
/// assert_eq!(board.width(), 5);
/// assert_eq!(board.height(), 3);
/// assert_eq!(board[Position::new(1, 2)], Cell::Box);
/// assert_eq!(board.find_player(), Some(Position::new(1, 1)));
/// assert!(!board.is_solved());
/// # Ok::<(), sokoban_core::LevelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board by merging a static layer (walls, goals, floor) with a
    /// dynamic layer (player, boxes).
    ///
    /// Both layers are given as `height` rows of `width` symbols each. A box
    /// placed on a goal becomes [`Cell::BoxOnGoal`]; the player placed on a goal
    /// becomes [`Cell::PlayerOnGoal`].
    ///
    /// # Errors
    ///
    /// - [`LevelError::EmptyLevel`] if `width` or `height` is zero.
    /// - [`LevelError::DimensionMismatch`] if a layer has the wrong shape.
    /// - [`LevelError::UnrecognizedSymbol`] for a symbol outside a layer's vocabulary.
    /// - [`LevelError::ItemOnWall`] if the player or a box sits on a wall.
    /// - [`LevelError::MissingPlayer`] / [`LevelError::MultiplePlayers`] unless
    ///   there is exactly one player.
    ///
    /// # Examples
    ///
    /// ```
    /// use sokoban_core::{Board, Cell, Position};
    ///
    /// let board = Board::from_layers(
    ///     4,
    ///     3,
    ///     &["####", "#  #", "####"],
    ///     &["    ", " @  ", "    "],
    /// )?;
    /// assert_eq!(board[Position::new(1, 1)], Cell::Player);
    /// # Ok::<(), sokoban_core::LevelError>(())
    /// ```
    pub fn from_layers<S>(
        width: usize,
        height: usize,
        static_layer: &[S],
        dynamic_layer: &[S],
    ) -> Result<Self, LevelError>
    where
        S: AsRef<str>,
    {
        if width == 0 || height == 0 {
            return Err(LevelError::EmptyLevel { width, height });
        }
        let floors = parse_layer(
            width,
            height,
            Layer::Static,
            static_layer,
            StaticTile::from_symbol,
        )?;
        let items = parse_layer(
            width,
            height,
            Layer::Dynamic,
            dynamic_layer,
            DynamicTile::from_symbol,
        )?;

        let mut cells = Vec::with_capacity(width * height);
        for (i, (floor, item)) in floors.into_iter().zip(items).enumerate() {
            let position = Position::new(i / width, i % width);
            let cell = merge_tiles(floor, item).ok_or(LevelError::ItemOnWall { position })?;
            cells.push(cell);
        }

        let board = Self {
            width,
            height,
            cells,
        };
        board.check_single_player()?;
        Ok(board)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < self.height && pos.col() < self.width
    }

    /// Returns the cell at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.index_of(pos)])
    }

    /// Returns the cell at `pos`, reading [`Cell::Wall`] for missing or
    /// out-of-grid positions.
    #[must_use]
    pub fn get_or_wall(&self, pos: Option<Position>) -> Cell {
        pos.and_then(|pos| self.get(pos)).unwrap_or(Cell::Wall)
    }

    /// Returns the cell adjacent to `pos` in `direction`.
    ///
    /// Reads [`Cell::Wall`] beyond the grid edge.
    #[must_use]
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Cell {
        self.get_or_wall(pos.step(direction))
    }

    /// Returns the cell at `pos` shifted by `(d_row, d_col)`.
    ///
    /// Reads [`Cell::Wall`] beyond the grid edge.
    #[must_use]
    pub fn offset_cell(&self, pos: Position, d_row: isize, d_col: isize) -> Cell {
        self.get_or_wall(pos.offset(d_row, d_col))
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| Position::new(i / width, i % width))
    }

    /// Iterates over `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.positions().zip(self.cells.iter().copied())
    }

    /// Returns the positions of every box, including boxes already on a goal.
    #[must_use]
    pub fn box_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.has_box())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Returns the positions of every goal, whether empty or occupied.
    #[must_use]
    pub fn goal_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_goal_floor())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Returns the number of boxes on the board.
    #[must_use]
    pub fn box_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.has_box()).count()
    }

    /// Returns the number of goal cells on the board.
    #[must_use]
    pub fn goal_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_goal_floor()).count()
    }

    /// Returns the player's position, scanning in row-major order.
    #[must_use]
    pub fn find_player(&self) -> Option<Position> {
        self.iter()
            .find(|(_, cell)| cell.has_player())
            .map(|(pos, _)| pos)
    }

    /// Returns `true` if no box rests off a goal.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_box())
    }

    /// Computes the canonical signature of this board.
    ///
    /// The signature is the concatenation of every cell symbol in row-major
    /// order. Two boards with equal signatures are indistinguishable to the
    /// search, regardless of how they were reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use sokoban_core::Board;
    ///
    /// let board: Board = "#@$.#".parse()?;
    /// assert_eq!(board.signature().as_str(), "#@$.#");
    /// # Ok::<(), sokoban_core::LevelError>(())
    /// ```
    #[must_use]
    pub fn signature(&self) -> BoardSignature {
        BoardSignature(self.cells.iter().map(|cell| cell.symbol()).collect())
    }

    /// Renders the static layer (walls, goals, floor) as rows of symbols.
    #[must_use]
    pub fn static_layer(&self) -> Vec<String> {
        self.render_rows(|cell| {
            let tile = match cell {
                Cell::Wall => StaticTile::Wall,
                cell if cell.is_goal_floor() => StaticTile::Goal,
                _ => StaticTile::Empty,
            };
            tile.symbol()
        })
    }

    /// Renders the dynamic layer (player, boxes) as rows of symbols.
    #[must_use]
    pub fn dynamic_layer(&self) -> Vec<String> {
        self.render_rows(|cell| {
            let tile = if cell.has_player() {
                DynamicTile::Player
            } else if cell.has_box() {
                DynamicTile::Box
            } else {
                DynamicTile::Empty
            };
            tile.symbol()
        })
    }

    fn render_rows(&self, symbol: impl Fn(Cell) -> char) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&cell| symbol(cell)).collect())
            .collect()
    }

    fn index_of(&self, pos: Position) -> usize {
        pos.row() * self.width + pos.col()
    }

    fn check_single_player(&self) -> Result<(), LevelError> {
        let mut players = self
            .iter()
            .filter(|(_, cell)| cell.has_player())
            .map(|(pos, _)| pos);
        let first = players.next().ok_or(LevelError::MissingPlayer)?;
        if let Some(second) = players.next() {
            return Err(LevelError::MultiplePlayers { first, second });
        }
        Ok(())
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    fn index(&self, pos: Position) -> &Self::Output {
        assert!(self.contains(pos), "position {pos} outside board");
        &self.cells[self.index_of(pos)]
    }
}

impl IndexMut<Position> for Board {
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        assert!(self.contains(pos), "position {pos} outside board");
        let index = self.index_of(pos);
        &mut self.cells[index]
    }
}

impl FromStr for Board {
    type Err = LevelError;

    /// Parses a merged XSB grid.
    ///
    /// Blank leading and trailing lines are dropped, the indentation common to
    /// all remaining lines is removed, and short rows are padded with
    /// [`Cell::Empty`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(|line| line.trim_end_matches('\r')).collect();
        let first = lines.iter().position(|line| !line.trim().is_empty());
        let last = lines.iter().rposition(|line| !line.trim().is_empty());
        let lines = match (first, last) {
            (Some(first), Some(last)) => &lines[first..=last],
            _ => &[][..],
        };
        let indent = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0);
        let rows: Vec<&str> = lines
            .iter()
            .map(|line| line.get(indent..).unwrap_or(""))
            .collect();

        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(LevelError::EmptyLevel { width, height });
        }

        let mut cells = vec![Cell::Empty; width * height];
        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let position = Position::new(row, col);
                cells[row * width + col] =
                    Cell::from_symbol(symbol).ok_or(LevelError::UnrecognizedSymbol {
                        layer: Layer::Merged,
                        position,
                        symbol,
                    })?;
            }
        }

        let board = Self {
            width,
            height,
            cells,
        };
        board.check_single_player()?;
        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

/// The canonical, path-independent encoding of a [`Board`].
///
/// Used as the key of the explored-state set during a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct BoardSignature(String);

impl BoardSignature {
    /// Returns the signature as a string of cell symbols.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_layer<S, T>(
    width: usize,
    height: usize,
    layer: Layer,
    rows: &[S],
    parse: impl Fn(char) -> Option<T>,
) -> Result<Vec<T>, LevelError>
where
    S: AsRef<str>,
{
    let mismatch = |row, found| LevelError::DimensionMismatch {
        layer,
        expected_rows: height,
        expected_columns: width,
        row,
        found,
    };
    if rows.len() != height {
        return Err(mismatch(height, rows.len()));
    }

    let mut tiles = Vec::with_capacity(width * height);
    for (row, line) in rows.iter().enumerate() {
        let line = line.as_ref();
        let found = line.chars().count();
        if found != width {
            return Err(mismatch(row, found));
        }
        for (col, symbol) in line.chars().enumerate() {
            let position = Position::new(row, col);
            let tile = parse(symbol).ok_or(LevelError::UnrecognizedSymbol {
                layer,
                position,
                symbol,
            })?;
            tiles.push(tile);
        }
    }
    Ok(tiles)
}
