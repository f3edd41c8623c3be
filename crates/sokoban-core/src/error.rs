use crate::Position;

/// Identifies one of the two input layers of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Layer {
    /// Walls, goals and floor.
    #[display("static")]
    Static,
    /// Player and boxes.
    #[display("dynamic")]
    Dynamic,
    /// A single XSB grid holding both layers.
    #[display("merged")]
    Merged,
}

/// Errors produced while building a [`Board`](crate::Board) from level input.
///
/// All of these are detected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LevelError {
    /// The level has zero rows or zero columns.
    #[display("level must be at least 1x1, got {width}x{height}")]
    EmptyLevel {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },
    /// A layer does not match the declared dimensions.
    #[display(
        "{layer} layer does not match {expected_columns}x{expected_rows}: row {row} has {found} cells"
    )]
    DimensionMismatch {
        /// The offending layer.
        layer: Layer,
        /// Declared height.
        expected_rows: usize,
        /// Declared width.
        expected_columns: usize,
        /// The first mismatching row; equals `expected_rows` when the row count itself is wrong.
        row: usize,
        /// Number of cells found in that row, or number of rows found.
        found: usize,
    },
    /// A symbol outside the layer's vocabulary.
    #[display("unrecognized symbol {symbol:?} in {layer} layer at {position}")]
    UnrecognizedSymbol {
        /// The layer containing the symbol.
        layer: Layer,
        /// Where the symbol was found.
        position: Position,
        /// The offending symbol.
        symbol: char,
    },
    /// The dynamic layer places the player or a box on a wall.
    #[display("player or box placed on a wall at {position}")]
    ItemOnWall {
        /// The conflicting position.
        position: Position,
    },
    /// No player marker was found.
    #[display("level has no player")]
    MissingPlayer,
    /// More than one player marker was found.
    #[display("level has more than one player: {first} and {second}")]
    MultiplePlayers {
        /// The first player found in row-major order.
        first: Position,
        /// The second player found in row-major order.
        second: Position,
    },
}

/// A character that is not one of the move symbols `u`, `d`, `l`, `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognized move symbol {symbol:?}")]
pub struct ParseDirectionError {
    pub(crate) symbol: char,
}

impl ParseDirectionError {
    /// Returns the rejected character.
    #[must_use]
    pub fn symbol(&self) -> char {
        self.symbol
    }
}
