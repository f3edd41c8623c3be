//! Core data structures for Sokoban solving.
//!
//! This crate models a single Sokoban configuration and the vocabulary used to
//! describe it. It knows nothing about searching; the solver crate builds on
//! these types.
//!
//! # Overview
//!
//! - [`cell`]: the closed set of cell contents ([`Cell`]) plus the static and
//!   dynamic input layer tiles ([`StaticTile`], [`DynamicTile`])
//! - [`position`]: `(row, column)` coordinates ([`Position`]) and the four
//!   player moves ([`Direction`])
//! - [`board`]: the grid itself ([`Board`]) and its canonical signature
//!   ([`BoardSignature`])
//!
//! # Examples
//!
//! ```
//! use sokoban_core::{Board, Cell, Direction, Position};
//!
//! let board = Board::from_layers(
//!     6,
//!     3,
//!     &["######", "#   .#", "######"],
//!     &["      ", " @$   ", "      "],
//! )?;
//!
//! let player = board.find_player().unwrap();
//! assert_eq!(board.neighbor(player, Direction::Right), Cell::Box);
//! assert_eq!(board.goal_positions(), [Position::new(1, 4)]);
//! # Ok::<(), sokoban_core::LevelError>(())
//! ```

pub mod board;
pub mod cell;
mod error;
pub mod position;

pub use self::{
    board::{Board, BoardSignature},
    cell::{Cell, DynamicTile, StaticTile},
    error::{Layer, LevelError, ParseDirectionError},
    position::{Direction, Position},
};
