//! Greedy best-first Sokoban solving.
//!
//! Given a level as a static layer (walls, goals) and a dynamic layer (player,
//! boxes), [`solve`] returns a move sequence that pushes every box onto a goal.
//!
//! # Overview
//!
//! - [`movegen`]: legal moves under push rules and successor generation
//! - [`heuristic`]: the distance-to-solution estimate that orders the search
//! - [`deadlock`]: wall-pattern checks that prune hopeless states
//! - [`ExploredLedger`]: board signatures already seen in this search
//! - [`search`]: the search tree, frontier and greedy best-first driver
//! - [`Solution`]: the reconstructed move sequence
//!
//! The search always expands the lowest-scoring state next and ignores path
//! length, so solutions are valid but usually not the shortest. It stops when
//! it expands a solved board, when no unexplored state is left, or when the
//! [`SearchLimits`] run out.
//!
//! # Examples
//!
//! ```
//! use sokoban_core::Board;
//! use sokoban_solver::{Solver, replay};
//!
//! let board: Board = "
//! ########
//! #      #
//! # @$ . #
//! #      #
//! ########
//! ".parse()?;
//!
//! let (solution, _stats) = Solver::default().solve_board(&board)?;
//! let end = replay(&board, solution.moves()).unwrap();
//! assert!(end.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{error::*, explored::*, limits::*, solution::*, solver::*, stats::*};

pub mod deadlock;
mod error;
mod explored;
pub mod heuristic;
mod limits;
pub mod movegen;
pub mod search;
mod solution;
mod solver;
mod stats;

#[cfg(test)]
mod testing;
