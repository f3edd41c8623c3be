use std::time::Duration;

use sokoban_core::LevelError;

/// Errors that can occur while solving a level.
///
/// Every failure mode of a solve call surfaces as one of these variants; the
/// search never panics or loops forever on bad or unsolvable input.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum SolveError {
    /// The input layers were rejected before the search started.
    #[display("invalid level: {_0}")]
    InvalidLevel(#[from] LevelError),
    /// The frontier ran dry: no sequence of legal moves reaches a solved board.
    #[display("level has no solution")]
    Unsolvable,
    /// The expansion ceiling or the wall-clock limit was reached first.
    #[display("search budget exhausted after {expansions} expansions in {elapsed:?}")]
    BudgetExhausted {
        /// Number of nodes expanded before giving up.
        expansions: usize,
        /// Time spent searching.
        elapsed: Duration,
    },
}
