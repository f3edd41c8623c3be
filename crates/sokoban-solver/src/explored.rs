use std::collections::HashSet;

use sokoban_core::BoardSignature;

/// The set of board signatures already seen during one search.
///
/// The ledger only grows: once a signature is recorded it stays recorded until
/// the ledger is dropped at the end of the solve call. Each solve builds its
/// own ledger, so signatures never leak between levels.
///
/// # Examples
///
/// ```
/// use sokoban_core::Board;
/// use sokoban_solver::ExploredLedger;
///
/// let board: Board = "#@$.#".parse()?;
/// let mut ledger = ExploredLedger::new();
///
/// assert!(ledger.record(board.signature()));
/// assert!(!ledger.record(board.signature()));
/// assert!(ledger.contains(&board.signature()));
/// # Ok::<(), sokoban_core::LevelError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExploredLedger {
    seen: HashSet<BoardSignature>,
}

impl ExploredLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a signature.
    ///
    /// Returns `true` if it was not seen before.
    pub fn record(&mut self, signature: BoardSignature) -> bool {
        self.seen.insert(signature)
    }

    /// Returns `true` if the signature has been recorded.
    #[must_use]
    pub fn contains(&self, signature: &BoardSignature) -> bool {
        self.seen.contains(signature)
    }

    /// Returns the number of distinct signatures recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
