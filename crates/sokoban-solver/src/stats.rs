/// Counters collected during one search.
///
/// # Examples
///
/// ```
/// use sokoban_solver::Solver;
///
/// let (solution, stats) = Solver::default().solve_with_stats(
///     6,
///     3,
///     &["######", "#   .#", "######"],
///     &["      ", " @$   ", "      "],
/// )?;
/// assert_eq!(solution.to_string(), "rr");
/// assert!(stats.expansions() >= 3);
/// # Ok::<(), sokoban_solver::SolveError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub(crate) expansions: usize,
    pub(crate) generated: usize,
    pub(crate) duplicates: usize,
    pub(crate) deadlocks: usize,
    pub(crate) max_frontier: usize,
}

impl SearchStats {
    /// Returns the number of nodes expanded, the root included.
    #[must_use]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Returns the number of live children added to the frontier.
    #[must_use]
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Returns the number of legal moves dropped because their board had been seen.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Returns the number of new boards dropped as deadlocked.
    #[must_use]
    pub fn deadlocks(&self) -> usize {
        self.deadlocks
    }

    /// Returns the largest frontier size observed.
    #[must_use]
    pub fn max_frontier(&self) -> usize {
        self.max_frontier
    }
}
