//! Test utilities for end-to-end solver checks.
//!
//! [`SolveTester`] parses an XSB level, splits it into the two input layers,
//! runs the solver and offers chained assertions on the result.
//!
//! ```ignore
//! SolveTester::from_str("#@$ .#")
//!     .solve()
//!     .assert_moves("rr")
//!     .assert_replay_solves();
//! ```

use sokoban_core::Board;

use crate::{SearchLimits, SearchStats, Solution, SolveError, Solver, heuristic, replay};

/// A test harness that solves one level and checks the outcome.
#[derive(Debug)]
pub struct SolveTester {
    board: Board,
    limits: SearchLimits,
    result: Option<Result<(Solution, SearchStats), SolveError>>,
}

impl SolveTester {
    /// Creates a tester from a merged XSB level.
    ///
    /// # Panics
    ///
    /// Panics if the level cannot be parsed.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        Self {
            board: s.parse().unwrap(),
            limits: SearchLimits::default(),
            result: None,
        }
    }

    /// Replaces the search limits used by [`solve`](Self::solve).
    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Solves the level through the layer-based entry point.
    #[must_use]
    pub fn solve(mut self) -> Self {
        let solver = Solver::new(self.limits);
        self.result = Some(solver.solve_with_stats(
            self.board.width(),
            self.board.height(),
            &self.board.static_layer(),
            &self.board.dynamic_layer(),
        ));
        self
    }

    /// Returns the solution.
    ///
    /// # Panics
    ///
    /// Panics if the level has not been solved successfully.
    #[track_caller]
    pub fn solution(&self) -> &Solution {
        match &self.result {
            Some(Ok((solution, _))) => solution,
            Some(Err(err)) => panic!("expected a solution, got error: {err}"),
            None => panic!("solve() was not called"),
        }
    }

    /// Returns the search statistics.
    ///
    /// # Panics
    ///
    /// Panics if the level has not been solved successfully.
    #[track_caller]
    pub fn stats(&self) -> SearchStats {
        match &self.result {
            Some(Ok((_, stats))) => *stats,
            Some(Err(err)) => panic!("expected a solution, got error: {err}"),
            None => panic!("solve() was not called"),
        }
    }

    /// Asserts the exact move string.
    #[track_caller]
    pub fn assert_moves(self, expected: &str) -> Self {
        assert_eq!(self.solution().to_string(), expected);
        self
    }

    /// Asserts that replaying the solution leaves every box on a goal.
    #[track_caller]
    pub fn assert_replay_solves(self) -> Self {
        let end = replay(&self.board, self.solution().moves())
            .unwrap_or_else(|| panic!("solution {} contains an illegal move", self.solution()));
        assert!(end.is_solved(), "replay ended unsolved:\n{end}");
        assert_eq!(heuristic::heuristic(&end), 0);
        self
    }

    /// Asserts that solving failed with `expected`.
    #[track_caller]
    pub fn assert_error(self, expected: &SolveError) -> Self {
        match &self.result {
            Some(Err(err)) => assert_eq!(err, expected),
            Some(Ok((solution, _))) => panic!("expected {expected}, got solution {solution}"),
            None => panic!("solve() was not called"),
        }
        self
    }

    /// Asserts that solving failed for any reason satisfying `check`.
    #[track_caller]
    pub fn assert_error_matches(self, check: impl FnOnce(&SolveError) -> bool) -> Self {
        match &self.result {
            Some(Err(err)) => assert!(check(err), "unexpected error: {err}"),
            Some(Ok((solution, _))) => panic!("expected an error, got solution {solution}"),
            None => panic!("solve() was not called"),
        }
        self
    }
}
