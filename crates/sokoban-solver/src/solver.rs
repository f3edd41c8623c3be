use sokoban_core::{Board, Direction};

use crate::{
    SearchLimits, SearchStats, Solution, SolveError, movegen::apply_move, search::SearchDriver,
};

/// Solves a level with the default [`SearchLimits`].
///
/// `static_layer` holds walls (`#`), goals (`.`) and floor (` `, `-` or `_`);
/// `dynamic_layer` holds the player (`@`) and boxes (`$`). Both are `height`
/// rows of `width` symbols.
///
/// # Errors
///
/// - [`SolveError::InvalidLevel`] if the layers are malformed.
/// - [`SolveError::Unsolvable`] if no move sequence solves the level.
/// - [`SolveError::BudgetExhausted`] if the search hits its limits first.
///
/// # Examples
///
/// ```
/// let solution = sokoban_solver::solve(
///     6,
///     3,
///     &["######", "#   .#", "######"],
///     &["      ", " @$   ", "      "],
/// )?;
/// assert_eq!(solution.to_string(), "rr");
/// # Ok::<(), sokoban_solver::SolveError>(())
/// ```
pub fn solve<S>(
    width: usize,
    height: usize,
    static_layer: &[S],
    dynamic_layer: &[S],
) -> Result<Solution, SolveError>
where
    S: AsRef<str>,
{
    Solver::default().solve(width, height, static_layer, dynamic_layer)
}

/// Replays `moves` from `board` using the solver's push rules.
///
/// Returns the final board, or `None` if the board has no player or a move is
/// illegal.
///
/// # Examples
///
/// ```
/// use sokoban_core::{Board, Direction};
/// use sokoban_solver::replay;
///
/// let board: Board = "#@$ .#".parse()?;
/// let end = replay(&board, &[Direction::Right, Direction::Right]).unwrap();
/// assert!(end.is_solved());
/// assert!(replay(&board, &[Direction::Left]).is_none());
/// # Ok::<(), sokoban_core::LevelError>(())
/// ```
#[must_use]
pub fn replay(board: &Board, moves: &[Direction]) -> Option<Board> {
    let mut player = board.find_player()?;
    let mut current = board.clone();
    for &direction in moves {
        let (next, moved) = apply_move(&current, player, direction)?;
        current = next;
        player = moved;
    }
    Some(current)
}

/// A greedy best-first Sokoban solver.
///
/// The solver itself only carries configuration. Every call builds a fresh
/// search, so one solver can be reused across any number of levels.
///
/// # Examples
///
/// ```
/// use sokoban_core::Board;
/// use sokoban_solver::{SearchLimits, Solver};
///
/// let solver = Solver::new(SearchLimits::default().with_max_expansions(10_000));
/// let board: Board = "
/// #######
/// #@ $ .#
/// #######
/// ".parse()?;
///
/// let (solution, stats) = solver.solve_board(&board)?;
/// assert_eq!(solution.to_string(), "rrr");
/// println!("expanded {} nodes", stats.expansions());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    limits: SearchLimits,
}

impl Solver {
    /// Creates a solver with the given limits.
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    /// Returns the configured limits.
    #[must_use]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Solves a level given as static and dynamic layers.
    ///
    /// See [`solve`] for the layer format.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    pub fn solve<S>(
        &self,
        width: usize,
        height: usize,
        static_layer: &[S],
        dynamic_layer: &[S],
    ) -> Result<Solution, SolveError>
    where
        S: AsRef<str>,
    {
        let (solution, _stats) =
            self.solve_with_stats(width, height, static_layer, dynamic_layer)?;
        Ok(solution)
    }

    /// Solves a level given as layers and also returns search statistics.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    pub fn solve_with_stats<S>(
        &self,
        width: usize,
        height: usize,
        static_layer: &[S],
        dynamic_layer: &[S],
    ) -> Result<(Solution, SearchStats), SolveError>
    where
        S: AsRef<str>,
    {
        let board = Board::from_layers(width, height, static_layer, dynamic_layer)?;
        self.solve_board(&board)
    }

    /// Solves an already merged board.
    ///
    /// # Errors
    ///
    /// - [`SolveError::InvalidLevel`] if the board has no player.
    /// - [`SolveError::Unsolvable`] if there are more boxes than goals or the
    ///   frontier runs dry.
    /// - [`SolveError::BudgetExhausted`] if the search hits its limits first.
    pub fn solve_board(&self, board: &Board) -> Result<(Solution, SearchStats), SolveError> {
        let boxes = board.box_count();
        let goals = board.goal_count();
        log::debug!(
            "solving {}x{} level: boxes={boxes}, goals={goals}, limits={:?}",
            board.width(),
            board.height(),
            self.limits
        );
        if boxes > goals {
            log::debug!("level rejected: {boxes} boxes but only {goals} goals");
            return Err(SolveError::Unsolvable);
        }

        let mut driver = SearchDriver::new(board.clone(), self.limits)?;
        let result = driver.run();
        let stats = driver.stats();
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("search failed: {err}; stats={stats:?}");
                return Err(err);
            }
        };

        let solution = Solution::extract(driver.tree(), outcome.goal);
        log::debug!(
            "solved in {} moves: goal=#{}, lookahead={:?}, explored={}, stats={stats:?}",
            solution.len(),
            outcome.goal.index(),
            outcome.lookahead.map(|id| id.index()),
            driver.ledger().len()
        );
        Ok((solution, stats))
    }
}

#[cfg(test)]
mod tests {
    use sokoban_core::{Layer, LevelError, Position};

    use super::*;
    use crate::testing::SolveTester;

    #[test]
    fn test_already_solved_level_needs_no_moves() {
        SolveTester::from_str(
            "
            #####
            #@ *#
            #####
            ",
        )
        .solve()
        .assert_moves("")
        .assert_replay_solves();
    }

    #[test]
    fn test_straight_push() {
        let tester = SolveTester::from_str(
            "
            #######
            #@ $ .#
            #######
            ",
        )
        .solve()
        .assert_moves("rrr")
        .assert_replay_solves();
        assert_eq!(tester.stats().expansions(), 4);
    }

    #[test]
    fn test_walks_around_to_push() {
        SolveTester::from_str(
            "
            #######
            #     #
            # .$ @#
            #     #
            #######
            ",
        )
        .solve()
        .assert_moves("ll")
        .assert_replay_solves();
    }

    #[test]
    fn test_two_boxes() {
        let tester = SolveTester::from_str(
            "
            ########
            #      #
            # $  . #
            #  @   #
            # $  . #
            #      #
            ########
            ",
        )
        .solve()
        .assert_replay_solves();
        assert!(tester.solution().len() >= 6);
    }

    #[test]
    fn test_more_boxes_than_goals_is_unsolvable() {
        SolveTester::from_str(
            "
            #######
            #@$$ .#
            #######
            ",
        )
        .solve()
        .assert_error(&SolveError::Unsolvable);
    }

    #[test]
    fn test_unreachable_goal_is_unsolvable() {
        SolveTester::from_str(
            "
            ######
            #@ $ #
            ######
            #  . #
            ######
            ",
        )
        .solve()
        .assert_error(&SolveError::Unsolvable);
    }

    #[test]
    fn test_budget_is_reported() {
        SolveTester::from_str(
            "
            ##########
            #@       #
            #        #
            #    $   #
            #        #
            #       .#
            ##########
            ",
        )
        .with_limits(SearchLimits::unbounded().with_max_expansions(3))
        .solve()
        .assert_error_matches(|err| {
            matches!(err, SolveError::BudgetExhausted { expansions: 3, .. })
        });
    }

    #[test]
    fn test_invalid_layers_are_rejected_before_search() {
        let err = solve(3, 1, &["# #"], &[" $ "]).unwrap_err();
        assert_eq!(err, SolveError::InvalidLevel(LevelError::MissingPlayer));

        let err = solve(3, 1, &["#?#"], &[" @ "]).unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidLevel(LevelError::UnrecognizedSymbol {
                layer: Layer::Static,
                position: Position::new(0, 1),
                symbol: '?',
            })
        );
        assert!(solve(4, 1, &["#  #"], &[" @@ "]).unwrap_err().is_invalid_level());
    }

    #[test]
    fn test_solver_is_reusable_across_levels() {
        let solver = Solver::default();
        let first: Board = "#@$ .#".parse().unwrap();
        let second: Board = "#. $@#".parse().unwrap();
        let (a, _) = solver.solve_board(&first).unwrap();
        let (b, _) = solver.solve_board(&second).unwrap();
        let (a_again, _) = solver.solve_board(&first).unwrap();
        assert_eq!(a.to_string(), "rr");
        assert_eq!(b.to_string(), "ll");
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_replay_rejects_illegal_moves() {
        let board: Board = "#@$#".parse().unwrap();
        assert!(replay(&board, &[Direction::Right]).is_none());
        assert_eq!(replay(&board, &[]), Some(board));
    }
}
