//! Successor generation under push rules.

use sokoban_core::{Board, Direction, Position};

use crate::{ExploredLedger, deadlock, heuristic::Evaluator};

/// Applies one player move to a copy of `board`.
///
/// The move is legal when the destination is not a wall and, if the
/// destination holds a box, the cell beyond it is free of walls and boxes.
/// On a push the box lands as [`Cell::BoxOnGoal`] or [`Cell::Box`] depending on
/// the floor beneath it, and every cell keeps its goal marking as the player
/// and box move across it.
///
/// Returns the new board and the player's new position, or `None` if the move
/// is illegal. `board` itself is never modified.
///
/// [`Cell::BoxOnGoal`]: sokoban_core::Cell::BoxOnGoal
/// [`Cell::Box`]: sokoban_core::Cell::Box
///
/// # Examples
///
/// ```
/// use sokoban_core::{Board, Cell, Direction, Position};
/// use sokoban_solver::movegen::apply_move;
///
/// let board: Board = "#@$.#".parse()?;
/// let player = Position::new(0, 1);
///
/// let (next, player) = apply_move(&board, player, Direction::Right).unwrap();
/// assert_eq!(next.to_string(), "# @*#");
/// assert_eq!(player, Position::new(0, 2));
///
/// // The box is now against the wall.
/// assert!(apply_move(&next, player, Direction::Right).is_none());
/// # Ok::<(), sokoban_core::LevelError>(())
/// ```
#[must_use]
pub fn apply_move(
    board: &Board,
    player: Position,
    direction: Direction,
) -> Option<(Board, Position)> {
    let here = board.get(player)?;
    let target = player.step(direction)?;
    let target_cell = board.get(target)?;
    if target_cell.is_wall() {
        return None;
    }

    let pushed = if target_cell.has_box() {
        let beyond = target.step(direction)?;
        let beyond_cell = board.get(beyond)?;
        if beyond_cell.blocks_box() {
            return None;
        }
        Some((beyond, beyond_cell))
    } else {
        None
    };

    let mut next = board.clone();
    if let Some((beyond, beyond_cell)) = pushed {
        next[beyond] = beyond_cell.with_box();
    }
    next[target] = target_cell.with_player();
    next[player] = here.vacated();
    Some((next, target))
}

/// A live child state produced by [`MoveGenerator::expand`].
#[derive(Debug, Clone)]
pub struct Successor {
    /// The board after the move.
    pub board: Board,
    /// The player's position after the move.
    pub player: Position,
    /// The move that produced this state.
    pub action: Direction,
    /// The heuristic score of `board`.
    pub heuristic: usize,
}

/// The result of expanding one state.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Children that are new and not deadlocked, in generation order.
    pub children: Vec<Successor>,
    /// Legal moves whose resulting board had already been recorded.
    pub duplicates: usize,
    /// Legal, previously unseen moves that produced a deadlocked board.
    pub deadlocks: usize,
}

/// Generates successor states in the fixed order Up, Down, Left, Right.
///
/// Each candidate's signature is checked against the [`ExploredLedger`] and
/// recorded at once, before the deadlock check. A deadlocked candidate is
/// therefore dropped from the result but stays recorded, and later
/// duplicates of it are skipped without being examined again.
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'a> {
    evaluator: &'a Evaluator,
}

impl<'a> MoveGenerator<'a> {
    /// Creates a generator that scores children with `evaluator`.
    #[must_use]
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Self { evaluator }
    }

    /// Expands the state `(board, player)`.
    pub fn expand(
        &self,
        board: &Board,
        player: Position,
        ledger: &mut ExploredLedger,
    ) -> Expansion {
        let mut expansion = Expansion::default();
        for action in Direction::ALL {
            let Some((board, player)) = apply_move(board, player, action) else {
                continue;
            };
            if !ledger.record(board.signature()) {
                expansion.duplicates += 1;
                continue;
            }
            if deadlock::is_deadlocked(&board.box_positions(), &board) {
                expansion.deadlocks += 1;
                continue;
            }
            let heuristic = self.evaluator.evaluate(&board);
            expansion.children.push(Successor {
                board,
                player,
                action,
                heuristic,
            });
        }
        expansion
    }
}

#[cfg(test)]
mod tests {
    use sokoban_core::Cell;

    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn step(s: &str, direction: Direction) -> Option<String> {
        let b = board(s);
        let player = b.find_player().unwrap();
        apply_move(&b, player, direction).map(|(next, _)| next.to_string())
    }

    #[test]
    fn test_walk_onto_and_off_goal() {
        assert_eq!(step("#@.#", Direction::Right).as_deref(), Some("# +#"));
        assert_eq!(step("#+ #", Direction::Right).as_deref(), Some("#.@#"));
    }

    #[test]
    fn test_walls_block_the_player() {
        assert_eq!(step("#@ #", Direction::Left), None);
        assert_eq!(step("#@ #", Direction::Up), None);
    }

    #[test]
    fn test_push_box_onto_and_off_goal() {
        assert_eq!(step("#@$. #", Direction::Right).as_deref(), Some("# @* #"));
        assert_eq!(step("#@*  #", Direction::Right).as_deref(), Some("# +$ #"));
        assert_eq!(step("#+*. #", Direction::Right).as_deref(), Some("#.+* #"));
    }

    #[test]
    fn test_push_blocked_by_wall_or_box() {
        assert_eq!(step("#@$#", Direction::Right), None);
        assert_eq!(step("#@$$ #", Direction::Right), None);
        assert_eq!(step("#@$* #", Direction::Right), None);
    }

    #[test]
    fn test_vertical_push() {
        let b = board(
            "
            ###
            #.#
            #$#
            #@#
            ###
            ",
        );
        let (next, player) = apply_move(&b, Position::new(3, 1), Direction::Up).unwrap();
        assert_eq!(player, Position::new(2, 1));
        assert_eq!(next[Position::new(1, 1)], Cell::BoxOnGoal);
        assert_eq!(next[Position::new(2, 1)], Cell::Player);
        assert_eq!(next[Position::new(3, 1)], Cell::Empty);
    }

    #[test]
    fn test_open_edge_acts_as_wall() {
        assert_eq!(step("@ ", Direction::Left), None);
        assert_eq!(step(" @$", Direction::Right), None);
    }

    #[test]
    fn test_source_board_is_untouched() {
        let b = board("#@$ .#");
        let before = b.clone();
        let _ = apply_move(&b, Position::new(0, 1), Direction::Right);
        assert_eq!(b, before);
    }

    #[test]
    fn test_expand_generates_in_direction_order() {
        let b = board(
            "
            #####
            #   #
            # @ #
            #  .#
            #####
            ",
        );
        let evaluator = Evaluator::new(&b);
        let mut ledger = ExploredLedger::new();
        ledger.record(b.signature());

        let expansion = MoveGenerator::new(&evaluator).expand(&b, Position::new(2, 2), &mut ledger);
        let actions: Vec<_> = expansion.children.iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
        assert_eq!(ledger.len(), 5);
        assert!(expansion.children.iter().all(|c| c.heuristic == 0));
    }

    #[test]
    fn test_expand_skips_recorded_states() {
        let b = board("#@ .#");
        let evaluator = Evaluator::new(&b);
        let generator = MoveGenerator::new(&evaluator);
        let mut ledger = ExploredLedger::new();

        let first = generator.expand(&b, Position::new(0, 1), &mut ledger);
        assert_eq!(first.children.len(), 1);
        let child = &first.children[0];
        assert!(ledger.contains(&child.board.signature()));

        let again = generator.expand(&b, Position::new(0, 1), &mut ledger);
        assert!(again.children.is_empty());
        assert_eq!(again.duplicates, 1);
    }

    #[test]
    fn test_expand_records_but_drops_deadlocks() {
        let b = board(
            "
            #####
            #   #
            # $ #
            # @.#
            #####
            ",
        );
        let evaluator = Evaluator::new(&b);
        let generator = MoveGenerator::new(&evaluator);
        let mut ledger = ExploredLedger::new();

        let expansion = generator.expand(&b, Position::new(3, 2), &mut ledger);
        // Pushing the box up wedges it against the top wall but not in a
        // corner; left and right are plain walks.
        let actions: Vec<_> = expansion.children.iter().map(|c| c.action).collect();
        assert_eq!(actions, [Direction::Up, Direction::Left, Direction::Right]);
        assert_eq!(expansion.deadlocks, 0);

        let cornered = board(
            "
            ####
            #  #
            #$ #
            #@.#
            ####
            ",
        );
        let expansion = generator.expand(&cornered, Position::new(3, 1), &mut ledger);
        assert!(expansion.children.iter().all(|c| c.action != Direction::Up));
        assert_eq!(expansion.deadlocks, 1);
        let (pushed, _) = apply_move(&cornered, Position::new(3, 1), Direction::Up).unwrap();
        assert!(ledger.contains(&pushed.signature()));

        let again = generator.expand(&cornered, Position::new(3, 1), &mut ledger);
        assert_eq!(again.deadlocks, 0);
        assert_eq!(again.duplicates, 2);
    }
}
