//! Exhaustive minimax search over the full game tree.
//!
//! The search recurses to terminal positions and backs values up without
//! pruning, memoization, or depth limits. The tree is small enough
//! (under 550,000 nodes from the empty board) that exactness is cheaper
//! than cleverness, and an unpruned search makes the move ordering and
//! tie-breaking fully deterministic.

use serde::{Deserialize, Serialize};

use crate::{Board, Move, Player, Result};

/// The value of a position together with the move that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Game value under perfect play from both sides, from X's
    /// perspective: +1, -1, or 0.
    pub value: i32,
    /// An optimal move for the player to move, or `None` on a terminal
    /// position.
    pub best_move: Option<Move>,
}

/// Evaluate a position under perfect play.
///
/// On a terminal position the value is the position's utility and there is
/// no move to report. Otherwise the player to move is taken from the board
/// itself: X maximizes the value, O minimizes it. Candidate moves are
/// examined in row-major order and the reported move is replaced only on a
/// strict improvement, so among equally good moves the earliest one wins.
/// Two calls on equal boards return identical results.
///
/// # Errors
///
/// Propagates any error from applying a candidate move; on boards produced
/// by this crate's own transitions that cannot happen.
///
/// # Examples
///
/// ```
/// use oxo::{Board, Move, search};
///
/// // X completes the top row rather than anything slower.
/// let board = Board::from_string("XX.OO....").unwrap();
/// let result = search::evaluate(&board).unwrap();
/// assert_eq!(result.value, 1);
/// assert_eq!(result.best_move, Some(Move::new(0, 2)));
/// ```
pub fn evaluate(board: &Board) -> Result<SearchResult> {
    if board.is_terminal() {
        return Ok(SearchResult {
            value: board.utility()?,
            best_move: None,
        });
    }

    let maximizing = board.to_move() == Player::X;
    let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for mv in board.legal_moves() {
        let child = board.make_move(mv)?;
        let value = evaluate(&child)?.value;
        let improves = if maximizing {
            value > best_value
        } else {
            value < best_value
        };
        if improves {
            best_value = value;
            best_move = Some(mv);
        }
    }

    Ok(SearchResult {
        value: best_value,
        best_move,
    })
}

/// An optimal move for the player to move, or `None` on a terminal
/// position.
///
/// # Errors
///
/// Propagates any error from [`evaluate`].
pub fn best_move(board: &Board) -> Result<Option<Move>> {
    Ok(evaluate(board)?.best_move)
}

/// Evaluate every legal move of a position, in row-major order.
///
/// Each pair holds a move and the perfect-play value of the position it
/// leads to. Empty on a terminal position.
///
/// # Errors
///
/// Propagates any error from applying a candidate move.
pub fn evaluate_moves(board: &Board) -> Result<Vec<(Move, i32)>> {
    let mut evaluations = Vec::new();
    for mv in board.legal_moves() {
        let child = board.make_move(mv)?;
        evaluations.push((mv, evaluate(&child)?.value));
    }
    Ok(evaluations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_winning_row() {
        let board = Board::from_string("XX.OO....").unwrap();
        assert_eq!(board.to_move(), Player::X);

        let result = evaluate(&board).unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.best_move, Some(Move::new(0, 2)));
    }

    #[test]
    fn test_double_threat_outweighs_immediate_win() {
        // X to move with O holding the top row minus a cell. Playing (0, 2)
        // both blocks O and forks: the middle row and the anti-diagonal
        // cannot both be defended. It comes before the immediate win at
        // (1, 2) in row-major order, and wins just the same.
        let board = Board::from_string("OO.XX....").unwrap();
        assert_eq!(board.to_move(), Player::X);

        let result = evaluate(&board).unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.best_move, Some(Move::new(0, 2)));
    }

    #[test]
    fn test_minimizer_completes_winning_row() {
        // Same shape with O to move: O finishes its top row.
        let board = Board::from_string("OO.XX.X..").unwrap();
        assert_eq!(board.to_move(), Player::O);

        let result = evaluate(&board).unwrap();
        assert_eq!(result.value, -1);
        assert_eq!(result.best_move, Some(Move::new(0, 2)));

        let after = board.make_move(Move::new(0, 2)).unwrap();
        assert!(after.is_terminal());
        assert_eq!(after.utility().unwrap(), -1);
    }

    #[test]
    fn test_first_of_equal_wins_is_reported() {
        // Both (2, 0) and (2, 2) complete a diagonal for X; the earlier
        // cell in row-major order is the one reported.
        let board = Board::from_string("XOXOXO...").unwrap();
        assert_eq!(board.to_move(), Player::X);

        let result = evaluate(&board).unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.best_move, Some(Move::new(2, 0)));
    }

    #[test]
    fn test_terminal_position_has_no_move() {
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(board.is_terminal());

        let result = evaluate(&board).unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.best_move, None);
        assert_eq!(best_move(&board).unwrap(), None);
        assert!(evaluate_moves(&board).unwrap().is_empty());
    }

    #[test]
    fn test_drawn_full_board_has_no_move() {
        let board = Board::from_string("XOXXOXOXO").unwrap();
        assert!(board.is_terminal());
        assert_eq!(board.winner(), None);

        let result = evaluate(&board).unwrap();
        assert_eq!(result.value, 0);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_forced_block() {
        // O threatens the top row; X has no win of its own and every move
        // except the block loses.
        let board = Board::from_string("OO..X..X.").unwrap();
        assert_eq!(board.to_move(), Player::X);

        let result = evaluate(&board).unwrap();
        assert_eq!(result.value, 0);
        assert_eq!(result.best_move, Some(Move::new(0, 2)));
    }

    #[test]
    fn test_evaluate_moves_row_major_values() {
        let board = Board::from_string("XX.OO....").unwrap();
        let evaluations = evaluate_moves(&board).unwrap();

        assert_eq!(
            evaluations,
            vec![
                (Move::new(0, 2), 1),
                (Move::new(1, 2), 0),
                (Move::new(2, 0), -1),
                (Move::new(2, 1), -1),
                (Move::new(2, 2), -1),
            ]
        );
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let board = Board::from_string("X...O....").unwrap();
        let first = evaluate(&board).unwrap();
        let second = evaluate(&board).unwrap();
        assert_eq!(first, second);
    }
}
