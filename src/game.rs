//! A game in progress: a starting position plus the moves played so far

use serde::{Deserialize, Serialize};

use crate::agents::Agent;
use crate::{Board, Error, Move, Outcome, Player, Result};

/// A record of a game from some starting position.
///
/// The record owns the move list, so any intermediate position can be
/// reconstructed; the current position is kept alongside to avoid replaying
/// on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    initial: Board,
    current: Board,
    moves: Vec<Move>,
}

impl Game {
    /// Start a game from the empty board
    pub fn new() -> Self {
        Self::from_position(Board::new())
    }

    /// Start a game from an arbitrary position.
    ///
    /// The position may already be terminal; [`play`] then rejects every
    /// move.
    ///
    /// [`play`]: Game::play
    pub fn from_position(board: Board) -> Self {
        Game {
            initial: board,
            current: board,
            moves: Vec::new(),
        }
    }

    /// Play a move for whichever player is to move and return the new
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the game has already ended, or the
    /// underlying transition error for an out-of-range or occupied cell.
    pub fn play(&mut self, mv: Move) -> Result<Board> {
        if self.current.is_terminal() {
            return Err(Error::GameOver);
        }
        let next = self.current.make_move(mv)?;
        self.current = next;
        self.moves.push(mv);
        Ok(next)
    }

    /// The position after all recorded moves
    pub fn current_state(&self) -> Board {
        self.current
    }

    /// The position the game started from
    pub fn initial_state(&self) -> Board {
        self.initial
    }

    /// The moves played so far, in order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn is_over(&self) -> bool {
        self.current.is_terminal()
    }

    /// The outcome, once the game has ended
    pub fn outcome(&self) -> Option<Outcome> {
        self.current.outcome().ok()
    }

    /// Every position the game passed through, from the starting position
    /// to the current one.
    ///
    /// # Errors
    ///
    /// Replays the recorded moves; since they were validated when played,
    /// an error here indicates a corrupted record.
    pub fn state_sequence(&self) -> Result<Vec<Board>> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut board = self.initial;
        states.push(board);
        for &mv in &self.moves {
            board = board.make_move(mv)?;
            states.push(board);
        }
        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Play a full game between two agents, X moving first, and return the
/// completed record.
///
/// # Errors
///
/// Propagates agent failures and transition errors, including an agent
/// returning an occupied cell.
pub fn play_game(x_agent: &mut dyn Agent, o_agent: &mut dyn Agent) -> Result<Game> {
    play_game_from(Board::new(), x_agent, o_agent)
}

/// Play a game to completion from an arbitrary starting position.
///
/// # Errors
///
/// Propagates agent failures and transition errors.
pub fn play_game_from(
    board: Board,
    x_agent: &mut dyn Agent,
    o_agent: &mut dyn Agent,
) -> Result<Game> {
    let mut game = Game::from_position(board);
    while !game.is_over() {
        let state = game.current_state();
        let mv = match state.to_move() {
            Player::X => x_agent.select_move(&state)?,
            Player::O => o_agent.select_move(&state)?,
        };
        game.play(mv)?;
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RandomAgent;

    #[test]
    fn test_play_records_moves_and_alternates() {
        let mut game = Game::new();
        assert_eq!(game.current_state().to_move(), Player::X);

        game.play(Move::new(1, 1)).unwrap();
        game.play(Move::new(0, 0)).unwrap();
        game.play(Move::new(2, 2)).unwrap();

        assert_eq!(game.move_count(), 3);
        assert_eq!(
            game.moves(),
            &[Move::new(1, 1), Move::new(0, 0), Move::new(2, 2)]
        );
        assert_eq!(game.current_state().to_move(), Player::O);
        assert!(!game.is_over());
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_play_rejects_moves_after_game_over() {
        let mut game = Game::new();
        for mv in [
            Move::new(0, 0),
            Move::new(1, 0),
            Move::new(0, 1),
            Move::new(1, 1),
            Move::new(0, 2),
        ] {
            game.play(mv).unwrap();
        }

        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::Win(Player::X)));
        assert!(matches!(game.play(Move::new(2, 2)), Err(Error::GameOver)));
    }

    #[test]
    fn test_play_propagates_illegal_moves() {
        let mut game = Game::new();
        game.play(Move::new(0, 0)).unwrap();

        assert!(matches!(
            game.play(Move::new(0, 0)),
            Err(Error::IllegalMove { .. })
        ));
        assert!(matches!(
            game.play(Move::new(0, 3)),
            Err(Error::OutOfRange { .. })
        ));
        // The failed attempts left no trace.
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_from_position_continues_midgame() {
        let board = Board::from_string("XX.OO....").unwrap();
        let mut game = Game::from_position(board);

        game.play(Move::new(0, 2)).unwrap();
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(Outcome::Win(Player::X)));
        assert_eq!(game.initial_state(), board);
    }

    #[test]
    fn test_state_sequence_replays_history() {
        let mut game = Game::new();
        game.play(Move::new(0, 0)).unwrap();
        game.play(Move::new(1, 1)).unwrap();

        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], Board::new());
        assert_eq!(states[2], game.current_state());
    }

    #[test]
    fn test_play_game_reaches_terminal() {
        let mut x_agent = RandomAgent::with_seed(11);
        let mut o_agent = RandomAgent::with_seed(23);

        let game = play_game(&mut x_agent, &mut o_agent).unwrap();
        assert!(game.is_over());
        assert!(game.move_count() >= 5 && game.move_count() <= 9);
        assert!(game.outcome().is_some());
    }
}
