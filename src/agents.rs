//! Move-selecting agents for driving games

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::{Board, Error, Move, Result, search};

/// Something that can pick a move in a position.
///
/// Selection takes `&mut self` so stateful agents (a seeded RNG, say) fit
/// the same trait as stateless ones.
pub trait Agent {
    /// Pick a move for the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the position is terminal.
    fn select_move(&mut self, board: &Board) -> Result<Move>;

    fn name(&self) -> &str;
}

/// Plays perfectly by searching the full game tree on every move.
///
/// Deterministic: the same position always yields the same move, and the
/// agent never loses from any position that is not already lost.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleAgent;

impl OracleAgent {
    pub fn new() -> Self {
        OracleAgent
    }
}

impl Agent for OracleAgent {
    fn select_move(&mut self, board: &Board) -> Result<Move> {
        search::best_move(board)?.ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "oracle"
    }
}

/// Picks uniformly among the legal moves.
#[derive(Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create an agent whose move sequence is reproducible from the seed
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board) -> Result<Move> {
        board
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_takes_immediate_win() {
        let board = Board::from_string("XX.OO....").unwrap();
        let mv = OracleAgent::new().select_move(&board).unwrap();
        assert_eq!(mv, Move::new(0, 2));
    }

    #[test]
    fn test_oracle_blocks_opponent_threat() {
        let board = Board::from_string("OO..X..X.").unwrap();
        let mv = OracleAgent::new().select_move(&board).unwrap();
        assert_eq!(mv, Move::new(0, 2));
    }

    #[test]
    fn test_oracle_rejects_terminal_position() {
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(
            OracleAgent::new().select_move(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_random_agent_is_reproducible() {
        let board = Board::from_string("X...O....").unwrap();

        let mut first = RandomAgent::with_seed(42);
        let mut second = RandomAgent::with_seed(42);
        for _ in 0..5 {
            assert_eq!(
                first.select_move(&board).unwrap(),
                second.select_move(&board).unwrap()
            );
        }
    }

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let board = Board::from_string("XOXOXO...").unwrap();
        let legal = board.legal_moves();

        let mut agent = RandomAgent::with_seed(7);
        for _ in 0..20 {
            let mv = agent.select_move(&board).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_random_agent_rejects_terminal_position() {
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(
            RandomAgent::with_seed(1).select_move(&board),
            Err(Error::NoValidMoves)
        ));
    }
}
