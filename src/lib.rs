//! oxo: a perfect-play tic-tac-toe engine
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe board implementation with validation
//! - Exhaustive minimax search with deterministic tie-breaking
//! - Move-selecting agents and game records
//! - Game-tree enumeration and statistics
//!
//! The board carries no turn marker: whose move it is follows from the mark
//! counts alone, so every board value stands on its own.
//!
//! ```
//! use oxo::{Board, Move, Player, search};
//!
//! let board = Board::new().make_move(Move::new(1, 1))?;
//! assert_eq!(board.to_move(), Player::O);
//!
//! let result = search::evaluate(&board)?;
//! assert_eq!(result.value, 0);
//! # Ok::<(), oxo::Error>(())
//! ```

pub mod agents;
pub mod board;
pub mod cli;
pub mod error;
pub mod game;
pub mod lines;
pub mod search;
pub mod tree;

pub use board::{Board, Cell, Move, Outcome, Player};
pub use error::{Error, Result};
pub use game::{Game, play_game, play_game_from};
pub use search::{SearchResult, best_move, evaluate, evaluate_moves};
