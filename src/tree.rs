//! Exhaustive enumeration of the game tree.
//!
//! Games are counted by walking every move sequence, so transpositions are
//! counted once per path; positions are counted via a deduplicating
//! traversal of the reachable state graph.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{Board, Outcome, Player, Result};

/// Counts over every distinct game (move sequence) reachable from a
/// starting position.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Games keyed by the number of marks on the final board
    pub games_by_length: HashMap<usize, usize>,
}

/// Counts over every distinct position reachable from a starting position,
/// the starting position included.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PositionStats {
    pub total_positions: usize,
    pub terminal_positions: usize,
    pub x_win_positions: usize,
    pub o_win_positions: usize,
    pub draw_positions: usize,
}

/// Count every game playable from the empty board.
///
/// # Errors
///
/// Propagates transition errors; the enumeration itself only generates
/// legal moves.
pub fn game_stats() -> Result<GameStats> {
    game_stats_from(&Board::new())
}

/// Count every game playable from the given position.
///
/// A terminal starting position counts as a single already-finished game.
///
/// # Errors
///
/// Propagates transition errors.
pub fn game_stats_from(board: &Board) -> Result<GameStats> {
    let mut stats = GameStats::default();
    visit_games(board, &mut stats)?;
    Ok(stats)
}

fn visit_games(board: &Board, stats: &mut GameStats) -> Result<()> {
    if board.is_terminal() {
        stats.total_games += 1;
        match board.outcome()? {
            Outcome::Win(Player::X) => stats.x_wins += 1,
            Outcome::Win(Player::O) => stats.o_wins += 1,
            Outcome::Draw => stats.draws += 1,
        }
        let (x_count, o_count) = board.mark_counts();
        *stats.games_by_length.entry(x_count + o_count).or_insert(0) += 1;
        return Ok(());
    }

    for mv in board.legal_moves() {
        visit_games(&board.make_move(mv)?, stats)?;
    }
    Ok(())
}

/// Count every distinct position reachable from the empty board.
///
/// # Errors
///
/// Propagates transition errors.
pub fn position_stats() -> Result<PositionStats> {
    position_stats_from(&Board::new())
}

/// Count every distinct position reachable from the given position.
///
/// # Errors
///
/// Propagates transition errors.
pub fn position_stats_from(board: &Board) -> Result<PositionStats> {
    let mut stats = PositionStats::default();
    let mut seen = HashSet::new();
    let mut pending = vec![*board];
    seen.insert(*board);

    while let Some(position) = pending.pop() {
        stats.total_positions += 1;
        if position.is_terminal() {
            stats.terminal_positions += 1;
            match position.outcome()? {
                Outcome::Win(Player::X) => stats.x_win_positions += 1,
                Outcome::Win(Player::O) => stats.o_win_positions += 1,
                Outcome::Draw => stats.draw_positions += 1,
            }
            continue;
        }
        for mv in position.legal_moves() {
            let child = position.make_move(mv)?;
            if seen.insert(child) {
                pending.push(child);
            }
        }
    }

    Ok(stats)
}
