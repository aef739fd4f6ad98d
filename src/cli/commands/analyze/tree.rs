//! Game tree statistics
//!
//! Counts every game and every distinct position reachable from a starting
//! board.

use anyhow::Result;

use crate::cli::output::{create_spinner, format_number, print_kv, print_section, print_subsection};
use crate::{Board, tree};

/// Count games and positions from a starting position
pub fn analyze(state: Option<String>) -> Result<()> {
    let board = match &state {
        Some(s) => {
            let board = Board::from_string(s)?;
            board.validate()?;
            board
        }
        None => Board::new(),
    };

    if state.is_some() {
        print_section("Starting Position");
        println!("{board}");
    }

    let spinner = create_spinner("Enumerating games...");
    let games = tree::game_stats_from(&board)?;
    spinner.finish_and_clear();

    let spinner = create_spinner("Enumerating positions...");
    let positions = tree::position_stats_from(&board)?;
    spinner.finish_and_clear();

    print_section("Game Tree Statistics");
    let total = games.total_games.max(1) as f64;
    print_kv("Total games", &format_number(games.total_games));
    print_kv(
        "X wins",
        &format!(
            "{} ({:.1}%)",
            format_number(games.x_wins),
            games.x_wins as f64 / total * 100.0
        ),
    );
    print_kv(
        "O wins",
        &format!(
            "{} ({:.1}%)",
            format_number(games.o_wins),
            games.o_wins as f64 / total * 100.0
        ),
    );
    print_kv(
        "Draws",
        &format!(
            "{} ({:.1}%)",
            format_number(games.draws),
            games.draws as f64 / total * 100.0
        ),
    );

    print_subsection("Games by length");
    let mut lengths: Vec<(&usize, &usize)> = games.games_by_length.iter().collect();
    lengths.sort();
    for (length, count) in lengths {
        println!("  Length {length}: {} games", format_number(*count));
    }

    print_subsection("Positions");
    print_kv("Reachable positions", &format_number(positions.total_positions));
    print_kv("Terminal positions", &format_number(positions.terminal_positions));
    print_kv("X-win positions", &format_number(positions.x_win_positions));
    print_kv("O-win positions", &format_number(positions.o_win_positions));
    print_kv("Draw positions", &format_number(positions.draw_positions));

    Ok(())
}
