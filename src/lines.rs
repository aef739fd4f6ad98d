//! Winning line scans over the 3x3 grid

use crate::board::{Cell, Player};

/// The eight winning lines as row-major cell indices, scanned in a fixed
/// order: rows first, then columns, then the two diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Find the first completed line in scan order, if any.
///
/// A board produced by alternating play can hold completed lines for at most
/// one player, so the scan order is only observable on fabricated grids.
pub fn winning_line(cells: &[Cell; 9]) -> Option<[usize; 3]> {
    WINNING_LINES.into_iter().find(|line| {
        let first = cells[line[0]];
        first != Cell::Empty && line.iter().all(|&idx| cells[idx] == first)
    })
}

/// The player occupying the first completed line, if any.
pub fn winner_on(cells: &[Cell; 9]) -> Option<Player> {
    winning_line(cells).and_then(|line| cells[line[0]].player())
}

/// Check whether a player occupies all three cells of some line.
pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
    let target = player.mark();
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&idx| cells[idx] == target))
}

/// Human-readable name of a winning line, for result reporting.
pub fn line_name(line: [usize; 3]) -> &'static str {
    match line {
        [0, 1, 2] => "top row",
        [3, 4, 5] => "middle row",
        [6, 7, 8] => "bottom row",
        [0, 3, 6] => "left column",
        [1, 4, 7] => "middle column",
        [2, 5, 8] => "right column",
        [0, 4, 8] => "main diagonal",
        [2, 4, 6] => "anti-diagonal",
        _ => "line",
    }
}
