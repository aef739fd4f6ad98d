//! Opening move analysis
//!
//! Evaluates each of the nine first moves under perfect play and counts
//! the outcomes of every game continuing from it.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{create_spinner, format_number, print_section, print_subsection};
use crate::{Board, search, tree};

/// Perfect-play value and exhaustive outcome counts for one opening move
#[derive(Debug, Serialize)]
pub struct OpeningRecord {
    pub row: usize,
    pub col: usize,
    pub value: i32,
    pub x_wins: usize,
    pub draws: usize,
    pub o_wins: usize,
    pub total_games: usize,
}

/// Analyze all opening moves
pub fn analyze(export: Option<PathBuf>) -> Result<()> {
    let spinner = create_spinner("Enumerating opening subtrees...");
    let records = collect_openings()?;
    spinner.finish_and_clear();

    print_section("Opening Analysis");

    print_subsection("Perfect-play value and raw outcome counts per opening");
    for record in &records {
        println!(
            "  ({}, {})  value {:+}   X wins {:>7}  draws {:>7}  O wins {:>7}",
            record.row,
            record.col,
            record.value,
            format_number(record.x_wins),
            format_number(record.draws),
            format_number(record.o_wins),
        );
    }

    print_subsection("Symmetry classes");
    for (name, members) in [
        ("Corner", vec![(0, 0), (0, 2), (2, 0), (2, 2)]),
        ("Edge", vec![(0, 1), (1, 0), (1, 2), (2, 1)]),
        ("Center", vec![(1, 1)]),
    ] {
        let class: Vec<&OpeningRecord> = records
            .iter()
            .filter(|r| members.contains(&(r.row, r.col)))
            .collect();
        let x_wins: usize = class.iter().map(|r| r.x_wins).sum();
        let draws: usize = class.iter().map(|r| r.draws).sum();
        let o_wins: usize = class.iter().map(|r| r.o_wins).sum();
        let total = (x_wins + draws + o_wins).max(1);
        println!(
            "  {:8} X wins {:.1}%  draws {:.1}%  O wins {:.1}%",
            name,
            x_wins as f64 / total as f64 * 100.0,
            draws as f64 / total as f64 * 100.0,
            o_wins as f64 / total as f64 * 100.0,
        );
    }

    let total: usize = records.iter().map(|r| r.total_games).sum();
    println!("\nTotal games across all openings: {}", format_number(total));
    if records.iter().all(|r| r.value == 0) {
        println!("Every opening is a draw under perfect play.");
    }

    if let Some(path) = export {
        write_csv(&records, &path)?;
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}

/// Evaluate every opening move and count its subtree outcomes.
///
/// Records come back in row-major order of the opening move.
///
/// # Errors
///
/// Propagates search and transition errors.
pub fn collect_openings() -> crate::Result<Vec<OpeningRecord>> {
    let empty = Board::new();
    let mut records = Vec::with_capacity(9);

    for mv in empty.legal_moves() {
        let child = empty.make_move(mv)?;
        let value = search::evaluate(&child)?.value;
        let stats = tree::game_stats_from(&child)?;

        records.push(OpeningRecord {
            row: mv.row,
            col: mv.col,
            value,
            x_wins: stats.x_wins,
            draws: stats.draws,
            o_wins: stats.o_wins,
            total_games: stats.total_games,
        });
    }

    Ok(records)
}

/// Write opening records to a CSV file, one row per opening.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_csv(records: &[OpeningRecord], path: &Path) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
