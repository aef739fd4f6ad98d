//! Solve command - evaluate a position under perfect play

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::cli::output::{print_kv, print_section};
use crate::{Board, search};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a position under perfect play")]
pub struct SolveArgs {
    /// Board as a 9-character row-major string ('.' for empty), e.g. "XX.OO...."
    #[arg(default_value = ".........")]
    pub state: String,

    /// Show the value of every legal move, not just the best one
    #[arg(long, short = 'm')]
    pub moves: bool,

    /// Export the evaluation to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Full evaluation of a single position
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub state: String,
    pub terminal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_move: Option<String>,
    pub value: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_move: Option<MoveRecord>,
    pub move_values: Vec<MoveValue>,
}

#[derive(Debug, Serialize)]
pub struct MoveRecord {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Serialize)]
pub struct MoveValue {
    pub row: usize,
    pub col: usize,
    pub value: i32,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let board = Board::from_string(&args.state)?;
    board.validate()?;

    let report = build_report(&board)?;

    print_section("Position");
    println!("{board}");

    print_section("Evaluation");
    if let Some(to_move) = &report.to_move {
        print_kv("To move", to_move);
    }
    print_kv("Value", &format!("{:+}", report.value));
    print_kv("Verdict", verdict(report.value, report.terminal));
    match &report.best_move {
        Some(mv) => print_kv("Best move", &format!("({}, {})", mv.row, mv.col)),
        None => print_kv("Best move", "none (game over)"),
    }

    if args.moves && !report.move_values.is_empty() {
        print_section("Move Values");
        for mv in &report.move_values {
            println!("  ({}, {})  {:+}", mv.row, mv.col, mv.value);
        }
    }

    if let Some(path) = &args.export {
        write_report(&report, path)?;
        println!("\nEvaluation exported to: {}", path.display());
    }

    Ok(())
}

/// Evaluate a position into an exportable report.
///
/// # Errors
///
/// Propagates search errors.
pub fn build_report(board: &Board) -> crate::Result<SolveReport> {
    let result = search::evaluate(board)?;
    let move_values = search::evaluate_moves(board)?
        .into_iter()
        .map(|(mv, value)| MoveValue {
            row: mv.row,
            col: mv.col,
            value,
        })
        .collect();

    Ok(SolveReport {
        state: board.encode(),
        terminal: board.is_terminal(),
        to_move: (!board.is_terminal()).then(|| board.to_move().to_string()),
        value: result.value,
        best_move: result.best_move.map(|mv| MoveRecord {
            row: mv.row,
            col: mv.col,
        }),
        move_values,
    })
}

/// Write a report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the report cannot be
/// serialized.
pub fn write_report(report: &SolveReport, path: &Path) -> crate::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

fn verdict(value: i32, terminal: bool) -> &'static str {
    match (value, terminal) {
        (1, true) => "X has won",
        (-1, true) => "O has won",
        (_, true) => "drawn",
        (1, false) => "X wins with perfect play",
        (-1, false) => "O wins with perfect play",
        _ => "draw with perfect play",
    }
}
