//! Analyze command - game-tree statistics and opening analysis

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod openings;
mod tree;

#[derive(Parser, Debug)]
#[command(about = "Analyze the game tree")]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub command: AnalyzeCommand,
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeCommand {
    /// Evaluate every opening move under perfect play
    Openings {
        /// Export the table to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Count games and positions in the full tree
    Tree {
        /// Start from this position instead of the empty board
        #[arg(long)]
        state: Option<String>,
    },
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    match args.command {
        AnalyzeCommand::Openings { export } => openings::analyze(export),
        AnalyzeCommand::Tree { state } => tree::analyze(state),
    }
}
