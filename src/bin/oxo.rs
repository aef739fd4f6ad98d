//! oxo CLI - perfect-play tic-tac-toe engine
//!
//! This CLI provides a unified interface for:
//! - Solving positions under perfect play
//! - Playing interactive games against the engine
//! - Evaluating agents over batches of games
//! - Analyzing the game tree

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Perfect-play tic-tac-toe engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a position under perfect play
    Solve(oxo::cli::commands::solve::SolveArgs),

    /// Play an interactive game against the engine
    Play(oxo::cli::commands::play::PlayArgs),

    /// Run engine-vs-engine games and report outcome rates
    Evaluate(oxo::cli::commands::evaluate::EvaluateArgs),

    /// Analyze the game tree
    Analyze(oxo::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => oxo::cli::commands::solve::execute(args),
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
        Commands::Evaluate(args) => oxo::cli::commands::evaluate::execute(args),
        Commands::Analyze(args) => oxo::cli::commands::analyze::execute(args),
    }
}
