//! Evaluate command - engine-vs-engine games with outcome rates

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::cli::commands::{AgentKind, SideArg};
use crate::cli::config::EvaluationConfig;
use crate::cli::output::{create_game_progress, print_kv, print_section, print_stats_table};
use crate::{Outcome, Player, game};

#[derive(Parser, Debug)]
#[command(about = "Run engine-vs-engine games and report outcome rates")]
pub struct EvaluateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Agent under evaluation
    #[arg(long, short = 'a', value_enum, default_value = "oracle")]
    pub agent: AgentKind,

    /// Opponent to evaluate against
    #[arg(long, short = 'o', value_enum, default_value = "random")]
    pub opponent: AgentKind,

    /// Play every game as this side instead of alternating
    #[arg(long, value_enum)]
    pub side: Option<SideArg>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Outcome counts from the evaluated agent's perspective
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub config: EvaluationConfig,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = EvaluationConfig {
        games: args.games,
        agent: args.agent.as_str().to_string(),
        opponent: args.opponent.as_str().to_string(),
        side: args.side.map(|side| side.player().to_string()),
        seed,
    };

    print_section("Evaluation Configuration");
    print_kv("Agent", &config.agent);
    print_kv("Opponent", &config.opponent);
    print_kv("Games", &config.games.to_string());
    match &config.side {
        Some(side) => print_kv("Side", side),
        None => print_kv("Side", "alternating"),
    }
    print_kv("Seed", &config.seed.to_string());

    let report = run_evaluation(&args, config)?;

    print_section("Evaluation Results");
    let wins = format!("{} ({:.1}%)", report.wins, report.win_rate * 100.0);
    let draws = format!("{} ({:.1}%)", report.draws, report.draw_rate * 100.0);
    let losses = format!("{} ({:.1}%)", report.losses, report.loss_rate * 100.0);
    print_stats_table(&[
        ("Wins", wins.as_str()),
        ("Draws", draws.as_str()),
        ("Losses", losses.as_str()),
    ]);

    if let Some(path) = &args.export {
        write_report(&report, path)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

fn run_evaluation(args: &EvaluateArgs, config: EvaluationConfig) -> Result<EvaluationReport> {
    let mut agent = args.agent.build(Some(config.seed));
    let mut opponent = args.opponent.build(Some(config.seed.wrapping_add(1)));

    let pb = create_game_progress(args.games as u64);
    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;

    for index in 0..args.games {
        let agent_side = match args.side {
            Some(side) => side.player(),
            None if index.is_multiple_of(2) => Player::X,
            None => Player::O,
        };

        let finished = match agent_side {
            Player::X => game::play_game(agent.as_mut(), opponent.as_mut())?,
            Player::O => game::play_game(opponent.as_mut(), agent.as_mut())?,
        };

        let Some(outcome) = finished.outcome() else {
            return Err(anyhow::anyhow!("game finished without an outcome"));
        };
        match outcome {
            Outcome::Win(winner) if winner == agent_side => wins += 1,
            Outcome::Win(_) => losses += 1,
            Outcome::Draw => draws += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let total = args.games.max(1) as f64;
    Ok(EvaluationReport {
        config,
        wins,
        draws,
        losses,
        win_rate: wins as f64 / total,
        draw_rate: draws as f64 / total,
        loss_rate: losses as f64 / total,
    })
}

/// Write an evaluation report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the report cannot be
/// serialized.
pub fn write_report(report: &EvaluationReport, path: &Path) -> crate::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
