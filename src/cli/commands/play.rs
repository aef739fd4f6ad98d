//! Play command - interactive games against an engine opponent

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use crate::cli::commands::{AgentKind, SideArg};
use crate::{Board, Game, Move, Outcome, lines};

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game against the engine")]
pub struct PlayArgs {
    /// Side to play
    #[arg(long, short = 's', value_enum, default_value = "x")]
    pub side: SideArg,

    /// Engine opponent
    #[arg(long, short = 'o', value_enum, default_value = "oracle")]
    pub opponent: AgentKind,

    /// Random seed for a seeded random opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Starting position as a 9-character row-major string
    #[arg(long)]
    pub state: Option<String>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let initial = match &args.state {
        Some(s) => {
            let board = Board::from_string(s)?;
            board.validate()?;
            board
        }
        None => Board::new(),
    };

    let human = args.side.player();
    let mut engine = args.opponent.build(args.seed);

    println!("You play {human} against the {} engine.", engine.name());
    println!("Enter moves as 'row col' with 0-based indices, e.g. '0 2'. 'q' quits.");

    let mut game = Game::from_position(initial);

    while !game.is_over() {
        let board = game.current_state();
        let mover = board.to_move();
        println!("\n{board}");

        if mover == human {
            let Some(mv) = prompt_move()? else {
                println!("Game abandoned.");
                return Ok(());
            };
            if let Err(err) = game.play(mv) {
                println!("{err}");
                continue;
            }
        } else {
            let mv = engine.select_move(&board)?;
            game.play(mv)?;
            println!("{mover} plays {mv}");
        }
    }

    let final_board = game.current_state();
    println!("\n{final_board}\n");

    match game.outcome() {
        Some(Outcome::Win(winner)) => {
            match final_board.winning_line() {
                Some(line) => println!("{winner} wins on the {}.", lines::line_name(line)),
                None => println!("{winner} wins."),
            }
            if winner == human {
                println!("Well played.");
            }
        }
        Some(Outcome::Draw) => println!("Draw."),
        None => {}
    }

    Ok(())
}

/// Read a move from stdin, re-prompting until the input parses.
///
/// Returns `None` on 'q', 'quit', or end of input.
fn prompt_move() -> Result<Option<Move>> {
    loop {
        print!("Your move: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() == 2
            && let (Ok(row), Ok(col)) = (parts[0].parse(), parts[1].parse())
        {
            return Ok(Some(Move::new(row, col)));
        }
        println!("Enter a move as 'row col', e.g. '1 1'.");
    }
}
