//! Command implementations for the oxo CLI

use clap::ValueEnum;

use crate::Player;
use crate::agents::{Agent, OracleAgent, RandomAgent};

pub mod analyze;
pub mod evaluate;
pub mod play;
pub mod solve;

/// Agents selectable from the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum AgentKind {
    /// Exhaustive minimax search on every move
    Oracle,
    /// Uniformly random legal moves
    Random,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Oracle => "oracle",
            AgentKind::Random => "random",
        }
    }

    /// Instantiate the agent, seeding a random agent when a seed is given
    pub fn build(self, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            AgentKind::Oracle => Box::new(OracleAgent::new()),
            AgentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::with_seed(seed)),
                None => Box::new(RandomAgent::new()),
            },
        }
    }
}

/// Board sides selectable from the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SideArg {
    X,
    O,
}

impl SideArg {
    pub fn player(self) -> Player {
        match self {
            SideArg::X => Player::X,
            SideArg::O => Player::O,
        }
    }
}
