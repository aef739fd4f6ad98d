//! Shared configuration types for CLI commands

use serde::{Deserialize, Serialize};

/// Evaluation run configuration, recorded alongside exported results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation games
    pub games: usize,

    /// Agent under evaluation
    pub agent: String,

    /// Opponent played against
    pub opponent: String,

    /// Fixed side for the agent; sides alternate when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,

    /// Seed the run was started from
    pub seed: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            agent: "oracle".to_string(),
            opponent: "random".to_string(),
            side: None,
            seed: 0,
        }
    }
}
