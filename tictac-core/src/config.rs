//! Configuration types for computer players

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::{AiPlayer, MinimaxAI, RandomAI};

/// Player type for games
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// Exhaustive minimax search
    #[default]
    Minimax,
    /// Uniformly random legal moves
    Random,
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerType::Minimax => write!(f, "minimax"),
            PlayerType::Random => write!(f, "random"),
        }
    }
}

impl FromStr for PlayerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(PlayerType::Minimax),
            "random" => Ok(PlayerType::Random),
            other => Err(format!("unknown player type '{}' (expected minimax or random)", other)),
        }
    }
}

/// AI configuration for game playing
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Player type (minimax or random)
    pub player_type: PlayerType,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn minimax() -> Self {
        Self {
            player_type: PlayerType::Minimax,
            ..Default::default()
        }
    }

    pub fn random() -> Self {
        Self {
            player_type: PlayerType::Random,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Construct the configured player
    pub fn build(&self) -> AiPlayer {
        match (self.player_type, self.seed) {
            (PlayerType::Minimax, Some(seed)) => AiPlayer::Minimax(MinimaxAI::with_seed(seed)),
            (PlayerType::Minimax, None) => AiPlayer::Minimax(MinimaxAI::from_entropy()),
            (PlayerType::Random, Some(seed)) => AiPlayer::Random(RandomAI::with_seed(seed)),
            (PlayerType::Random, None) => AiPlayer::Random(RandomAI::from_entropy()),
        }
    }
}
