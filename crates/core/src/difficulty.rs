//! Question difficulty levels and their selection strategy.
//!
//! Difficulty is drawn uniformly at random for every topic-question step;
//! there is no progression or memory across steps. The randomness sits
//! behind the `DifficultyPicker` trait so tests can fix the sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed, ordered set of difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

pub const ALL_DIFFICULTIES: [Difficulty; 3] =
    [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Source of the difficulty used for a topic-question step.
pub trait DifficultyPicker: Send + Sync {
    fn pick(&self) -> Difficulty;
}

/// Picks a difficulty uniformly at random.
pub struct RandomDifficultyPicker;

impl DifficultyPicker for RandomDifficultyPicker {
    fn pick(&self) -> Difficulty {
        let index = rand::rng().random_range(0..ALL_DIFFICULTIES.len());
        ALL_DIFFICULTIES[index]
    }
}

/// Always returns the same difficulty. Useful for deterministic tests.
pub struct FixedDifficultyPicker(pub Difficulty);

impl DifficultyPicker for FixedDifficultyPicker {
    fn pick(&self) -> Difficulty {
        self.0
    }
}
