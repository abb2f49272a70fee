//! Round resolution
//!
//! Pure decision logic: every (player, computer) pair in the 3x3 choice
//! space maps deterministically to exactly one outcome.

use rand::Rng;

/// A rock-paper-scissors choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Uniform draw from the 3-choice set
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }

    /// The choice this one defeats
    fn beats(&self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }
}

/// Outcome of a single round, from the player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

/// Resolve one round. Pure and total.
pub fn resolve(player: Choice, computer: Choice) -> Outcome {
    if player == computer {
        Outcome::Draw
    } else if player.beats() == computer {
        Outcome::PlayerWin
    } else {
        Outcome::ComputerWin
    }
}
