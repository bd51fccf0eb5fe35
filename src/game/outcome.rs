//! Hand outcomes and the reward schedule.

use std::{fmt, str::FromStr};

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const WIN_REMARKS: [&str; 5] = [
    "Hopefully this enough for that monoi oil",
    "All you do is win babayy",
    "You are the king of the world",
    "Another $187,417,237 to go for the house",
    "These arbitrary wins have no value, you have transcended the futilities of commerce",
];

const LOSS_REMARKS: [&str; 5] = [
    "Dialysis isn't that bad....",
    "You're a loser, but you're MY loser",
    "Quitters never prosper",
    "Go all in, you'll get the next game",
    "Well, you weren't going to use that money right?",
];

/// How a hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    Bust,
    BlackJack,
}

impl Outcome {
    /// Reward paid to the agent for this outcome.
    pub fn reward(self) -> f64 {
        match self {
            Outcome::Win => 10.0,
            Outcome::Loss => -10.0,
            Outcome::Draw => 5.0,
            Outcome::Bust => -20.0,
            Outcome::BlackJack => 15.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Draw => "draw",
            Outcome::Bust => "bust",
            Outcome::BlackJack => "blackjack",
        }
    }

    /// A flavour message for the player.
    pub fn remark<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        let pool: &[&'static str] = match self {
            Outcome::Win => &WIN_REMARKS,
            Outcome::Loss | Outcome::Bust => &LOSS_REMARKS,
            Outcome::Draw => return "It's a draw!",
            Outcome::BlackJack => return "BlackJack babyyy!!!",
        };
        pool.choose(rng).copied().unwrap_or_default()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(Outcome::Win),
            "loss" => Ok(Outcome::Loss),
            "draw" => Ok(Outcome::Draw),
            "bust" => Ok(Outcome::Bust),
            "blackjack" => Ok(Outcome::BlackJack),
            other => Err(Error::ParseOutcome {
                input: other.to_string(),
                expected: "win, loss, draw, bust, blackjack".to_string(),
            }),
        }
    }
}
