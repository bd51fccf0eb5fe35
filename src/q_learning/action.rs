//! Player actions and policy decisions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A learnable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

impl Action {
    /// Iteration order of the action pair. Ties resolve to the first entry.
    pub const ALL: [Action; 2] = [Action::Hit, Action::Stand];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the policy tells the player to do.
///
/// `BlackJack` is reported for a two-card 21. It is a terminal observation,
/// not a learned choice, and has no entry in the value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Hit,
    Stand,
    BlackJack,
}

impl Decision {
    /// The learnable action behind this decision, if any.
    pub fn action(self) -> Option<Action> {
        match self {
            Decision::Hit => Some(Action::Hit),
            Decision::Stand => Some(Action::Stand),
            Decision::BlackJack => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Hit => "Hit",
            Decision::Stand => "Stand",
            Decision::BlackJack => "BlackJack",
        }
    }
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        match action {
            Action::Hit => Decision::Hit,
            Action::Stand => Decision::Stand,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hit" => Ok(Decision::Hit),
            "stand" => Ok(Decision::Stand),
            "blackjack" => Ok(Decision::BlackJack),
            _ => Err(Error::InvalidInput {
                message: format!("unknown action '{s}' (expected Hit, Stand or BlackJack)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blackjack_has_no_learnable_action() {
        assert_eq!(Decision::BlackJack.action(), None);
        assert_eq!(Decision::Hit.action(), Some(Action::Hit));
        assert_eq!(Decision::from(Action::Stand), Decision::Stand);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Decision::BlackJack).unwrap(), "\"BlackJack\"");
        assert_eq!(serde_json::to_string(&Action::Hit).unwrap(), "\"Hit\"");
        assert_eq!("stand".parse::<Decision>().unwrap(), Decision::Stand);
        assert!("double".parse::<Decision>().is_err());
    }
}
