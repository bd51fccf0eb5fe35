//! Card ranks
//!
//! Blackjack only cares about ranks, so a card is represented by its rank
//! token alone. Suits carry no meaning anywhere in the crate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the thirteen card ranks.
///
/// Serialized as its rank token (`"2"` through `"10"`, `"J"`, `"Q"`, `"K"`, `"A"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Position of this rank in [`Rank::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The rank token as written on the card.
    pub const fn token(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub const fn is_ace(self) -> bool {
        matches!(self, Rank::Ace)
    }

    /// Fixed point value of a non-ace rank. Aces return `None`; their value
    /// depends on the rest of the hand.
    pub const fn fixed_value(self) -> Option<u32> {
        match self {
            Rank::Ace => None,
            Rank::Jack | Rank::Queen | Rank::King => Some(10),
            other => Some(other as u32 + 2),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Rank {
    type Err = Error;

    /// Parse a rank token. Surrounding whitespace is ignored and face letters
    /// are accepted in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        Rank::ALL
            .into_iter()
            .find(|rank| rank.token() == token)
            .ok_or_else(|| Error::InvalidCard {
                token: s.to_string(),
            })
    }
}

impl TryFrom<String> for Rank {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rank> for &'static str {
    fn from(rank: Rank) -> Self {
        rank.token()
    }
}

/// Parse a list of rank tokens, failing on the first invalid one.
pub fn parse_cards<I, S>(tokens: I) -> Result<Vec<Rank>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|t| t.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_roundtrip_through_parse() {
        for rank in Rank::ALL {
            assert_eq!(rank.token().parse::<Rank>().unwrap(), rank);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(" k ".parse::<Rank>().unwrap(), Rank::King);
        assert_eq!("a".parse::<Rank>().unwrap(), Rank::Ace);
        assert_eq!("10\n".parse::<Rank>().unwrap(), Rank::Ten);
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        for bad in ["1", "11", "T", "", "joker"] {
            assert!(matches!(
                bad.parse::<Rank>(),
                Err(Error::InvalidCard { .. })
            ));
        }
    }

    #[test]
    fn test_fixed_values() {
        assert_eq!(Rank::Two.fixed_value(), Some(2));
        assert_eq!(Rank::Nine.fixed_value(), Some(9));
        assert_eq!(Rank::Ten.fixed_value(), Some(10));
        assert_eq!(Rank::Queen.fixed_value(), Some(10));
        assert_eq!(Rank::Ace.fixed_value(), None);
    }

    #[test]
    fn test_serde_uses_rank_tokens() {
        let json = serde_json::to_string(&Rank::Ten).unwrap();
        assert_eq!(json, "\"10\"");
        let back: Rank = serde_json::from_str("\"q\"").unwrap();
        assert_eq!(back, Rank::Queen);
        assert!(serde_json::from_str::<Rank>("\"Z\"").is_err());
    }

    #[test]
    fn test_parse_cards_stops_at_first_error() {
        assert_eq!(
            parse_cards(["A", "7"]).unwrap(),
            vec![Rank::Ace, Rank::Seven]
        );
        assert!(parse_cards(["A", "x", "7"]).is_err());
    }
}
