//! Learning state
//!
//! A [`State`] is the key of the value table: what the player holds and what
//! the dealer shows at the moment a decision is made.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    cards::{Rank, parse_cards},
    hand::{HandComposition, evaluate_hand},
};

/// Snapshot of a decision point.
///
/// Two states are equal (and hash equal) iff composition, soft flag, hand
/// value and dealer card are all equal. Serialized with the field names
/// `hand`, `soft`, `hand_value` and `dealer_card`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct State {
    pub hand: HandComposition,
    pub soft: bool,
    pub hand_value: u32,
    pub dealer_card: Rank,
}

impl State {
    /// Build the state for a player hand against the dealer's up-card.
    pub fn new(cards: &[Rank], dealer_card: Rank) -> Self {
        let evaluation = evaluate_hand(cards);
        Self {
            hand: evaluation.composition,
            soft: evaluation.soft,
            hand_value: evaluation.value,
            dealer_card,
        }
    }

    /// Build a state from raw rank tokens, e.g. `["10", "6"]` and `"K"`.
    pub fn from_tokens<I, S>(cards: I, dealer_card: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cards = parse_cards(cards)?;
        let dealer_card = dealer_card.parse()?;
        Ok(Self::new(&cards, dealer_card))
    }

    pub fn card_count(&self) -> u32 {
        self.hand.card_count()
    }

    /// Two-card 21.
    pub fn is_blackjack(&self) -> bool {
        self.card_count() == 2 && self.hand_value == 21
    }

    pub fn is_bust(&self) -> bool {
        self.hand_value > 21
    }
}
