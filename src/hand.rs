//! Hand evaluation
//!
//! Converts a list of cards into the hand total, the soft flag and the rank
//! composition used as part of the learning state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{cards::Rank, error::Error};

/// Count of each rank in a hand.
///
/// Always covers all thirteen ranks, so two hands holding the same multiset
/// of ranks compare equal regardless of draw order. Serialized as a map from
/// rank token to count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct HandComposition([u32; 13]);

impl HandComposition {
    /// Composition with every count at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: &[Rank]) -> Self {
        let mut composition = Self::new();
        for &card in cards {
            composition.add(card);
        }
        composition
    }

    pub fn add(&mut self, rank: Rank) {
        self.0[rank.index()] += 1;
    }

    pub fn count(&self, rank: Rank) -> u32 {
        self.0[rank.index()]
    }

    /// Total number of cards in the hand.
    pub fn card_count(&self) -> u32 {
        self.0.iter().sum()
    }

    /// (rank, count) pairs for all thirteen ranks, in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, u32)> + '_ {
        Rank::ALL.into_iter().map(|rank| (rank, self.count(rank)))
    }
}

/// Most cards a composition read from outside may hold. Every card is worth
/// at least one point and no state is worth more than 31.
pub const MAX_CARDS: u32 = 31;

impl TryFrom<BTreeMap<String, u32>> for HandComposition {
    type Error = Error;

    /// Ranks missing from the map count as zero; unknown rank tokens and
    /// compositions holding more than [`MAX_CARDS`] cards are rejected.
    fn try_from(map: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut composition = Self::new();
        for (token, count) in map {
            let rank: Rank = token.parse()?;
            composition.0[rank.index()] = count;
        }

        let total: u64 = composition.0.iter().map(|&count| u64::from(count)).sum();
        if total > u64::from(MAX_CARDS) {
            return Err(Error::InvalidInput {
                message: format!("hand holds {total} cards, at most {MAX_CARDS} are possible"),
            });
        }
        Ok(composition)
    }
}

impl From<HandComposition> for BTreeMap<String, u32> {
    fn from(composition: HandComposition) -> Self {
        composition
            .iter()
            .map(|(rank, count)| (rank.token().to_string(), count))
            .collect()
    }
}

/// Result of evaluating a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandEvaluation {
    /// Hand total with aces resolved.
    pub value: u32,
    /// True when the hand holds an ace and the total is at most 21.
    pub soft: bool,
    pub composition: HandComposition,
}

/// Evaluate a hand.
///
/// Non-ace cards are summed first. Aces are then resolved one at a time in
/// hand order: each counts 11 if that keeps the running total at or below 21,
/// otherwise 1. The hand is reported soft whenever it contains an ace and the
/// final total does not exceed 21, even if every ace ended up counting 1.
pub fn evaluate_hand(cards: &[Rank]) -> HandEvaluation {
    let mut value = 0;
    let mut aces = 0;

    for card in cards {
        match card.fixed_value() {
            Some(points) => value += points,
            None => aces += 1,
        }
    }

    for _ in 0..aces {
        if value + 11 <= 21 {
            value += 11;
        } else {
            value += 1;
        }
    }

    HandEvaluation {
        value,
        soft: aces > 0 && value <= 21,
        composition: HandComposition::from_cards(cards),
    }
}
