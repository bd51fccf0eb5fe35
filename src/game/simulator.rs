//! Infinite-deck dealer for self-play training.
//!
//! Every card is drawn uniformly from the thirteen ranks, as if from an
//! endlessly reshuffled shoe. The dealer draws to 17 and stands on all 17s.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    Result,
    cards::Rank,
    game::{
        outcome::Outcome,
        round::{Round, Step},
    },
    hand::evaluate_hand,
    q_learning::BlackjackAgent,
};

const DEALER_STANDS_AT: u32 = 17;

/// Tally of simulated hands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub hands: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub busts: usize,
    pub blackjacks: usize,
    pub total_reward: f64,
}

impl TrainingSummary {
    pub fn record(&mut self, outcome: Outcome) {
        self.hands += 1;
        self.total_reward += outcome.reward();
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Bust => self.busts += 1,
            Outcome::BlackJack => self.blackjacks += 1,
        }
    }

    /// Share of hands won outright or with a natural.
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins + self.blackjacks)
    }

    pub fn bust_rate(&self) -> f64 {
        self.rate(self.busts)
    }

    pub fn average_reward(&self) -> f64 {
        if self.hands == 0 {
            0.0
        } else {
            self.total_reward / self.hands as f64
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.hands == 0 {
            0.0
        } else {
            count as f64 / self.hands as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct Simulator {
    rng: StdRng,
}

impl Simulator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }

    pub fn draw(&mut self) -> Rank {
        Rank::ALL[self.rng.random_range(0..Rank::ALL.len())]
    }

    /// Play out the dealer's hand from the up-card and return its total.
    pub fn dealer_total(&mut self, up_card: Rank) -> u32 {
        let mut hand = vec![up_card, self.draw()];
        loop {
            let value = evaluate_hand(&hand).value;
            if value >= DEALER_STANDS_AT {
                return value;
            }
            hand.push(self.draw());
        }
    }

    /// Deal, play and resolve one hand, updating the agent.
    pub fn play_hand(&mut self, agent: &mut BlackjackAgent) -> Result<Outcome> {
        let cards = vec![self.draw(), self.draw()];
        let up_card = self.draw();
        let mut round = Round::deal(cards, up_card);

        let outcome = loop {
            match round.step(agent) {
                Step::Hit => round.hit(self.draw()),
                Step::BlackJack => break Outcome::BlackJack,
                Step::Bust => break Outcome::Bust,
                Step::Stand => {
                    let player = round.state().hand_value;
                    let dealer = self.dealer_total(up_card);
                    break judge(player, dealer);
                }
            }
        };

        round.resolve(agent, outcome)?;
        Ok(outcome)
    }

    /// Play `hands` hands, calling `on_hand` after each one.
    pub fn train(
        &mut self,
        agent: &mut BlackjackAgent,
        hands: usize,
        mut on_hand: impl FnMut(&TrainingSummary),
    ) -> Result<TrainingSummary> {
        let mut summary = TrainingSummary::default();
        for _ in 0..hands {
            let outcome = self.play_hand(agent)?;
            summary.record(outcome);
            on_hand(&summary);
        }
        Ok(summary)
    }
}

/// Outcome of a standing player total against a finished dealer total.
fn judge(player: u32, dealer: u32) -> Outcome {
    if dealer > 21 || player > dealer {
        Outcome::Win
    } else if player == dealer {
        Outcome::Draw
    } else {
        Outcome::Loss
    }
}
