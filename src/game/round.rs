//! One hand of Blackjack played by the agent.
//!
//! A round starts from the dealt cards and the dealer's up-card, asks the
//! agent for decisions until it stands, busts or holds a natural, and is then
//! resolved with an [`Outcome`]. Resolution performs the single learning
//! update for the hand and decays exploration.

use tracing::{debug, warn};

use crate::{
    Result,
    cards::Rank,
    error::Error,
    game::outcome::Outcome,
    q_learning::{Action, BlackjackAgent, Decision},
    state::State,
};

/// What happened on the latest call to [`Round::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Two-card 21; the hand is over.
    BlackJack,
    /// The hand exceeds 21; the hand is over.
    Bust,
    /// The agent wants another card; call [`Round::hit`] next.
    Hit,
    /// The agent stands; the hand awaits the dealer.
    Stand,
}

#[derive(Debug, Clone)]
pub struct Round {
    cards: Vec<Rank>,
    dealer_card: Rank,
    last_decision: Option<(State, Action)>,
}

impl Round {
    pub fn deal(cards: Vec<Rank>, dealer_card: Rank) -> Self {
        Self {
            cards,
            dealer_card,
            last_decision: None,
        }
    }

    /// State of the hand as it stands now.
    pub fn state(&self) -> State {
        State::new(&self.cards, self.dealer_card)
    }

    /// Ask the agent what to do with the current hand.
    pub fn step(&mut self, agent: &mut BlackjackAgent) -> Step {
        let state = self.state();
        if state.is_bust() {
            return Step::Bust;
        }

        match agent.get_action(&state) {
            Decision::BlackJack => Step::BlackJack,
            Decision::Hit => {
                self.last_decision = Some((state, Action::Hit));
                Step::Hit
            }
            Decision::Stand => {
                self.last_decision = Some((state, Action::Stand));
                Step::Stand
            }
        }
    }

    /// Add a drawn card to the hand.
    pub fn hit(&mut self, card: Rank) {
        self.cards.push(card);
    }

    /// Close the hand: credit the outcome's reward to the last decision and
    /// decay exploration. Returns the reward.
    ///
    /// A natural is recorded through the no-action path and so never changes
    /// the table. The terminal update uses the decision state as its own
    /// successor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the outcome contradicts the hand
    /// (a bust reported for a live hand, a natural for anything but a two-card
    /// 21, or a dealer result for a busted or natural hand).
    pub fn resolve(self, agent: &mut BlackjackAgent, outcome: Outcome) -> Result<f64> {
        let state = self.state();
        let consistent = match outcome {
            Outcome::BlackJack => state.is_blackjack(),
            Outcome::Bust => state.is_bust(),
            Outcome::Win | Outcome::Loss | Outcome::Draw => {
                !state.is_bust() && !state.is_blackjack()
            }
        };
        if !consistent {
            return Err(Error::InvalidInput {
                message: format!(
                    "outcome '{outcome}' does not match a hand worth {} with {} cards",
                    state.hand_value,
                    state.card_count()
                ),
            });
        }

        let reward = outcome.reward();
        if outcome == Outcome::BlackJack {
            agent.update(&state, None, reward, &state);
        } else if let Some((decision_state, action)) = self.last_decision {
            agent.update(&decision_state, Some(action), reward, &decision_state);
        } else {
            warn!(%outcome, "hand resolved before any decision, nothing to learn");
        }
        agent.decay_epsilon();
        debug!(%outcome, reward, epsilon = agent.epsilon(), "resolved hand");

        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{adapters::InMemoryRepository, app::AgentConfig, cards::parse_cards};

    fn greedy_agent() -> BlackjackAgent {
        let config = AgentConfig::default()
            .with_epsilon(0.0)
            .with_epsilon_min(0.0)
            .with_learning_rate(0.5)
            .with_discount_factor(0.8);
        BlackjackAgent::new(config, Arc::new(InMemoryRepository::new())).unwrap()
    }

    fn round(cards: &[&str], dealer: &str) -> Round {
        Round::deal(parse_cards(cards).unwrap(), dealer.parse().unwrap())
    }

    #[test]
    fn test_natural_is_recorded_without_learning() {
        let mut agent = greedy_agent();
        let mut round = round(&["A", "K"], "9");
        assert_eq!(round.step(&mut agent), Step::BlackJack);

        let state = round.state();
        let reward = round.resolve(&mut agent, Outcome::BlackJack).unwrap();
        assert_eq!(reward, 15.0);
        assert_eq!(agent.values(&state).unwrap().hit, 0.0);
        assert_eq!(agent.values(&state).unwrap().stand, 0.0);
    }

    #[test]
    fn test_bust_penalizes_the_hit_that_caused_it() {
        let mut agent = greedy_agent();
        let mut round = round(&["10", "6"], "K");
        let before = round.state();

        // Fresh states tie, and ties resolve to Hit.
        assert_eq!(round.step(&mut agent), Step::Hit);
        round.hit(Rank::Queen);
        assert_eq!(round.step(&mut agent), Step::Bust);
        round.resolve(&mut agent, Outcome::Bust).unwrap();

        let values = agent.values(&before).unwrap();
        assert_eq!(values.hit, -10.0);
        assert_eq!(values.stand, 0.0);

        let mut again = Round::deal(vec![Rank::Six, Rank::Ten], Rank::King);
        assert_eq!(again.step(&mut agent), Step::Stand);
    }

    #[test]
    fn test_stand_then_win() {
        let mut agent = greedy_agent();
        let state = State::from_tokens(["10", "9"], "6").unwrap();
        agent.update(&state, Some(Action::Stand), 1.0, &state);

        let mut round = round(&["10", "9"], "6");
        assert_eq!(round.step(&mut agent), Step::Stand);
        round.resolve(&mut agent, Outcome::Win).unwrap();

        // 0.5 then 0.5 + 0.5 * (10 + 0.8 * 0.5 - 0.5) = 5.45
        let stand = agent.values(&state).unwrap().stand;
        assert!((stand - 5.45).abs() < 1e-12);
    }

    #[test]
    fn test_inconsistent_outcomes_are_rejected() {
        let mut agent = greedy_agent();
        assert!(matches!(
            round(&["10", "6"], "K").resolve(&mut agent, Outcome::Bust),
            Err(Error::InvalidInput { .. })
        ));
        assert!(round(&["10", "6"], "K").resolve(&mut agent, Outcome::BlackJack).is_err());
        assert!(round(&["A", "K"], "K").resolve(&mut agent, Outcome::Win).is_err());
        assert!(round(&["K", "K", "K"], "K").resolve(&mut agent, Outcome::Loss).is_err());
    }

    #[test]
    fn test_resolution_decays_epsilon_once() {
        let config = AgentConfig::default()
            .with_epsilon(1.0)
            .with_epsilon_decay(0.5)
            .with_seed(1);
        let mut agent =
            BlackjackAgent::new(config, Arc::new(InMemoryRepository::new())).unwrap();
        let mut round = round(&["10", "2"], "4");
        while round.step(&mut agent) == Step::Hit {
            round.hit(Rank::Two);
        }
        let outcome = if round.state().is_bust() {
            Outcome::Bust
        } else {
            Outcome::Loss
        };
        round.resolve(&mut agent, outcome).unwrap();
        assert_eq!(agent.epsilon(), 0.5);
    }
}
