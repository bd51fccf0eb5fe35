//! Mutex-guarded agent handle for concurrent callers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Result,
    error::Error,
    q_learning::{
        action::{Action, Decision},
        agent::BlackjackAgent,
    },
    state::State,
};

/// Shared agent wrapper
///
/// Serializes every operation on the underlying [`BlackjackAgent`] through a
/// single lock, so an update can never interleave with a save and persist a
/// half-written table. Clones share the same agent.
#[derive(Debug, Clone)]
pub struct SharedAgent {
    agent: Arc<Mutex<BlackjackAgent>>,
}

impl SharedAgent {
    pub fn new(agent: BlackjackAgent) -> Self {
        Self {
            agent: Arc::new(Mutex::new(agent)),
        }
    }

    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, BlackjackAgent>> {
        self.agent.lock().map_err(|_| Error::LockPoisoned {
            operation: operation.to_string(),
        })
    }

    pub fn get_action(&self, state: &State) -> Result<Decision> {
        Ok(self.lock("action selection")?.get_action(state))
    }

    /// Apply an update and decay epsilon under one lock acquisition.
    pub fn record_outcome(
        &self,
        state: &State,
        action: Option<Action>,
        reward: f64,
        next_state: &State,
    ) -> Result<()> {
        let mut agent = self.lock("update")?;
        agent.update(state, action, reward, next_state);
        agent.decay_epsilon();
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.lock("save")?.save()
    }

    pub fn load(&self) -> Result<()> {
        self.lock("load")?.load()
    }

    /// Run a closure with exclusive access to the agent.
    pub fn with_agent<T>(&self, f: impl FnOnce(&mut BlackjackAgent) -> T) -> Result<T> {
        let mut agent = self.lock("exclusive access")?;
        Ok(f(&mut agent))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{adapters::InMemoryRepository, app::AgentConfig, cards::Rank};

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let config = AgentConfig::default()
            .with_learning_rate(1.0)
            .with_discount_factor(0.0);
        let agent = BlackjackAgent::new(config, Arc::new(InMemoryRepository::new())).unwrap();
        let shared = SharedAgent::new(agent);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let state = State::new(&[Rank::Ten, Rank::Six], Rank::ALL[i]);
                    for _ in 0..25 {
                        shared
                            .record_outcome(&state, Some(Action::Stand), 10.0, &state)
                            .unwrap();
                        shared.save().unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let (states, epsilon) = shared
            .with_agent(|agent| (agent.q_table().len(), agent.epsilon()))
            .unwrap();
        assert_eq!(states, 8);
        assert!(epsilon < 1.0);
    }

    #[test]
    fn test_blackjack_decision_through_shared_handle() {
        let agent =
            BlackjackAgent::new(AgentConfig::default(), Arc::new(InMemoryRepository::new()))
                .unwrap();
        let shared = SharedAgent::new(agent);
        let natural = State::from_tokens(["A", "J"], "10").unwrap();
        assert_eq!(shared.get_action(&natural).unwrap(), Decision::BlackJack);
    }
}
