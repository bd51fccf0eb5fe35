//! Q-learning Blackjack agent
//!
//! Owns the value table, the exploration schedule and the storage location
//! the table is persisted to.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    Result,
    app::AgentConfig,
    ports::TableRepository,
    q_learning::{
        action::{Action, Decision},
        q_table::{ActionValues, QTable},
        serialization::SavedQTable,
    },
    state::State,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent with ε-greedy exploration.
///
/// Single-threaded and unsynchronized; wrap it in a
/// [`SharedAgent`](crate::q_learning::SharedAgent) before handing it to
/// concurrent callers.
pub struct BlackjackAgent {
    q_table: QTable,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    learning_rate: f64,
    discount_factor: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
    storage: PathBuf,
    repository: Arc<dyn TableRepository>,
}

impl BlackjackAgent {
    /// Create an agent with an empty value table.
    ///
    /// Nothing is read from storage; call [`load`](Self::load) (or build the
    /// agent through [`App::create_agent`](crate::App::create_agent)) to
    /// restore a saved table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the configuration is
    /// out of range.
    pub fn new(config: AgentConfig, repository: Arc<dyn TableRepository>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(),
            epsilon: config.epsilon,
            initial_epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.epsilon_min,
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
            storage: config.storage,
            repository,
        })
    }

    /// Create an agent and restore its table from the configured location.
    pub fn open(config: AgentConfig, repository: Arc<dyn TableRepository>) -> Result<Self> {
        let mut agent = Self::new(config, repository)?;
        agent.load()?;
        Ok(agent)
    }

    /// ε-greedy decision for a state.
    ///
    /// A two-card 21 is reported as [`Decision::BlackJack`] before the
    /// exploration roll. Otherwise a uniformly random action is returned with
    /// probability ε and the greedy action the rest of the time.
    pub fn get_action(&mut self, state: &State) -> Decision {
        if state.is_blackjack() {
            return Decision::BlackJack;
        }

        if self.rng.random::<f64>() < self.epsilon {
            // Explore
            Action::ALL[self.rng.random_range(0..Action::ALL.len())].into()
        } else {
            self.best_action(state).into()
        }
    }

    /// Greedy action for a state. Unseen states get a zero entry and resolve
    /// to `Hit`.
    pub fn best_action(&mut self, state: &State) -> Action {
        self.q_table.best_action(state)
    }

    /// Record an observed transition.
    ///
    /// Both states are materialized in the table. With `action == None` (the
    /// BlackJack path) the values are left untouched; otherwise Q(state,
    /// action) moves toward `reward + γ · Q(next_state, best)`.
    pub fn update(
        &mut self,
        state: &State,
        action: Option<Action>,
        reward: f64,
        next_state: &State,
    ) {
        self.q_table.entry(state);
        self.q_table.entry(next_state);

        let Some(action) = action else {
            debug!(hand_value = state.hand_value, reward, "no learnable action, skipping update");
            return;
        };

        let updated = self.q_table.q_learning_update(
            state,
            action,
            reward,
            next_state,
            self.learning_rate,
            self.discount_factor,
        );
        debug!(
            hand_value = state.hand_value,
            dealer_card = %state.dealer_card,
            %action,
            reward,
            q = updated,
            "updated action value"
        );
    }

    /// Decay epsilon after a resolved hand
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Write the value table and the current exploration rate to the
    /// configured location, replacing any previous contents.
    pub fn save(&self) -> Result<()> {
        self.repository
            .save(&SavedQTable::new(&self.q_table, self.epsilon), &self.storage)?;
        info!(
            states = self.q_table.len(),
            epsilon = self.epsilon,
            location = %self.storage.display(),
            "saved value table"
        );
        Ok(())
    }

    /// Restore the value table and exploration rate from the configured
    /// location.
    ///
    /// The stored epsilon is clamped into `[min_epsilon, initial_epsilon]`,
    /// so decay carries over between runs while a lower configured start
    /// still takes effect. A missing location yields an empty table and
    /// leaves epsilon as it is. Unreadable or corrupt storage is an error and
    /// leaves the agent untouched.
    pub fn load(&mut self) -> Result<()> {
        match self.repository.load(&self.storage)? {
            Some(saved) => {
                let (table, epsilon) = saved.into_parts();
                self.epsilon = epsilon.clamp(self.min_epsilon, self.initial_epsilon);
                info!(
                    states = table.len(),
                    epsilon = self.epsilon,
                    location = %self.storage.display(),
                    "restored value table"
                );
                self.q_table = table;
            }
            None => {
                info!(
                    location = %self.storage.display(),
                    "no stored value table, starting empty"
                );
                self.q_table = QTable::new();
            }
        }
        Ok(())
    }

    /// Clear the table and restart exploration from the initial epsilon.
    pub fn reset(&mut self) {
        self.q_table.clear();
        self.epsilon = self.initial_epsilon;
        self.rng = build_rng(self.rng_seed);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn min_epsilon(&self) -> f64 {
        self.min_epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Stored values for a state, if it has been visited.
    pub fn values(&self, state: &State) -> Option<ActionValues> {
        self.q_table.get(state).copied()
    }

    pub fn storage(&self) -> &Path {
        &self.storage
    }
}

impl fmt::Debug for BlackjackAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlackjackAgent")
            .field("states", &self.q_table.len())
            .field("epsilon", &self.epsilon)
            .field("min_epsilon", &self.min_epsilon)
            .field("epsilon_decay", &self.epsilon_decay)
            .field("learning_rate", &self.learning_rate)
            .field("discount_factor", &self.discount_factor)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
