//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{q_learning::action::Action, state::State};

/// The {Hit, Stand} value pair stored for one state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionValues {
    #[serde(rename = "Hit")]
    pub hit: f64,
    #[serde(rename = "Stand")]
    pub stand: f64,
}

impl ActionValues {
    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::Hit => self.hit,
            Action::Stand => self.stand,
        }
    }

    pub fn get_mut(&mut self, action: Action) -> &mut f64 {
        match action {
            Action::Hit => &mut self.hit,
            Action::Stand => &mut self.stand,
        }
    }

    /// Action with the strictly greatest value; ties go to `Hit`.
    pub fn best(&self) -> Action {
        if self.stand > self.hit {
            Action::Stand
        } else {
            Action::Hit
        }
    }
}

/// Value table mapping states to their action values.
///
/// Entries are created lazily, zero-initialized, on first visit and are never
/// removed by learning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    values: HashMap<State, ActionValues>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Values for a state, materializing a zero entry if the state is new.
    pub fn entry(&mut self, state: &State) -> &mut ActionValues {
        self.values.entry(*state).or_default()
    }

    /// Values for a state without materializing anything.
    pub fn get(&self, state: &State) -> Option<&ActionValues> {
        self.values.get(state)
    }

    pub fn insert(&mut self, state: State, values: ActionValues) {
        self.values.insert(state, values);
    }

    /// Greedy action for a state, materializing the entry.
    pub fn best_action(&mut self, state: &State) -> Action {
        self.entry(state).best()
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ Q(s', best(s')) - Q(s,a)]
    ///
    /// Returns the new value of Q(s,a).
    pub fn q_learning_update(
        &mut self,
        state: &State,
        action: Action,
        reward: f64,
        next_state: &State,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let next_values = *self.entry(next_state);
        let next_q = next_values.get(next_values.best());

        let current = self.entry(state).get_mut(action);
        let td_target = reward + discount_factor * next_q;
        let td_error = td_target - *current;
        *current += learning_rate * td_error;
        *current
    }

    pub fn iter(&self) -> impl Iterator<Item = (&State, &ActionValues)> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of states stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(State, ActionValues)> for QTable {
    fn from_iter<T: IntoIterator<Item = (State, ActionValues)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
