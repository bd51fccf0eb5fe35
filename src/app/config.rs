//! Configuration types for agent creation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error};

/// Configuration for creating a [`BlackjackAgent`](crate::BlackjackAgent).
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes.
///
/// # Examples
///
/// ```
/// use blackjack::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_epsilon(0.2)
///     .with_learning_rate(0.1)
///     .with_storage("tables/q_table.msgpack")
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Initial exploration rate
    pub epsilon: f64,
    /// Floor for the exploration rate
    pub epsilon_min: f64,
    /// Multiplicative decay applied after each resolved hand
    pub epsilon_decay: f64,
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Where the value table is persisted
    pub storage: PathBuf,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            epsilon_min: 0.1,
            epsilon_decay: 0.995,
            learning_rate: 0.5,
            discount_factor: 0.8,
            storage: PathBuf::from("q_table.msgpack"),
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_min(mut self, epsilon_min: f64) -> Self {
        self.epsilon_min = epsilon_min;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_storage(mut self, storage: impl Into<PathBuf>) -> Self {
        self.storage = storage.into();
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                })
            }
        };

        unit("epsilon", self.epsilon)?;
        unit("epsilon_min", self.epsilon_min)?;
        unit("learning_rate", self.learning_rate)?;
        unit("discount_factor", self.discount_factor)?;

        if self.epsilon_min > self.epsilon {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "epsilon_min ({}) must not exceed epsilon ({})",
                    self.epsilon_min, self.epsilon
                ),
            });
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "epsilon_decay must be within (0, 1], got {}",
                    self.epsilon_decay
                ),
            });
        }
        if self.storage.as_os_str().is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "storage location must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.epsilon, 1.0);
        assert_eq!(config.epsilon_min, 0.1);
        assert_eq!(config.epsilon_decay, 0.995);
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.discount_factor, 0.8);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(AgentConfig::default().with_learning_rate(1.5).validate().is_err());
        assert!(AgentConfig::default().with_discount_factor(-0.1).validate().is_err());
        assert!(AgentConfig::default().with_epsilon_decay(0.0).validate().is_err());
        assert!(AgentConfig::default().with_epsilon_decay(f64::NAN).validate().is_err());
        assert!(AgentConfig::default().with_storage("").validate().is_err());
    }

    #[test]
    fn test_epsilon_floor_cannot_exceed_start() {
        let config = AgentConfig::default().with_epsilon(0.05);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(config.with_epsilon_min(0.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"learning_rate": 0.1, "seed": 9}"#).unwrap();
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.discount_factor, 0.8);
    }
}
