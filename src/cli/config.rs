//! Agent settings shared across commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AgentConfig;

/// Flags that configure the agent. Explicit flags override values from
/// `--config`, which override the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct AgentArgs {
    /// JSON file with agent settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where the value table is stored
    #[arg(long, short = 's')]
    pub storage: Option<PathBuf>,

    /// Initial exploration rate
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Exploration floor
    #[arg(long)]
    pub epsilon_min: Option<f64>,

    /// Multiplicative exploration decay per resolved hand
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Learning rate
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    pub fn to_config(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => AgentConfig::default(),
        };

        if let Some(storage) = &self.storage {
            config.storage = storage.clone();
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
            // Lowering the start without naming a floor pulls the floor down too.
            if self.epsilon_min.is_none() {
                config.epsilon_min = config.epsilon_min.min(epsilon);
            }
        }
        if let Some(epsilon_min) = self.epsilon_min {
            config.epsilon_min = epsilon_min;
        }
        if let Some(decay) = self.epsilon_decay {
            config.epsilon_decay = decay;
        }
        if let Some(alpha) = self.alpha {
            config.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.discount_factor = gamma;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate().context("Invalid agent settings")?;
        Ok(config)
    }
}
