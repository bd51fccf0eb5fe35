//! Dependency injection container.

use std::sync::Arc;

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::TableRepository,
    q_learning::{BlackjackAgent, SharedAgent},
};

/// Application with dependency injection.
///
/// Owns the table repository and wires it into every agent it creates.
///
/// # Examples
///
/// ```
/// use blackjack::app::{App, AgentConfig};
/// use blackjack::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .build();
/// let agent = app.create_agent(AgentConfig::default())?;
/// assert!(agent.q_table().is_empty());
/// # Ok::<(), blackjack::Error>(())
/// ```
pub struct App {
    /// Repository for table persistence
    table_repository: Arc<dyn TableRepository>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - `MsgPackRepository` for table persistence
    /// - No default seed (non-deterministic RNG)
    pub fn new() -> Self {
        Self {
            table_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn table_repository(&self) -> Arc<dyn TableRepository> {
        Arc::clone(&self.table_repository)
    }

    /// Create an agent and restore its table from the configured storage
    /// location. A missing table is not an error; the agent starts empty.
    ///
    /// The config's seed takes precedence over the app's default seed.
    pub fn create_agent(&self, mut config: AgentConfig) -> Result<BlackjackAgent> {
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        BlackjackAgent::open(config, self.table_repository())
    }

    /// Create an agent behind a lock, for hosts serving concurrent callers.
    pub fn create_shared_agent(&self, config: AgentConfig) -> Result<SharedAgent> {
        Ok(SharedAgent::new(self.create_agent(config)?))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`App`] with custom dependencies.
pub struct AppBuilder {
    table_repository: Option<Arc<dyn TableRepository>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            table_repository: None,
            default_seed: None,
        }
    }

    /// Use a custom table repository.
    pub fn with_repository<R: TableRepository + 'static>(mut self, repository: R) -> Self {
        self.table_repository = Some(Arc::new(repository));
        self
    }

    /// Seed used for agents whose config carries none.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Falls back to `MsgPackRepository` if no repository was
    /// provided.
    pub fn build(self) -> App {
        App {
            table_repository: self
                .table_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{adapters::InMemoryRepository, error::Error, state::State};

    #[test]
    fn test_create_agent_restores_saved_table() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing().with_repository(repo.clone()).build();
        let config = AgentConfig::default().with_storage("table");

        let mut first = app.create_agent(config.clone()).unwrap();
        first.best_action(&State::from_tokens(["6", "6"], "2").unwrap());
        first.save().unwrap();

        let second = app.create_agent(config).unwrap();
        assert_eq!(second.q_table(), first.q_table());
        assert!(repo.contains(Path::new("table")));
    }

    #[test]
    fn test_create_agent_fails_on_corrupt_table() {
        let repo = InMemoryRepository::new();
        repo.insert_raw(Path::new("table"), b"garbage".to_vec())
            .unwrap();
        let app = App::for_testing().with_repository(repo).build();

        let result = app.create_agent(AgentConfig::default().with_storage("table"));
        assert!(matches!(result, Err(Error::StorageCorrupt { .. })));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let result = app.create_agent(AgentConfig::default().with_learning_rate(2.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }
}
