//! Application layer with dependency injection container.
//!
//! The [`App`] owns the storage adapter and builds agents from an
//! [`AgentConfig`]. Production code uses the MessagePack file store; tests
//! swap in the in-memory repository.
//!
//! # Usage
//!
//! ## Production
//!
//! ```no_run
//! use blackjack::app::{App, AgentConfig};
//!
//! let app = App::new();
//! let agent = app.create_agent(AgentConfig::default().with_seed(42))?;
//! # Ok::<(), blackjack::Error>(())
//! ```
//!
//! ## Testing
//!
//! ```
//! use blackjack::app::App;
//! use blackjack::adapters::InMemoryRepository;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
