//! Q-learning for Blackjack decisions
//!
//! The agent keeps one pair of action values per [`State`](crate::State)
//! and improves them with one-step temporal difference updates. Each update
//! bootstraps off the greedy value of the successor state, which makes this
//! off-policy control: the policy being learned is the greedy one even while
//! the agent explores with ε-greedy selection.
//!
//! ## Update rule
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ Q(s', argmax_a' Q(s',a')) - Q(s,a)]
//! ```
//!
//! Hand resolutions are treated as one-step episodes whose successor is the
//! decision state itself, so terminal rewards contract the value toward
//! `r / (1 - γ)`.
//!
//! ## Usage Example
//!
//! ```no_run
//! use blackjack::{AgentConfig, App, State};
//!
//! let app = App::new();
//! let mut agent = app.create_agent(AgentConfig::default().with_seed(7))?;
//!
//! let state = State::from_tokens(["10", "6"], "K")?;
//! let decision = agent.get_action(&state);
//! agent.update(&state, decision.action(), -10.0, &state);
//! agent.decay_epsilon();
//! agent.save()?;
//! # Ok::<(), blackjack::Error>(())
//! ```

pub mod action;
pub mod agent;
pub mod q_table;
pub mod serialization;
pub mod shared;

// Public re-exports
pub use action::{Action, Decision};
pub use agent::BlackjackAgent;
pub use q_table::{ActionValues, QTable};
pub use serialization::SavedQTable;
pub use shared::SharedAgent;
