//! Blackjack Q-learning agent
//!
//! This crate provides:
//! - Hand evaluation (totals, soft flag, rank composition)
//! - A tabular Q-learning agent with ε-greedy Hit/Stand selection
//! - Persistence of the learned value table (MessagePack)
//! - A round protocol, reward schedule and infinite-deck simulator
//! - The `blackjack` CLI for interactive play, JSON requests and training

pub mod adapters;
pub mod app;
pub mod cards;
pub mod cli;
pub mod error;
pub mod game;
pub mod hand;
pub mod ports;
pub mod protocol;
pub mod q_learning;
pub mod state;

pub use app::{AgentConfig, App};
pub use cards::Rank;
pub use error::{Error, Result};
pub use game::{Outcome, Round, Step};
pub use hand::{HandComposition, HandEvaluation, evaluate_hand};
pub use q_learning::{Action, BlackjackAgent, Decision, SharedAgent};
pub use state::State;
