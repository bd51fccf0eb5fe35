//! CLI infrastructure for the blackjack agent
//!
//! Interactive play, one-shot JSON requests against a stored table, and
//! simulated self-play training.

pub mod commands;
pub mod config;
pub mod output;
