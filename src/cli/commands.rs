//! Subcommands of the `blackjack` binary

pub mod decide;
pub mod hand;
pub mod inspect;
pub mod play;
pub mod record;
pub mod train;
