//! Hand command - turn raw cards into a state record

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use crate::protocol::HandRequest;

#[derive(Parser, Debug)]
#[command(about = "Evaluate a hand and print its state as JSON")]
pub struct HandArgs {
    /// Player cards, separated by spaces or commas (e.g. `10,6` or `A K`)
    #[arg(required = true)]
    pub cards: Vec<String>,

    /// Dealer's face-up card
    #[arg(long, short = 'd')]
    pub dealer: String,
}

impl HandArgs {
    fn to_request(&self) -> HandRequest {
        let cards = self
            .cards
            .iter()
            .flat_map(|arg| arg.split(','))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        HandRequest {
            cards,
            dealer_card: self.dealer.clone(),
        }
    }
}

pub fn execute(args: HandArgs) -> Result<()> {
    let state = args.to_request().to_state().context("Invalid hand")?;
    serde_json::to_writer_pretty(io::stdout().lock(), &state)?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_may_mix_commas_and_spaces() {
        let args = HandArgs::parse_from(["hand", "A,", "9", "a", "--dealer", "k"]);
        let state = args.to_request().to_state().unwrap();
        assert_eq!(state.hand_value, 21);
        assert!(state.soft);
        assert_eq!(state.card_count(), 3);
    }
}
