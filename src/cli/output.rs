//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{cards::Rank, hand::HandComposition};

/// Create a progress bar for training
pub fn create_training_progress(total_hands: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_hands);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} hands ({msg})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    pb.set_style(style);
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a composition as its cards, e.g. `6 10` or `9 A A`.
pub fn format_composition(composition: &HandComposition) -> String {
    let mut cards: Vec<&str> = Vec::new();
    for (rank, count) in composition.iter() {
        cards.extend(std::iter::repeat_n(rank.token(), count as usize));
    }
    cards.join(" ")
}

/// Render a card list as comma-separated tokens.
pub fn format_cards(cards: &[Rank]) -> String {
    cards
        .iter()
        .map(|card| card.token())
        .collect::<Vec<_>>()
        .join(", ")
}
