//! Inspect command - summarize a stored value table

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::AgentArgs,
        output::{format_composition, format_number, print_kv, print_section},
    },
    q_learning::{Action, SavedQTable},
};

#[derive(Parser, Debug)]
#[command(about = "Summarize the stored value table")]
pub struct InspectArgs {
    /// Number of most decisive states to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Dump every entry as JSON instead
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let agent = App::new()
        .create_agent(args.agent.to_config()?)
        .context("Failed to load value table")?;
    let table = agent.q_table();

    if args.json {
        let saved = SavedQTable::new(table, agent.epsilon());
        serde_json::to_writer_pretty(io::stdout().lock(), &saved)?;
        println!();
        return Ok(());
    }

    let prefers_stand = table
        .iter()
        .filter(|(_, values)| values.best() == Action::Stand)
        .count();

    print_section("Value Table");
    print_kv("Location", &agent.storage().display().to_string());
    print_kv("States", &format_number(table.len()));
    print_kv("Epsilon", &format!("{:.4}", agent.epsilon()));
    print_kv("Greedy Hit", &format_number(table.len() - prefers_stand));
    print_kv("Greedy Stand", &format_number(prefers_stand));

    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by(|(_, a), (_, b)| (b.hit - b.stand).abs().total_cmp(&(a.hit - a.stand).abs()));

    if !entries.is_empty() {
        println!();
        println!(
            "  {:<18} {:>5} {:>5} {:>6} {:>9} {:>9}",
            "hand", "total", "soft", "dealer", "Hit", "Stand"
        );
        for (state, values) in entries.into_iter().take(args.top) {
            println!(
                "  {:<18} {:>5} {:>5} {:>6} {:>9.3} {:>9.3}",
                format_composition(&state.hand),
                state.hand_value,
                state.soft,
                state.dealer_card.token(),
                values.hit,
                values.stand
            );
        }
    }

    Ok(())
}
