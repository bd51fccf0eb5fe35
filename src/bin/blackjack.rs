//! Blackjack agent CLI
//!
//! - Playing hands interactively with a learning agent
//! - Answering single decide/record requests as JSON
//! - Self-play training against a simulated dealer
//! - Inspecting the stored value table

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use blackjack::cli::commands::{decide, hand, inspect, play, record, train};

#[derive(Parser)]
#[command(name = "blackjack")]
#[command(version, about = "Q-learning agent for Blackjack Hit/Stand decisions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play hands interactively
    Play(play::PlayArgs),

    /// Evaluate cards into a state record
    Hand(hand::HandArgs),

    /// Choose an action for a state
    Decide(decide::DecideArgs),

    /// Record an outcome and save the table
    Record(record::RecordArgs),

    /// Train against a simulated dealer
    Train(train::TrainArgs),

    /// Summarize the stored table
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "blackjack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::execute(args),
        Commands::Hand(args) => hand::execute(args),
        Commands::Decide(args) => decide::execute(args),
        Commands::Record(args) => record::execute(args),
        Commands::Train(args) => train::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}
