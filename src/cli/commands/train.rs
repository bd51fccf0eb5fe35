//! Train command - self-play against the simulated dealer

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::to_writer_pretty;

use crate::{
    app::App,
    cli::{
        config::AgentArgs,
        output::{create_training_progress, format_number, print_kv, print_section},
    },
    game::Simulator,
};

#[derive(Parser, Debug)]
#[command(about = "Train the agent against an infinite-deck dealer")]
pub struct TrainArgs {
    /// Number of hands to play
    #[arg(long, short = 'n', default_value_t = 10_000)]
    pub hands: usize,

    /// Ignore any stored table and start from scratch
    #[arg(long)]
    pub fresh: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.agent.to_config()?;
    let seed = config.seed;
    let mut agent = App::new()
        .create_agent(config)
        .context("Failed to create agent")?;
    if args.fresh {
        agent.reset();
    }

    let pb = (!args.no_progress).then(|| create_training_progress(args.hands as u64));
    let mut simulator = Simulator::new(seed.map(|s| s.wrapping_add(1)));
    let summary = simulator.train(&mut agent, args.hands, |running| {
        if let Some(pb) = &pb {
            pb.inc(1);
            if running.hands.is_multiple_of(100) {
                pb.set_message(format!("win {:.1}%", running.win_rate() * 100.0));
            }
        }
    })?;
    if let Some(pb) = &pb {
        pb.finish_with_message(format!(
            "W:{} L:{} D:{} B:{} BJ:{}",
            summary.wins, summary.losses, summary.draws, summary.busts, summary.blackjacks
        ));
    }

    agent.save().context("Failed to save value table")?;

    print_section("Training Summary");
    print_kv("Hands", &format_number(summary.hands));
    print_kv("Win rate", &format!("{:.1}%", summary.win_rate() * 100.0));
    print_kv("Bust rate", &format!("{:.1}%", summary.bust_rate() * 100.0));
    print_kv("Average reward", &format!("{:.3}", summary.average_reward()));
    print_kv("States learned", &format_number(agent.q_table().len()));
    print_kv("Final epsilon", &format!("{:.4}", agent.epsilon()));
    print_kv("Saved to", &agent.storage().display().to_string());

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        to_writer_pretty(file, &summary).context("Failed to write summary")?;
    }

    Ok(())
}
