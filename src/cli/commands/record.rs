//! Record command - apply one observed outcome to the stored table

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use crate::{
    app::App,
    cli::config::AgentArgs,
    protocol::{UpdateRequest, parse_request},
    q_learning::BlackjackAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Record state, action, reward and next state read as JSON, then save")]
pub struct RecordArgs {
    /// File holding the update request; reads stdin when omitted
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub agent: AgentArgs,
}

/// Read a request body from a file, or from stdin when no path is given.
pub(crate) fn read_body(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read stdin")?;
            Ok(body)
        }
    }
}

pub fn execute(args: RecordArgs) -> Result<()> {
    let body = read_body(args.input.as_deref())?;
    let mut agent = App::new()
        .create_agent(args.agent.to_config()?)
        .context("Failed to create agent")?;
    apply(&mut agent, &body)?;

    println!("{}", json!({ "message": "Q-value updated successfully" }));
    Ok(())
}

/// Apply one update request, decay epsilon and save the table.
pub fn apply(agent: &mut BlackjackAgent, body: &str) -> Result<()> {
    let request: UpdateRequest = parse_request(body).context("Invalid update request")?;
    agent.update(
        &request.state,
        request.learnable_action(),
        request.reward,
        &request.next_state,
    );
    agent.decay_epsilon();
    agent.save().context("Failed to save value table")
}
