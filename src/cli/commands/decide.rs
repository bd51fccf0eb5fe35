//! Decide command - choose an action for a state record

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{commands::record::read_body, config::AgentArgs},
    protocol::{ActionRequest, ActionResponse, parse_request},
};

#[derive(Parser, Debug)]
#[command(about = "Choose Hit, Stand or BlackJack for a state read as JSON")]
pub struct DecideArgs {
    /// File holding `{"state": {...}}`; reads stdin when omitted
    #[arg(long, short = 'i')]
    pub input: Option<std::path::PathBuf>,

    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: DecideArgs) -> Result<()> {
    let body = read_body(args.input.as_deref())?;
    let request: ActionRequest = parse_request(&body).context("Invalid action request")?;

    let mut agent = App::new()
        .create_agent(args.agent.to_config()?)
        .context("Failed to create agent")?;
    let response = ActionResponse {
        action: agent.get_action(&request.state),
    };

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
