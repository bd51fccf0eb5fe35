//! Play command - interactive hands with cards entered by the player

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cards::{Rank, parse_cards},
    cli::{config::AgentArgs, output::format_cards},
    game::{Outcome, Round, Step},
    q_learning::BlackjackAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Play hands interactively; the table is saved on exit")]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.agent.to_config()?;
    let mut agent = App::new()
        .create_agent(config)
        .context("Failed to create agent")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut agent, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Run the prompt loop until the player types `exit` or input ends, then save
/// the table. Returns the number of resolved hands.
pub fn run_session<R: BufRead, W: Write>(
    agent: &mut BlackjackAgent,
    mut input: R,
    mut output: W,
) -> Result<usize> {
    let mut hands = 0;

    while let Some(FinishedHand { round, outcome }) = play_hand(agent, &mut input, &mut output)? {
        let reward = round.resolve(agent, outcome)?;
        writeln!(output, "{}", outcome.remark(&mut rand::rng()))?;
        writeln!(output, "Reward: {reward}")?;
        hands += 1;
    }

    writeln!(output, "Saving progress and exiting the game.")?;
    agent.save().context("Failed to save value table")?;
    Ok(hands)
}

struct FinishedHand {
    round: Round,
    outcome: Outcome,
}

/// Play one hand up to its outcome. `None` means the player quit.
fn play_hand<R: BufRead, W: Write>(
    agent: &mut BlackjackAgent,
    input: &mut R,
    output: &mut W,
) -> Result<Option<FinishedHand>> {
    let Some(cards) = read_cards(input, output)? else {
        return Ok(None);
    };
    let Some(dealer_card) =
        read_rank(input, output, "Enter dealer's face-up card (e.g., K): ")?
    else {
        return Ok(None);
    };

    writeln!(output, "Your cards: {}", format_cards(&cards))?;
    writeln!(output, "Dealer's card: {dealer_card}")?;

    let mut round = Round::deal(cards, dealer_card);
    let outcome = loop {
        writeln!(output, "Your hand value: {}", round.state().hand_value)?;
        match round.step(agent) {
            Step::BlackJack => {
                writeln!(output, "BlackJack babyyy!!!")?;
                break Outcome::BlackJack;
            }
            Step::Bust => {
                writeln!(output, "You busted! Game over!")?;
                break Outcome::Bust;
            }
            Step::Hit => {
                writeln!(output, "Agent decides to: Hit")?;
                let Some(card) =
                    read_rank(input, output, "Enter the card you drew (e.g., 7): ")?
                else {
                    return Ok(None);
                };
                round.hit(card);
                writeln!(output, "New card drawn: {card}")?;
            }
            Step::Stand => {
                writeln!(output, "Agent decides to: Stand")?;
                let Some(outcome) = read_result(input, output)? else {
                    return Ok(None);
                };
                break outcome;
            }
        }
    };

    Ok(Some(FinishedHand { round, outcome }))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<W: Write>(output: &mut W, text: &str) -> Result<()> {
    write!(output, "{text}")?;
    output.flush()?;
    Ok(())
}

fn read_cards<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Vec<Rank>>> {
    loop {
        prompt(output, "Enter your cards (e.g., 10, 6 or 'exit' to quit): ")?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("exit") {
            return Ok(None);
        }

        let tokens: Vec<&str> = line.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
        match parse_cards(&tokens) {
            Ok(cards) if !cards.is_empty() => return Ok(Some(cards)),
            Ok(_) => writeln!(output, "Invalid input. Please enter at least one card.")?,
            Err(e) => writeln!(
                output,
                "Invalid input ({e}). Please enter the cards in the correct format."
            )?,
        }
    }
}

fn read_rank<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<Rank>> {
    loop {
        prompt(output, message)?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(rank) => return Ok(Some(rank)),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

fn read_result<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Outcome>> {
    prompt(output, "Enter the game result ('win', 'loss', or 'draw'): ")?;
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse::<Outcome>() {
            Ok(outcome @ (Outcome::Win | Outcome::Loss | Outcome::Draw)) => {
                return Ok(Some(outcome));
            }
            _ => prompt(output, "Invalid result. Please enter 'win', 'loss', or 'draw': ")?,
        }
    }
}
