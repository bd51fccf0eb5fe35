//! Request and response records for the agent's four operations.
//!
//! These are the JSON shapes a host exchanges with the agent: choose an
//! action, record an outcome, and (without a body) persist or restore the
//! table. Hand calculation turns raw card tokens into a [`State`].

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Result,
    error::Error,
    q_learning::{Action, Decision},
    state::State,
};

/// Parse a request body, reporting malformed or incomplete records as
/// [`Error::InvalidInput`].
pub fn parse_request<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::InvalidInput {
        message: e.to_string(),
    })
}

/// Body of a choose-action request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub action: Decision,
}

/// Body of a record-outcome request.
///
/// `action` may be null (or `"BlackJack"`), which records the observation
/// without changing any value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub state: State,
    #[serde(default)]
    pub action: Option<Decision>,
    pub reward: f64,
    pub next_state: State,
}

impl UpdateRequest {
    pub fn learnable_action(&self) -> Option<Action> {
        self.action.and_then(Decision::action)
    }
}

/// Body of a hand-calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRequest {
    pub cards: Vec<String>,
    pub dealer_card: String,
}

impl HandRequest {
    pub fn to_state(&self) -> Result<State> {
        State::from_tokens(&self.cards, &self.dealer_card)
    }
}
