//! Playing hands against the agent
//!
//! - [`Outcome`]: how a hand ended and the reward it pays
//! - [`Round`]: drives one hand through the decide/draw/resolve cycle
//! - [`Simulator`]: infinite-deck dealer used for self-play training

pub mod outcome;
pub mod round;
pub mod simulator;

pub use outcome::Outcome;
pub use round::{Round, Step};
pub use simulator::{Simulator, TrainingSummary};
