//! Core data types shared across the crate

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Index into the environment's discrete state space
pub type State = usize;

/// Index into the environment's discrete action space
pub type Action = usize;

/// A single environment transition.
///
/// `absorbing` means the environment declared terminal dynamics; `last`
/// means the episode ended for *any* reason (absorbing or the step count
/// reached the horizon). The distinction is load-bearing: only
/// `absorbing` zeroes the bootstrap target, while `last` merely ends
/// data collection for the episode. Horizon-truncated episodes still
/// bootstrap from the next state's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub action: Action,
    pub reward: f64,
    pub next_state: State,
    pub absorbing: bool,
    pub last: bool,
}

/// Chronologically ordered sequence of transitions; never reordered
pub type Dataset = Vec<Transition>;

/// Static description of an environment, as declared by the environment
/// itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvInfo {
    /// Number of discrete states
    pub state_space_size: usize,
    /// Number of discrete actions
    pub action_space_size: usize,
    /// Discount factor γ
    pub gamma: f64,
    /// Maximum steps per episode enforced by the interaction loop
    pub horizon: usize,
}

/// Unit of collection for a single iteration of the interaction loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterateOver {
    /// Collect a fixed number of single steps
    Samples,
    /// Collect a fixed number of whole episodes
    Episodes,
}

impl FromStr for IterateOver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "samples" => Ok(IterateOver::Samples),
            "episodes" => Ok(IterateOver::Episodes),
            other => Err(Error::ParseIterateOver {
                input: other.to_string(),
                expected: "samples, episodes".to_string(),
            }),
        }
    }
}

impl fmt::Display for IterateOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterateOver::Samples => write!(f, "samples"),
            IterateOver::Episodes => write!(f, "episodes"),
        }
    }
}
