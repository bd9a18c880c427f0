//! Environment port - abstraction over the MDP the agent interacts with

use crate::types::{Action, EnvInfo, State};

/// Result of advancing the environment by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// State reached after the action
    pub next_state: State,
    /// Scalar reward for the transition
    pub reward: f64,
    /// Whether the reached state is terminal per environment dynamics
    pub absorbing: bool,
}

/// Environment trait - the MDP capability set consumed by the
/// interaction loop
///
/// The loop never inspects environment internals; it only resets,
/// steps, and reads the declared [`EnvInfo`]. Horizon enforcement is
/// the loop's job, not the environment's: an environment reports
/// `absorbing` from its own dynamics and nothing else.
pub trait Environment {
    /// Reset the environment and return the starting state.
    ///
    /// When `initial_state` is given, the environment must restart in
    /// exactly that state. Used by policy evaluation from chosen
    /// starting points.
    fn reset(&mut self, initial_state: Option<State>) -> State;

    /// Advance one tick with the given action.
    fn step(&mut self, action: Action) -> Step;

    /// Static description of the state/action spaces, discount factor,
    /// and horizon.
    fn info(&self) -> EnvInfo;

    /// Render the current state, if the environment supports it.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn render(&mut self) {}
}
