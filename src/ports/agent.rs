//! Agent port - abstraction for different learning algorithms
//!
//! This port defines the interface that all agents must implement,
//! allowing the interaction loop to drive any algorithm family that
//! exposes action selection, fitting, and episode-lifecycle hooks.

use crate::{
    error::Result,
    types::{Action, EnvInfo, State, Transition},
};

/// Agent trait - Unified interface for learning algorithms
///
/// The interaction loop drives agents exclusively through this
/// capability set. TD control algorithms ([`SarsaLambda`], [`QLearning`])
/// are shipped implementations; anything satisfying the contract can be
/// plugged in.
///
/// # Lifecycle
///
/// 1. `initialize(env_info)` - once, before any interaction
/// 2. For each episode:
///    - `episode_start()` - before the first transition is processed
///    - `draw_action(state)` - once per step
/// 3. `fit(dataset, n_fit_steps)` - once per learning iteration
///
/// [`SarsaLambda`]: crate::td::SarsaLambda
/// [`QLearning`]: crate::td::QLearning
pub trait Agent {
    /// Size the agent's internal structures for the given environment.
    ///
    /// Called once by the interaction loop at construction, before any
    /// stepping occurs.
    fn initialize(&mut self, info: &EnvInfo);

    /// Select an action for the given state.
    fn draw_action(&mut self, state: State) -> Result<Action>;

    /// Update the agent from a dataset of collected transitions.
    ///
    /// `n_fit_steps` is the number of fitting passes requested by the
    /// caller; online TD algorithms are normally driven with datasets
    /// of a single transition and one pass.
    fn fit(&mut self, dataset: &[Transition], n_fit_steps: usize) -> Result<()>;

    /// Hook invoked at the start of every episode, before the first
    /// transition of that episode is processed.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for algorithms without per-episode state.
    fn episode_start(&mut self) -> Result<()> {
        Ok(())
    }
}
