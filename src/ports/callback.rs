//! Callback port - abstraction for per-iteration data consumers
//!
//! Callbacks allow composable data collection during learning without
//! coupling the interaction loop to specific output formats or metrics.

use crate::{error::Result, types::Transition};

/// Callback trait for observing learning iterations
///
/// Registered callbacks are invoked once per learning iteration, in
/// registration order, after the agent has been fit on the iteration's
/// dataset.
///
/// # Examples
///
/// ```no_run
/// use rlcore::{Result, Transition, ports::Callback};
///
/// struct StepCounter {
///     steps: usize,
/// }
///
/// impl Callback for StepCounter {
///     fn call(&mut self, dataset: &[Transition]) -> Result<()> {
///         self.steps += dataset.len();
///         Ok(())
///     }
/// }
/// ```
pub trait Callback {
    /// Consume the dataset collected in one learning iteration.
    fn call(&mut self, dataset: &[Transition]) -> Result<()>;
}
