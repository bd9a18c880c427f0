//! Value table for tabular temporal difference learning

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::{Action, EnvInfo, State};

/// Fixed-shape table mapping (state, action) pairs to value estimates
///
/// Constructed zero-initialized for a given state/action space size.
/// The shape never changes after construction; the owning algorithm
/// mutates values in place, either pointwise or through the bulk view
/// used by the fused trace update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    values: Array2<f64>,
}

impl Table {
    /// Create a zero-initialized table for the given space sizes
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        Self {
            values: Array2::zeros((n_states, n_actions)),
        }
    }

    /// Create a zero-initialized table shaped for an environment
    pub fn from_info(info: &EnvInfo) -> Self {
        Self::new(info.state_space_size, info.action_space_size)
    }

    /// Get the value for a state-action pair
    pub fn get(&self, state: State, action: Action) -> f64 {
        self.values[[state, action]]
    }

    /// Set the value for a state-action pair
    pub fn set(&mut self, state: State, action: Action, value: f64) {
        self.values[[state, action]] = value;
    }

    /// Number of states
    pub fn n_states(&self) -> usize {
        self.values.nrows()
    }

    /// Number of actions
    pub fn n_actions(&self) -> usize {
        self.values.ncols()
    }

    /// Bulk read-only view of the values
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Bulk mutable view of the values, for vectorized updates
    pub fn values_mut(&mut self) -> &mut Array2<f64> {
        &mut self.values
    }

    /// Maximum value over all actions in a state
    pub fn max_over_actions(&self, state: State) -> f64 {
        self.values
            .row(state)
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &q| acc.max(q))
    }

    /// Action with the highest value in a state; ties resolve to the
    /// lowest action index
    pub fn greedy_action(&self, state: State) -> Action {
        let row = self.values.row(state);
        let mut best = 0;
        for (action, &q) in row.iter().enumerate() {
            if q > row[best] {
                best = action;
            }
        }
        best
    }
}
