//! Learning-rate schedules
//!
//! A schedule answers "what is the step size for this pair right now".
//! Schedules that decay with visitation track visit counts themselves,
//! which is why [`LearningRate::alpha`] takes `&mut self`.

use ndarray::Array2;

use crate::types::{Action, State};

/// Per-pair step-size schedule
///
/// Contract: the returned value is monotone non-increasing across
/// successive calls for the same visited pair.
pub trait LearningRate {
    /// Current step size for `(state, action)`, counting this call as a
    /// visit where the schedule decays per visit.
    fn alpha(&mut self, state: State, action: Action) -> f64;
}

/// Constant step size for every pair
#[derive(Debug, Clone, Copy)]
pub struct ConstantRate {
    value: f64,
}

impl ConstantRate {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl LearningRate for ConstantRate {
    fn alpha(&mut self, _state: State, _action: Action) -> f64 {
        self.value
    }
}

/// Per-pair decaying step size: α₀ / n(s,a)^exponent
///
/// `n(s,a)` counts visits to the pair, starting at 1 on the first call.
/// With `exponent = 1.0` this is the classic 1/n Robbins-Monro schedule.
#[derive(Debug, Clone)]
pub struct DecayingRate {
    initial: f64,
    exponent: f64,
    visits: Array2<f64>,
}

impl DecayingRate {
    pub fn new(initial: f64, exponent: f64, n_states: usize, n_actions: usize) -> Self {
        Self {
            initial,
            exponent,
            visits: Array2::zeros((n_states, n_actions)),
        }
    }
}

impl LearningRate for DecayingRate {
    fn alpha(&mut self, state: State, action: Action) -> f64 {
        self.visits[[state, action]] += 1.0;
        self.initial / self.visits[[state, action]].powf(self.exponent)
    }
}
