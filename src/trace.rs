//! Eligibility traces for TD(λ) credit assignment

use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    types::{Action, State},
};

/// Trace variant, selectable as a named mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Visiting a pair overwrites its weight with 1.0; weights stay in
    /// [0,1] for γ, λ ∈ [0,1]
    Replacing,
    /// Visiting a pair adds 1.0 to its weight; weights may exceed 1.0
    /// under repeated visits
    Accumulating,
}

impl FromStr for TraceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replacing" => Ok(TraceKind::Replacing),
            "accumulating" => Ok(TraceKind::Accumulating),
            other => Err(Error::ParseTraceKind {
                input: other.to_string(),
                expected: "replacing, accumulating".to_string(),
            }),
        }
    }
}

/// Decaying per-pair credit weights, same shape as the value table
///
/// Invariant: all-zero at the start of every episode; [`reset`] must be
/// called before the first transition of an episode is processed. Decay
/// is not applied here on visitation; the owning algorithm applies it
/// as a separate fused step via [`decay`].
///
/// [`reset`]: EligibilityTrace::reset
/// [`decay`]: EligibilityTrace::decay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityTrace {
    weights: Array2<f64>,
    kind: TraceKind,
}

impl EligibilityTrace {
    /// Create an all-zero trace for the given space sizes
    pub fn new(n_states: usize, n_actions: usize, kind: TraceKind) -> Self {
        Self {
            weights: Array2::zeros((n_states, n_actions)),
            kind,
        }
    }

    /// Rebuild a trace from an existing weight array, e.g. when
    /// restoring a snapshot
    pub fn from_weights(weights: Array2<f64>, kind: TraceKind) -> Self {
        Self { weights, kind }
    }

    /// Zero all entries
    pub fn reset(&mut self) {
        self.weights.fill(0.0);
    }

    /// Record a visitation of `(state, action)` per the trace variant
    pub fn update(&mut self, state: State, action: Action) {
        match self.kind {
            TraceKind::Replacing => self.weights[[state, action]] = 1.0,
            TraceKind::Accumulating => self.weights[[state, action]] += 1.0,
        }
    }

    /// Scale every weight by `factor` (the algorithm's γλ decay step)
    pub fn decay(&mut self, factor: f64) {
        self.weights *= factor;
    }

    /// Weight for a single pair
    pub fn get(&self, state: State, action: Action) -> f64 {
        self.weights[[state, action]]
    }

    /// Full weight array, for the fused decay-and-update step
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// The variant this trace was constructed with
    pub fn kind(&self) -> TraceKind {
        self.kind
    }
}
