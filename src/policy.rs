//! Shipped policy adapters
//!
//! Concrete policies implementing the [`Policy`] port. Randomness lives
//! here and nowhere else in the crate.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    ports::Policy,
    table::Table,
    types::{Action, State},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// ε-greedy policy: explore uniformly with probability ε, otherwise act
/// greedily on the current value estimates
#[derive(Debug)]
pub struct EpsilonGreedy {
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Create an ε-greedy policy with a nondeterministic seed
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            rng: build_rng(None),
        }
    }

    /// Seed the policy's random number generator for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }
}

impl Policy for EpsilonGreedy {
    fn draw_action(&mut self, q: &Table, state: State) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            self.rng.random_range(0..q.n_actions())
        } else {
            q.greedy_action(state)
        }
    }
}

/// Purely greedy policy; useful for evaluation runs
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Policy for Greedy {
    fn draw_action(&mut self, q: &Table, state: State) -> Action {
        q.greedy_action(state)
    }
}
