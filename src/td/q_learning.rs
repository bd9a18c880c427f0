//! Q-learning - off-policy TD control
//!
//! "Learning from Delayed Rewards". Watkins C.J.C.H., 1989.

use log::debug;

use crate::{
    checkpoint::Snapshot,
    error::Result,
    params::LearningRate,
    ports::{Agent, Policy},
    table::Table,
    types::{Action, EnvInfo, State, Transition},
};

/// Q-learning agent for finite MDPs
///
/// Updates toward the maximum next-state value regardless of the action
/// actually taken, so the learned table approaches Q* while behavior
/// follows the supplied (typically exploratory) policy. Pointwise
/// update at the visited pair only; no eligibility trace.
pub struct QLearning {
    q: Table,
    policy: Box<dyn Policy>,
    learning_rate: Box<dyn LearningRate>,
    gamma: f64,
}

impl QLearning {
    pub fn new(policy: Box<dyn Policy>, learning_rate: Box<dyn LearningRate>) -> Self {
        Self {
            q: Table::new(0, 0),
            policy,
            learning_rate,
            gamma: 0.0,
        }
    }

    /// Read-only view of the value table
    pub fn q(&self) -> &Table {
        &self.q
    }

    /// Export the table as a named array
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert("q", self.q.values().clone());
        snapshot
    }

    /// Restore the table from a snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the `"q"` array is missing or its shape does not match
    /// the initialized shape.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let q = snapshot.get_with_shape("q", self.q.values().dim())?;
        self.q.values_mut().assign(q);
        Ok(())
    }

    fn update(&mut self, t: &Transition) {
        let q_current = self.q.get(t.state, t.action);

        let q_next = if t.absorbing {
            0.0
        } else {
            self.q.max_over_actions(t.next_state)
        };

        let delta = t.reward + self.gamma * q_next - q_current;
        let alpha = self.learning_rate.alpha(t.state, t.action);
        self.q.set(t.state, t.action, q_current + alpha * delta);

        debug!(
            "q-learning update: s={} a={} r={} delta={delta}",
            t.state, t.action, t.reward
        );
    }
}

impl Agent for QLearning {
    fn initialize(&mut self, info: &EnvInfo) {
        // Idempotent across loops driving the same environment.
        if self.q.n_states() != info.state_space_size
            || self.q.n_actions() != info.action_space_size
        {
            self.q = Table::from_info(info);
        }
        self.gamma = info.gamma;
    }

    fn draw_action(&mut self, state: State) -> Result<Action> {
        Ok(self.policy.draw_action(&self.q, state))
    }

    fn fit(&mut self, dataset: &[Transition], n_fit_steps: usize) -> Result<()> {
        for _ in 0..n_fit_steps {
            for transition in dataset {
                self.update(transition);
            }
        }
        Ok(())
    }
}
