//! SARSA(λ) - on-policy TD control with eligibility traces

use log::debug;

use crate::{
    checkpoint::Snapshot,
    error::Result,
    params::LearningRate,
    ports::{Agent, Policy},
    table::Table,
    trace::{EligibilityTrace, TraceKind},
    types::{Action, EnvInfo, State, Transition},
};

/// SARSA(λ) agent for finite MDPs
///
/// Owns the value table and the eligibility trace exclusively; no other
/// component reads or writes them during learning. The bootstrap action
/// is drawn from the current policy at the *next* state (on-policy),
/// recorded, and replayed by the next [`draw_action`] call so the
/// action executed in the environment is the one that formed the
/// target.
///
/// The per-transition update, given `(s, a, r, s', absorbing)`:
///
/// ```text
/// δ     = r + γ·Q(s', a') - Q(s, a)      a' ~ π(s');  Q(s', a') = 0 if absorbing
/// e(s, a) updated per trace variant
/// Q    += α(s, a) · δ · e                broadcast over the whole trace
/// e    *= γλ                             decay after the update
/// ```
///
/// Numeric degeneration (NaN/Inf reaching the table) is not guarded
/// against.
///
/// [`draw_action`]: Agent::draw_action
pub struct SarsaLambda {
    q: Table,
    trace: EligibilityTrace,
    policy: Box<dyn Policy>,
    learning_rate: Box<dyn LearningRate>,
    gamma: f64,
    lambda: f64,
    trace_kind: TraceKind,
    next_action: Option<Action>,
}

impl SarsaLambda {
    /// Create a SARSA(λ) agent.
    ///
    /// The table and trace are sized when the interaction loop calls
    /// [`initialize`](Agent::initialize); γ is taken from the
    /// environment's declared info at the same point.
    pub fn new(
        policy: Box<dyn Policy>,
        learning_rate: Box<dyn LearningRate>,
        lambda: f64,
        trace_kind: TraceKind,
    ) -> Self {
        Self {
            q: Table::new(0, 0),
            trace: EligibilityTrace::new(0, 0, trace_kind),
            policy,
            learning_rate,
            gamma: 0.0,
            lambda,
            trace_kind,
            next_action: None,
        }
    }

    /// Read-only view of the value table
    pub fn q(&self) -> &Table {
        &self.q
    }

    /// Read-only view of the eligibility trace
    pub fn trace(&self) -> &EligibilityTrace {
        &self.trace
    }

    /// Export the table and trace as named arrays
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert("q", self.q.values().clone());
        snapshot.insert("trace", self.trace.weights().clone());
        snapshot
    }

    /// Restore the table and trace from a snapshot.
    ///
    /// # Errors
    ///
    /// Fails if either array is missing or its shape does not match the
    /// initialized shape.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let q = snapshot.get_with_shape("q", self.q.values().dim())?;
        let trace = snapshot.get_with_shape("trace", self.trace.weights().dim())?;
        self.q.values_mut().assign(q);
        self.trace = EligibilityTrace::from_weights(trace.clone(), self.trace_kind);
        self.next_action = None;
        Ok(())
    }

    fn update(&mut self, t: &Transition) {
        let q_current = self.q.get(t.state, t.action);

        // On-policy bootstrap: the action actually selected by the
        // current policy, not the best possible one.
        let next_action = self.policy.draw_action(&self.q, t.next_state);
        self.next_action = Some(next_action);

        // An absorbing state has no continuation value; the table must
        // not be read in that case.
        let q_next = if t.absorbing {
            0.0
        } else {
            self.q.get(t.next_state, next_action)
        };

        let delta = t.reward + self.gamma * q_next - q_current;
        self.trace.update(t.state, t.action);

        let alpha = self.learning_rate.alpha(t.state, t.action);
        self.q.values_mut().scaled_add(alpha * delta, self.trace.weights());

        // Decay after the update, so the pair just visited starts its
        // decay from its just-set value.
        self.trace.decay(self.gamma * self.lambda);

        debug!(
            "sarsa(λ) update: s={} a={} r={} delta={delta}",
            t.state, t.action, t.reward
        );
    }
}

impl Agent for SarsaLambda {
    fn initialize(&mut self, info: &EnvInfo) {
        // Idempotent: re-initializing against the same spaces keeps the
        // learned values, so a trained agent can be driven by a fresh
        // loop for evaluation.
        if self.q.n_states() != info.state_space_size
            || self.q.n_actions() != info.action_space_size
        {
            self.q = Table::from_info(info);
            self.trace = EligibilityTrace::new(
                info.state_space_size,
                info.action_space_size,
                self.trace_kind,
            );
        }
        self.gamma = info.gamma;
        self.next_action = None;
    }

    fn draw_action(&mut self, state: State) -> Result<Action> {
        match self.next_action.take() {
            Some(action) => Ok(action),
            None => Ok(self.policy.draw_action(&self.q, state)),
        }
    }

    fn fit(&mut self, dataset: &[Transition], n_fit_steps: usize) -> Result<()> {
        for _ in 0..n_fit_steps {
            for transition in dataset {
                self.update(transition);
            }
        }
        Ok(())
    }

    fn episode_start(&mut self) -> Result<()> {
        self.trace.reset();
        // Drop any action cached past an episode boundary; the first
        // action of the new episode comes fresh from the policy.
        self.next_action = None;
        Ok(())
    }
}
