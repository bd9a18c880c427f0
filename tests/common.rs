//! Common test doubles for the rlcore test suite.
//!
//! Deterministic environments and a scripted agent used across multiple
//! integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rlcore::{
    Action, Agent, EnvInfo, Environment, Result, State, Step, Transition,
    ports::Callback,
};

/// Deterministic chain MDP over states `0..n_states`.
///
/// Action 1 moves right, action 0 stays put. Reaching the final state is
/// absorbing and pays reward 1.0; every other transition pays 0.0.
pub struct ChainEnv {
    n_states: usize,
    horizon: usize,
    gamma: f64,
    state: State,
}

impl ChainEnv {
    pub fn new(n_states: usize, horizon: usize) -> Self {
        Self {
            n_states,
            horizon,
            gamma: 0.9,
            state: 0,
        }
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }
}

impl Environment for ChainEnv {
    fn reset(&mut self, initial_state: Option<State>) -> State {
        self.state = initial_state.unwrap_or(0);
        self.state
    }

    fn step(&mut self, action: Action) -> Step {
        let next_state = if action == 1 {
            (self.state + 1).min(self.n_states - 1)
        } else {
            self.state
        };
        let absorbing = next_state == self.n_states - 1;
        let reward = if absorbing && next_state != self.state {
            1.0
        } else {
            0.0
        };
        self.state = next_state;
        Step {
            next_state,
            reward,
            absorbing,
        }
    }

    fn info(&self) -> EnvInfo {
        EnvInfo {
            state_space_size: self.n_states,
            action_space_size: 2,
            gamma: self.gamma,
            horizon: self.horizon,
        }
    }
}

/// Environment that never declares an absorbing state; the only episode
/// boundary is the loop's horizon. States cycle modulo `n_states`.
pub struct FreeRunEnv {
    n_states: usize,
    horizon: usize,
    state: State,
    pub resets: usize,
}

impl FreeRunEnv {
    pub fn new(n_states: usize, horizon: usize) -> Self {
        Self {
            n_states,
            horizon,
            state: 0,
            resets: 0,
        }
    }
}

impl Environment for FreeRunEnv {
    fn reset(&mut self, initial_state: Option<State>) -> State {
        self.resets += 1;
        self.state = initial_state.unwrap_or(0);
        self.state
    }

    fn step(&mut self, _action: Action) -> Step {
        self.state = (self.state + 1) % self.n_states;
        Step {
            next_state: self.state,
            reward: 0.0,
            absorbing: false,
        }
    }

    fn info(&self) -> EnvInfo {
        EnvInfo {
            state_space_size: self.n_states,
            action_space_size: 2,
            gamma: 1.0,
            horizon: self.horizon,
        }
    }
}

/// Scripted agent that always plays the same action and records the
/// calls it receives.
pub struct ScriptedAgent {
    pub action: Action,
    pub episode_starts: usize,
    pub fit_calls: Vec<usize>,
    pub draws: usize,
}

impl ScriptedAgent {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            episode_starts: 0,
            fit_calls: Vec::new(),
            draws: 0,
        }
    }
}

impl Agent for ScriptedAgent {
    fn initialize(&mut self, _info: &EnvInfo) {}

    fn draw_action(&mut self, _state: State) -> Result<Action> {
        self.draws += 1;
        Ok(self.action)
    }

    fn fit(&mut self, dataset: &[Transition], _n_fit_steps: usize) -> Result<()> {
        self.fit_calls.push(dataset.len());
        Ok(())
    }

    fn episode_start(&mut self) -> Result<()> {
        self.episode_starts += 1;
        Ok(())
    }
}

/// Callback that appends its tag to a shared log on every invocation,
/// for asserting registration order.
pub struct TagCallback {
    tag: usize,
    log: Arc<Mutex<Vec<usize>>>,
}

impl TagCallback {
    pub fn new(tag: usize, log: Arc<Mutex<Vec<usize>>>) -> Self {
        Self { tag, log }
    }
}

impl Callback for TagCallback {
    fn call(&mut self, _dataset: &[Transition]) -> Result<()> {
        self.log.lock().unwrap().push(self.tag);
        Ok(())
    }
}
