//! Interaction loop driving an agent against an environment

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    ports::{Agent, Callback, Environment},
    types::{Dataset, IterateOver, State, Transition},
};

/// Configuration for a learning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnConfig {
    /// Number of collect-fit cycles; must be positive
    pub n_iterations: usize,

    /// Samples or episodes collected per cycle; must be positive
    pub how_many: usize,

    /// Fitting passes handed to the agent per cycle
    pub n_fit_steps: usize,

    /// Unit of collection for each cycle
    pub iterate_over: IterateOver,

    /// Whether to render the environment at every step
    pub render: bool,

    /// Whether to suppress progress output
    pub quiet: bool,
}

impl Default for LearnConfig {
    fn default() -> Self {
        Self {
            n_iterations: 1,
            how_many: 1,
            n_fit_steps: 1,
            iterate_over: IterateOver::Episodes,
            render: false,
            quiet: false,
        }
    }
}

/// Configuration for an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateConfig {
    /// Samples or episodes to collect; ignored when `initial_states`
    /// is given
    pub how_many: usize,

    /// Unit of collection; must be episodes when `initial_states` is
    /// given
    pub iterate_over: IterateOver,

    /// Optional starting states; one episode is run per state, with the
    /// environment reset to exactly that state each time
    pub initial_states: Option<Vec<State>>,

    /// Whether to render the environment at every step
    pub render: bool,

    /// Whether to suppress progress output
    pub quiet: bool,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            how_many: 1,
            iterate_over: IterateOver::Episodes,
            initial_states: None,
            render: false,
            quiet: false,
        }
    }
}

/// Interaction loop orchestrating an [`Agent`] against an
/// [`Environment`]
///
/// An iteration of the learning loop collects a dataset of transitions
/// and fits the agent on it; registered callbacks receive the dataset
/// afterwards, in registration order. Execution is strictly sequential;
/// the agent and environment are borrowed exclusively for the lifetime
/// of the loop.
///
/// Episode boundaries are the loop's responsibility: it enforces the
/// horizon, flags the last transition of each episode, resets the
/// environment between episodes, and invokes the agent's
/// `episode_start` hook before the first transition of every episode.
pub struct Core<'a> {
    agent: &'a mut dyn Agent,
    env: &'a mut dyn Environment,
    callbacks: Vec<Box<dyn Callback>>,
    state: State,
    horizon: usize,
    total_steps: usize,
    episode_steps: usize,
}

impl<'a> Core<'a> {
    /// Create an interaction loop.
    ///
    /// Initializes the agent with the environment's declared info and
    /// performs an initial environment reset.
    pub fn new(agent: &'a mut dyn Agent, env: &'a mut dyn Environment) -> Self {
        let info = env.info();
        agent.initialize(&info);
        let state = env.reset(None);
        Self {
            agent,
            env,
            callbacks: Vec::new(),
            state,
            horizon: info.horizon,
            total_steps: 0,
            episode_steps: 0,
        }
    }

    /// Register a callback, invoked once per learning iteration after
    /// the fit
    pub fn with_callback(mut self, callback: Box<dyn Callback>) -> Self {
        self.callbacks.push(callback);
        self
    }

    /// Run the learning loop.
    ///
    /// Each of `n_iterations` cycles collects `how_many` units of
    /// `iterate_over` into a dataset, fits the agent on it, then hands
    /// the dataset to every registered callback. In samples mode
    /// `total_steps` is incremented once per cycle.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfiguration`], before any
    /// interaction, when `n_iterations` or `how_many` is zero.
    pub fn learn(&mut self, config: &LearnConfig) -> Result<()> {
        if config.n_iterations == 0 {
            return Err(Error::InvalidConfiguration {
                message: "n_iterations must be positive".to_string(),
            });
        }
        if config.how_many == 0 {
            return Err(Error::InvalidConfiguration {
                message: "how_many must be positive".to_string(),
            });
        }

        let bar = progress_bar(config.n_iterations as u64, config.quiet)?;
        for _ in 0..config.n_iterations {
            let dataset = match config.iterate_over {
                IterateOver::Samples => {
                    debug!("moving for {} samples", config.how_many);
                    self.move_samples(config.how_many, config.render)?
                }
                IterateOver::Episodes => {
                    debug!("moving for {} episodes", config.how_many);
                    self.move_episodes(config.how_many, config.render)?
                }
            };

            debug!("fitting for {} steps", config.n_fit_steps);
            self.agent.fit(&dataset, config.n_fit_steps)?;

            for callback in &mut self.callbacks {
                callback.call(&dataset)?;
            }

            if config.iterate_over == IterateOver::Samples {
                self.total_steps += 1;
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(())
    }

    /// Run the loop without fitting and return every collected
    /// transition, in order.
    ///
    /// With `initial_states`, one episode is run per state, resetting
    /// the environment to exactly that state each time. Otherwise
    /// `how_many` units of `iterate_over` are collected from default
    /// resets.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfiguration`], before any
    /// interaction, when `initial_states` is supplied together with
    /// samples mode.
    pub fn evaluate(&mut self, config: &EvaluateConfig) -> Result<Dataset> {
        let mut dataset = Dataset::new();

        if let Some(initial_states) = &config.initial_states {
            if config.iterate_over != IterateOver::Episodes {
                return Err(Error::InvalidConfiguration {
                    message: "initial_states requires iterate_over = episodes".to_string(),
                });
            }

            info!("evaluating policy for {} episodes", initial_states.len());
            let bar = progress_bar(initial_states.len() as u64, config.quiet)?;
            for &initial_state in initial_states {
                self.reset_episode(Some(initial_state));
                dataset.extend(self.move_episodes(1, config.render)?);
                bar.inc(1);
            }
            bar.finish_and_clear();
        } else {
            info!(
                "evaluating policy for {} {}",
                config.how_many, config.iterate_over
            );
            let bar = progress_bar(config.how_many as u64, config.quiet)?;
            match config.iterate_over {
                IterateOver::Episodes => {
                    for _ in 0..config.how_many {
                        self.reset_episode(None);
                        dataset.extend(self.move_episodes(1, config.render)?);
                        bar.inc(1);
                    }
                }
                IterateOver::Samples => {
                    self.reset_episode(None);
                    for _ in 0..config.how_many {
                        dataset.extend(self.move_samples(1, config.render)?);
                        bar.inc(1);
                    }
                }
            }
            bar.finish_and_clear();
        }

        Ok(dataset)
    }

    /// Re-derive the current state from the environment's default reset
    /// and zero both counters.
    ///
    /// Does not touch the agent, the callbacks, or any learned values.
    pub fn reset(&mut self) {
        self.state = self.env.reset(None);
        self.total_steps = 0;
        self.episode_steps = 0;
    }

    /// Steps taken across learning iterations (samples mode counts one
    /// per cycle)
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Steps taken in the current episode
    pub fn episode_steps(&self) -> usize {
        self.episode_steps
    }

    /// Current environment state
    pub fn current_state(&self) -> State {
        self.state
    }

    fn reset_episode(&mut self, initial_state: Option<State>) {
        self.state = self.env.reset(initial_state);
        self.episode_steps = 0;
    }

    /// Collect whole episodes: step until a transition reports `last`,
    /// reset, repeat.
    fn move_episodes(&mut self, how_many: usize, render: bool) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        self.episode_steps = 0;
        for _ in 0..how_many {
            debug!("starting episode in state {}", self.state);
            while !self.step(&mut dataset, render)? {}
            debug!("episode ended in state {}", self.state);
            self.reset_episode(None);
        }
        Ok(dataset)
    }

    /// Collect exactly `how_many` single steps, resetting across episode
    /// boundaries but never stopping at one: the count is a step count.
    fn move_samples(&mut self, how_many: usize, render: bool) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        for _ in 0..how_many {
            if self.step(&mut dataset, render)? {
                self.reset_episode(None);
            }
        }
        Ok(dataset)
    }

    /// Perform a single step and append the resulting transition.
    ///
    /// Returns whether the transition ended the episode, either because
    /// the environment declared an absorbing state or because the step
    /// count reached the horizon. Only the former zeroes the bootstrap
    /// target downstream; a horizon-truncated episode still bootstraps
    /// from the next state's value.
    fn step(&mut self, dataset: &mut Dataset, render: bool) -> Result<bool> {
        if self.episode_steps == 0 {
            self.agent.episode_start()?;
        }

        let action = self.agent.draw_action(self.state)?;
        let outcome = self.env.step(action);

        self.episode_steps += 1;

        if render {
            self.env.render();
        }

        let last = outcome.absorbing || self.episode_steps >= self.horizon;
        let transition = Transition {
            state: self.state,
            action,
            reward: outcome.reward,
            next_state: outcome.next_state,
            absorbing: outcome.absorbing,
            last,
        };
        debug!("{transition:?}");
        dataset.push(transition);

        self.state = outcome.next_state;

        Ok(last)
    }
}

fn progress_bar(len: u64, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len}")
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("=>-"),
    );
    Ok(bar)
}
