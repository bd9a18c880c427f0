//! Tabular reinforcement learning core
//!
//! This crate provides:
//! - An agent-environment interaction loop that turns a stream of
//!   transitions into correctly-bounded episodes and fit-ready datasets
//! - SARSA(λ): on-policy TD control with replacing or accumulating
//!   eligibility traces
//! - Q-learning: off-policy one-step TD control
//! - Pluggable policies, learning-rate schedules, and per-iteration
//!   callbacks behind narrow trait boundaries
//! - Named-array snapshots of learned values for checkpointing

pub mod callbacks;
pub mod checkpoint;
pub mod core;
pub mod error;
pub mod params;
pub mod policy;
pub mod ports;
pub mod table;
pub mod td;
pub mod trace;
pub mod types;

pub use callbacks::CollectDataset;
pub use checkpoint::Snapshot;
pub use self::core::{Core, EvaluateConfig, LearnConfig};
pub use error::{Error, Result};
pub use params::{ConstantRate, DecayingRate, LearningRate};
pub use policy::{EpsilonGreedy, Greedy};
pub use ports::{Agent, Callback, Environment, Policy, Step};
pub use table::Table;
pub use td::{QLearning, SarsaLambda};
pub use trace::{EligibilityTrace, TraceKind};
pub use types::{Action, Dataset, EnvInfo, IterateOver, State, Transition};
