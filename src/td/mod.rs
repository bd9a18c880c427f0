//! Temporal difference control algorithms
//!
//! TD methods bootstrap value estimates from successor states, updating
//! a tabular value function one transition at a time.
//!
//! ## Algorithms
//!
//! - **SARSA(λ)**: On-policy TD control with eligibility traces. Each
//!   TD error is broadcast to every recently visited pair, weighted by
//!   the trace. λ = 0 degenerates exactly to one-step SARSA.
//! - **Q-learning**: Off-policy TD control. Updates toward the maximum
//!   next-state value regardless of the action actually taken.
//!
//! Both implement the [`Agent`](crate::ports::Agent) port and are
//! driven by the interaction loop like any other agent.

pub mod q_learning;
pub mod sarsa_lambda;

pub use q_learning::QLearning;
pub use sarsa_lambda::SarsaLambda;
