//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the interaction loop and
//! its collaborators. Following hexagonal architecture, these traits are
//! owned by the core and implemented by adapters outside it.

pub mod agent;
pub mod callback;
pub mod environment;
pub mod policy;

pub use agent::Agent;
pub use callback::Callback;
pub use environment::{Environment, Step};
pub use policy::Policy;
