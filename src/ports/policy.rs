//! Policy port - action selection over a value table

use crate::{
    table::Table,
    types::{Action, State},
};

/// Policy trait - the "current policy" capability TD algorithms consult
///
/// A policy maps a state to an action given the current value
/// estimates. Randomness, when a variant uses it, is owned by the
/// policy itself; the interaction loop and the TD algorithms stay
/// deterministic given the drawn actions.
pub trait Policy {
    /// Draw an action for `state` under the current value estimates.
    fn draw_action(&mut self, q: &Table, state: State) -> Action;
}
