//! Reducer trait for the MVI flow.

use super::intent::Intent;
use super::state::FlowState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions are decided.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: FlowState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
