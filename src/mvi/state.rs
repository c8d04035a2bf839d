//! Base trait for flow state in the MVI flow.

/// Marker trait for flow state objects.
///
/// States are plain values: cloned to derive the next state, compared to
/// detect transitions, and defaulted to the machine's initial state.
pub trait FlowState: Clone + PartialEq + Default + Send + 'static {}
