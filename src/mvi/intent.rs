//! Base trait for intents in the MVI flow.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (request access, pick an offer, dismiss)
/// - Provider results (entitlement checked, purchase resolved)
/// - Timer events (lobby spawn completed)
pub trait Intent: Send + 'static {}
