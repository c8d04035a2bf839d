//! Entitlement-gated session flow.
//!
//! # Architecture
//!
//! Uses the MVI pattern:
//! - `state.rs` - Screen state and paywall notices
//! - `intent.rs` - User actions and provider results
//! - `reducer.rs` - Pure transitions and the router call for each
//! - `orchestrator.rs` - Suspends on the provider, applies results, routes
//! - `lifecycle.rs` - Teardown signalling for suspended calls
//! - `events.rs` - Audit log

mod events;
mod intent;
mod lifecycle;
mod orchestrator;
mod reducer;
mod state;

pub use events::{EventLog, FlowEvent, FlowEventKind, ObservationSource};
pub use intent::SessionIntent;
pub use lifecycle::{LifecycleHandle, SessionLifecycle};
pub use orchestrator::SessionOrchestrator;
pub use reducer::{route_for, SessionReducer};
pub use state::{Notice, NoticeKind, ScreenState};
