//! Model-View-Intent (MVI) primitives for the gated session flow.
//!
//! Every screen-level state machine in this crate is a pure reducer over
//! an immutable state value. Side effects (provider calls, routing) live
//! in the orchestrator that drives the reducer, never in the reducer.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Router
//!    ↑                              │
//!    └──────── provider result ─────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::FlowState;
