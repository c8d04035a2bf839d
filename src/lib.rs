//! Entitlement-gated access to the teammate lobby.
//!
//! A session starts on Home, re-verifies the "pro" entitlement with the
//! billing provider, and only reaches the lobby once the provider reports
//! the entitlement as active, either on entry or after a purchase.

pub mod config;
pub mod entitlement;
pub mod lobby;
pub mod logging;
pub mod mvi;
pub mod provider;
pub mod purchase;
pub mod router;
pub mod session;
