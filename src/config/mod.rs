//! Configuration for the gated session flow.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, EntitlementConfig, LobbyConfig, ProviderConfig};
