use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entitlement::{BillingPeriod, PurchaseOffer, DEFAULT_ENTITLEMENT_ID};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub entitlement: EntitlementConfig,
    #[serde(default)]
    pub lobby: LobbyConfig,
    /// Catalog served by the in-memory provider.
    #[serde(default = "default_offers")]
    pub offers: Vec<PurchaseOffer>,
}

/// Entitlement provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// App Store key (e.g., "appl_...").
    #[serde(default)]
    pub ios_api_key: Option<String>,
    /// Play Store key (e.g., "goog_...").
    #[serde(default)]
    pub android_api_key: Option<String>,
    /// Verbose provider logging (default: false).
    #[serde(default)]
    pub debug_logs: bool,
    /// Upper bound for any single provider call in seconds (default: 15).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}

/// Which entitlement unlocks the lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitlementConfig {
    #[serde(default = "default_entitlement_id")]
    pub id: String,
}

/// Lobby readiness settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// Time to spawn the teammate before the lobby reports ready (default: 3000).
    #[serde(default = "default_spawn_delay_ms")]
    pub spawn_delay_ms: u64,
}

impl LobbyConfig {
    pub fn spawn_delay(&self) -> Duration {
        Duration::from_millis(self.spawn_delay_ms)
    }
}

fn default_timeout_seconds() -> u32 {
    15
}

fn default_entitlement_id() -> String {
    DEFAULT_ENTITLEMENT_ID.to_string()
}

fn default_spawn_delay_ms() -> u64 {
    3000
}

fn default_offers() -> Vec<PurchaseOffer> {
    vec![
        PurchaseOffer::new("monthly", "$19.99/mo", BillingPeriod::Monthly),
        PurchaseOffer::new("yearly", "$179/yr", BillingPeriod::Yearly),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            entitlement: EntitlementConfig::default(),
            lobby: LobbyConfig::default(),
            offers: default_offers(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ios_api_key: None,
            android_api_key: None,
            debug_logs: false,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            id: default_entitlement_id(),
        }
    }
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            spawn_delay_ms: default_spawn_delay_ms(),
        }
    }
}
