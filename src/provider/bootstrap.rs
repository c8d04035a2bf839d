//! Explicit provider initialization.
//!
//! The provider is configured once per process with a platform-specific
//! key. This is a normal fallible async step that callers sequence before
//! building a session, not an import-time side effect.

use std::fmt;

use thiserror::Error;

use crate::config::ProviderConfig;

use super::{bounded, EntitlementProvider, ProviderError};

/// Store platform the key is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Platform of the current compile target. Anything that is not iOS
    /// uses the Play Store key.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Android
        }
    }

    /// Configured key for this platform, ignoring blank values.
    pub fn api_key<'a>(&self, config: &'a ProviderConfig) -> Option<&'a str> {
        let key = match self {
            Platform::Ios => config.ios_api_key.as_deref(),
            Platform::Android => config.android_api_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
        }
    }
}

/// Errors from [`bootstrap`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("no provider API key configured for platform '{platform}'")]
    MissingKey { platform: Platform },

    #[error("provider initialization failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Initialize `provider` with the key configured for `platform`.
pub async fn bootstrap(
    provider: &dyn EntitlementProvider,
    config: &ProviderConfig,
    platform: Platform,
) -> Result<(), BootstrapError> {
    let key = platform
        .api_key(config)
        .ok_or(BootstrapError::MissingKey { platform })?;

    tracing::info!(
        provider = provider.name(),
        platform = %platform,
        debug_logs = config.debug_logs,
        "Initializing entitlement provider"
    );

    if let Err(err) = bounded(config.timeout(), provider.initialize(key)).await {
        tracing::error!(provider = provider.name(), error = %err, "Provider initialization failed");
        return Err(err.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProviderConfig {
        ProviderConfig {
            ios_api_key: Some("appl_test".to_string()),
            android_api_key: Some("  ".to_string()),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn selects_key_per_platform() {
        let config = config();
        assert_eq!(Platform::Ios.api_key(&config), Some("appl_test"));
        assert_eq!(Platform::Android.api_key(&config), None);
    }

    #[test]
    fn platform_display() {
        assert_eq!(Platform::Ios.to_string(), "ios");
        assert_eq!(Platform::Android.to_string(), "android");
    }
}
