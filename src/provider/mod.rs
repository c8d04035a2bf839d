//! Entitlement provider capability.
//!
//! The billing/entitlement service is consumed only through the
//! [`EntitlementProvider`] trait. Implementations are injected into the
//! checker, the purchase controller and the orchestrator at construction;
//! nothing in this crate reaches for a process-global provider.

mod bootstrap;
mod memory;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::entitlement::{CustomerInfo, Offerings, PurchaseOffer};

pub use bootstrap::{bootstrap, BootstrapError, Platform};
pub use memory::{CallCounts, InMemoryProvider, ScriptedPurchase};

/// Errors reported by the provider for any operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider not initialized")]
    NotInitialized,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider request timed out")]
    Timeout,

    #[error("payment rejected: {0}")]
    PaymentRejected(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider fault: {0}")]
    Fault(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

/// Result of a purchase call that did not produce a customer response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The user backed out of the store sheet.
    #[error("purchase cancelled by user")]
    Cancelled,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Remote source of truth for entitlements and purchases.
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// One-time setup. Must complete before any other call.
    async fn initialize(&self, platform_key: &str) -> Result<(), ProviderError>;

    /// Current entitlement payload for the session's user.
    async fn entitlement_status(&self, entitlement_id: &str)
        -> Result<CustomerInfo, ProviderError>;

    /// Current offering catalog.
    async fn current_offerings(&self) -> Result<Offerings, ProviderError>;

    /// Submit a purchase for a package resolved from the catalog.
    async fn purchase(&self, offer: &PurchaseOffer) -> Result<CustomerInfo, PurchaseError>;
}

/// Provider handle shared by the checker, controller and orchestrator.
pub type SharedProvider = Arc<dyn EntitlementProvider>;

/// Bound a provider call by `limit`, mapping expiry to [`ProviderError::Timeout`].
pub(crate) async fn bounded<T, E, F>(limit: Duration, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<ProviderError>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout.into()),
    }
}
