//! Entitlement checker.

use std::time::Duration;

use crate::provider::{bounded, SharedProvider};

use super::types::EntitlementStatus;

/// Derives [`EntitlementStatus`] from a fresh provider query.
///
/// The provider instance is bound to the signed-in user, so it doubles as
/// the session handle. Every call goes to the provider; nothing is cached.
/// Provider errors and timeouts fail closed to an inactive status.
pub struct EntitlementChecker {
    provider: SharedProvider,
    entitlement_id: String,
    timeout: Duration,
}

impl EntitlementChecker {
    pub fn new(provider: SharedProvider, entitlement_id: &str, timeout: Duration) -> Self {
        Self {
            provider,
            entitlement_id: entitlement_id.to_string(),
            timeout,
        }
    }

    pub fn entitlement_id(&self) -> &str {
        &self.entitlement_id
    }

    pub async fn check(&self) -> EntitlementStatus {
        let query = self.provider.entitlement_status(&self.entitlement_id);
        match bounded(self.timeout, query).await {
            Ok(info) => {
                let status = EntitlementStatus::from_customer_info(&info, &self.entitlement_id);
                tracing::debug!(
                    provider = self.provider.name(),
                    entitlement = %self.entitlement_id,
                    is_active = status.is_active(),
                    "Entitlement checked"
                );
                status
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    entitlement = %self.entitlement_id,
                    error = %err,
                    "Entitlement check failed, treating as not entitled"
                );
                EntitlementStatus::inactive()
            }
        }
    }
}
