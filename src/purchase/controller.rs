//! Purchase flow controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::entitlement::EntitlementStatus;
use crate::provider::{bounded, PurchaseError, SharedProvider};

use super::outcome::{PurchaseFailure, PurchaseOutcome};

/// Resolves an offer against the live catalog, submits the purchase and
/// reconciles the provider's response into a [`PurchaseOutcome`].
///
/// At most one purchase runs per controller. The in-flight flag is
/// released by a guard, so dropping a suspended `purchase` future frees it.
/// The catalog fetch is bounded by the provider timeout; the purchase
/// submission is not, since the store sheet waits on the user and the
/// provider may still be charging after a local timeout.
/// Nothing is retried automatically.
pub struct PurchaseController {
    provider: SharedProvider,
    entitlement_id: String,
    timeout: Duration,
    in_flight: AtomicBool,
}

impl PurchaseController {
    pub fn new(provider: SharedProvider, entitlement_id: &str, timeout: Duration) -> Self {
        Self {
            provider,
            entitlement_id: entitlement_id.to_string(),
            timeout,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn purchase(&self, offer_id: &str) -> PurchaseOutcome {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!(offer = %offer_id, "Purchase rejected, another purchase is in flight");
            return PurchaseOutcome::Failed(PurchaseFailure::InFlight);
        }
        let _release = scopeguard::guard(&self.in_flight, |flag| {
            flag.store(false, Ordering::Release);
        });

        self.run(offer_id).await
    }

    async fn run(&self, offer_id: &str) -> PurchaseOutcome {
        let offerings = match bounded(self.timeout, self.provider.current_offerings()).await {
            Ok(offerings) => offerings,
            Err(err) => {
                tracing::warn!(offer = %offer_id, error = %err, "Failed to fetch offerings");
                return PurchaseOutcome::Failed(PurchaseFailure::Provider(err));
            }
        };

        let Some(offer) = offerings.find_package(offer_id) else {
            tracing::warn!(offer = %offer_id, "Offer not in current catalog");
            return PurchaseOutcome::Failed(PurchaseFailure::OfferUnavailable {
                offer: offer_id.to_string(),
            });
        };

        tracing::info!(
            provider = self.provider.name(),
            offer = %offer.identifier,
            period = %offer.period,
            price = %offer.price,
            "Submitting purchase"
        );

        match self.provider.purchase(offer).await {
            Ok(info) => {
                let status = EntitlementStatus::from_customer_info(&info, &self.entitlement_id);
                if status.is_active() {
                    tracing::info!(offer = %offer_id, "Purchase granted entitlement");
                    PurchaseOutcome::Granted(status)
                } else {
                    tracing::warn!(
                        offer = %offer_id,
                        entitlement = %self.entitlement_id,
                        "Purchase settled but entitlement is not active"
                    );
                    PurchaseOutcome::Failed(PurchaseFailure::EntitlementNotGranted)
                }
            }
            Err(PurchaseError::Cancelled) => {
                tracing::debug!(offer = %offer_id, "Purchase cancelled by user");
                PurchaseOutcome::Cancelled
            }
            Err(PurchaseError::Provider(err)) => {
                tracing::warn!(offer = %offer_id, error = %err, "Purchase failed");
                PurchaseOutcome::Failed(PurchaseFailure::Provider(err))
            }
        }
    }
}
