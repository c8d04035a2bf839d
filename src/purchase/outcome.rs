//! Purchase outcome types.

use thiserror::Error;

use crate::entitlement::EntitlementStatus;
use crate::provider::ProviderError;

/// Why a purchase attempt did not grant the entitlement.
///
/// The `Display` text is the reason shown alongside the retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseFailure {
    /// The requested offer is not in the current catalog. Detected locally,
    /// no purchase is submitted.
    #[error("offer unavailable")]
    OfferUnavailable { offer: String },

    /// The provider accepted the purchase but the entitlement is not active.
    #[error("entitlement not granted")]
    EntitlementNotGranted,

    /// Another purchase is still awaiting settlement.
    #[error("a purchase is already in progress")]
    InFlight,

    #[error(transparent)]
    Provider(ProviderError),
}

impl PurchaseFailure {
    /// True for failures decided locally, before a purchase was submitted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PurchaseFailure::OfferUnavailable { .. } | PurchaseFailure::InFlight
        )
    }
}

/// Result of one purchase attempt, consumed once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The post-purchase response shows the entitlement as active.
    Granted(EntitlementStatus),
    /// The user backed out. Not an error.
    Cancelled,
    Failed(PurchaseFailure),
}

impl PurchaseOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, PurchaseOutcome::Granted(_))
    }

    /// Entitlement status read from the post-purchase response, if the
    /// purchase settled. A settled purchase without the entitlement reads as
    /// inactive.
    pub fn status(&self) -> Option<EntitlementStatus> {
        match self {
            PurchaseOutcome::Granted(status) => Some(*status),
            PurchaseOutcome::Failed(PurchaseFailure::EntitlementNotGranted) => {
                Some(EntitlementStatus::inactive())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reasons_are_human_readable() {
        let unavailable = PurchaseFailure::OfferUnavailable {
            offer: "weekly".to_string(),
        };
        assert_eq!(unavailable.to_string(), "offer unavailable");
        assert_eq!(
            PurchaseFailure::EntitlementNotGranted.to_string(),
            "entitlement not granted"
        );
        assert_eq!(
            PurchaseFailure::Provider(ProviderError::Network("offline".into())).to_string(),
            "network error: offline"
        );
    }

    #[test]
    fn precondition_failures_are_distinguishable() {
        assert!(PurchaseFailure::OfferUnavailable {
            offer: "weekly".to_string()
        }
        .is_precondition());
        assert!(PurchaseFailure::InFlight.is_precondition());
        assert!(!PurchaseFailure::Provider(ProviderError::Timeout).is_precondition());
        assert!(!PurchaseFailure::EntitlementNotGranted.is_precondition());
    }

    #[test]
    fn settled_outcomes_carry_a_status() {
        assert_eq!(
            PurchaseOutcome::Failed(PurchaseFailure::EntitlementNotGranted).status(),
            Some(EntitlementStatus::inactive())
        );
        assert_eq!(PurchaseOutcome::Cancelled.status(), None);
        assert_eq!(
            PurchaseOutcome::Failed(PurchaseFailure::Provider(ProviderError::Timeout)).status(),
            None
        );
        assert_eq!(PurchaseOutcome::Failed(PurchaseFailure::InFlight).status(), None);
    }
}
