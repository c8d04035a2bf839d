//! Screen state for the gated session flow.

use crate::mvi::FlowState;
use crate::provider::ProviderError;
use crate::purchase::{PurchaseFailure, PurchaseOutcome};
use crate::router::ScreenId;

/// Kind of non-fatal notice shown on the paywall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// User backed out of the store sheet. Informational only.
    Cancelled,
    /// Purchase did not go through; the user may retry.
    Failed,
}

/// Non-blocking message shown on the paywall after a purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn cancelled() -> Self {
        Self {
            kind: NoticeKind::Cancelled,
            title: "Purchase cancelled".to_string(),
            message: "No charge was made.".to_string(),
        }
    }

    pub fn failed(reason: &PurchaseFailure) -> Self {
        let message = match reason {
            PurchaseFailure::Provider(
                ProviderError::Network(_) | ProviderError::Timeout | ProviderError::NotInitialized,
            ) => "Check your connection".to_string(),
            other => other.to_string(),
        };
        Self {
            kind: NoticeKind::Failed,
            title: "Purchase failed".to_string(),
            message,
        }
    }

    /// Notice for a purchase outcome that leaves the user on the paywall.
    pub fn for_outcome(outcome: &PurchaseOutcome) -> Option<Self> {
        match outcome {
            PurchaseOutcome::Granted(status) if status.is_active() => None,
            PurchaseOutcome::Granted(_) => {
                Some(Self::failed(&PurchaseFailure::EntitlementNotGranted))
            }
            PurchaseOutcome::Cancelled => Some(Self::cancelled()),
            PurchaseOutcome::Failed(reason) => Some(Self::failed(reason)),
        }
    }
}

/// Which screen of the flow is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Home,
    PaywallOffering {
        notice: Option<Notice>,
    },
    /// Terminal for this flow.
    Granted,
}

impl FlowState for ScreenState {}

impl ScreenState {
    pub fn paywall() -> Self {
        ScreenState::PaywallOffering { notice: None }
    }

    pub fn screen(&self) -> ScreenId {
        match self {
            ScreenState::Home => ScreenId::Home,
            ScreenState::PaywallOffering { .. } => ScreenId::Paywall,
            ScreenState::Granted => ScreenId::Lobby,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, ScreenState::Home)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, ScreenState::Granted)
    }

    pub fn is_paywall(&self) -> bool {
        matches!(self, ScreenState::PaywallOffering { .. })
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ScreenState::PaywallOffering { notice } => notice.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_home() {
        assert_eq!(ScreenState::default(), ScreenState::Home);
        assert_eq!(ScreenState::default().screen(), ScreenId::Home);
    }

    #[test]
    fn connection_failures_use_connection_copy() {
        let notice = Notice::failed(&PurchaseFailure::Provider(ProviderError::Timeout));
        assert_eq!(notice.title, "Purchase failed");
        assert_eq!(notice.message, "Check your connection");
    }

    #[test]
    fn other_failures_carry_reason() {
        let notice = Notice::failed(&PurchaseFailure::EntitlementNotGranted);
        assert_eq!(notice.message, "entitlement not granted");
    }

    #[test]
    fn cancelled_notice_is_informational() {
        let notice = Notice::for_outcome(&PurchaseOutcome::Cancelled).unwrap();
        assert_eq!(notice.kind, NoticeKind::Cancelled);
    }
}
