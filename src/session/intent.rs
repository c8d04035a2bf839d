//! Intents for the gated session flow.

use crate::entitlement::EntitlementStatus;
use crate::mvi::Intent;
use crate::purchase::PurchaseOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIntent {
    /// The on-enter entitlement check completed.
    EntitlementChecked(EntitlementStatus),

    /// User asked to enter the lobby; carries the last observed status.
    AccessRequested(EntitlementStatus),

    /// A purchase attempt settled.
    PurchaseResolved(PurchaseOutcome),

    /// User left the paywall without buying.
    Dismissed,

    /// User closed the paywall notice.
    NoticeDismissed,
}

impl SessionIntent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionIntent::EntitlementChecked(_) => "entitlement_checked",
            SessionIntent::AccessRequested(_) => "access_requested",
            SessionIntent::PurchaseResolved(_) => "purchase_resolved",
            SessionIntent::Dismissed => "dismissed",
            SessionIntent::NoticeDismissed => "notice_dismissed",
        }
    }
}

impl Intent for SessionIntent {}
