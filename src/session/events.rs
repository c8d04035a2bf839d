//! Audit log of everything the orchestrator observed and did.

use std::time::SystemTime;

use crate::entitlement::EntitlementStatus;
use crate::router::{Navigation, ScreenId};

use super::state::NoticeKind;

/// Where an entitlement status read came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationSource {
    /// Fresh provider query on entering Home.
    LaunchCheck,
    /// Last observed status, read when the user asks for access.
    LastKnown,
    /// Provider response to a purchase.
    Purchase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEventKind {
    EntitlementObserved {
        source: ObservationSource,
        status: EntitlementStatus,
    },
    PurchaseStarted {
        offer: String,
    },
    Transition {
        from: ScreenId,
        to: ScreenId,
    },
    Routed(Navigation),
    NoticeRaised(NoticeKind),
    /// A suspended operation resumed after teardown and was dropped.
    StaleOutcomeDiscarded {
        operation: &'static str,
    },
    IntentIgnored {
        intent: &'static str,
        screen: ScreenId,
    },
}

#[derive(Debug, Clone)]
pub struct FlowEvent {
    pub timestamp: SystemTime,
    pub kind: FlowEventKind,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<FlowEvent>,
}

impl EventLog {
    pub fn record(&mut self, kind: FlowEventKind) {
        self.events.push(FlowEvent {
            timestamp: SystemTime::now(),
            kind,
        });
    }

    pub fn events(&self) -> &[FlowEvent] {
        &self.events
    }

    pub fn kinds(&self) -> impl Iterator<Item = &FlowEventKind> {
        self.events.iter().map(|e| &e.kind)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Router calls in the order they were made.
    pub fn navigations(&self) -> Vec<Navigation> {
        self.kinds()
            .filter_map(|k| match k {
                FlowEventKind::Routed(nav) => Some(*nav),
                _ => None,
            })
            .collect()
    }

    /// True when every transition into the lobby was preceded by an
    /// observed active entitlement.
    pub fn grants_are_backed_by_entitlement(&self) -> bool {
        let mut seen_active = false;
        for kind in self.kinds() {
            match kind {
                FlowEventKind::EntitlementObserved { status, .. } if status.is_active() => {
                    seen_active = true;
                }
                FlowEventKind::Transition {
                    to: ScreenId::Lobby,
                    ..
                } if !seen_active => return false,
                _ => {}
            }
        }
        true
    }
}
