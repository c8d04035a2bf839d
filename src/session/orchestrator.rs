//! Session flow orchestrator.

use std::future::Future;

use uuid::Uuid;

use crate::config::Config;
use crate::entitlement::{EntitlementChecker, EntitlementStatus};
use crate::mvi::Reducer;
use crate::provider::SharedProvider;
use crate::purchase::{PurchaseController, PurchaseOutcome};
use crate::router::ScreenRouter;

use super::events::{EventLog, FlowEventKind, ObservationSource};
use super::intent::SessionIntent;
use super::lifecycle::{LifecycleHandle, SessionLifecycle};
use super::reducer::{route_for, SessionReducer};
use super::state::ScreenState;

/// Drives one user's pass through Home, the paywall and the lobby.
///
/// The orchestrator is the single writer of [`ScreenState`] and of the last
/// observed [`EntitlementStatus`]. It suspends only while the entitlement
/// check or a purchase is awaiting the provider; both race against
/// teardown, and a result arriving after teardown is dropped.
///
/// Methods take `&mut self`, so a second purchase cannot be started
/// through the same orchestrator while one is suspended.
pub struct SessionOrchestrator {
    session_id: Uuid,
    checker: EntitlementChecker,
    purchases: PurchaseController,
    router: Box<dyn ScreenRouter>,
    state: ScreenState,
    last_status: EntitlementStatus,
    events: EventLog,
    lifecycle: SessionLifecycle,
}

impl SessionOrchestrator {
    pub fn new(
        checker: EntitlementChecker,
        purchases: PurchaseController,
        router: Box<dyn ScreenRouter>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        tracing::debug!(session_id = %session_id, "Session created");
        Self {
            session_id,
            checker,
            purchases,
            router,
            state: ScreenState::default(),
            last_status: EntitlementStatus::inactive(),
            events: EventLog::default(),
            lifecycle: SessionLifecycle::new(),
        }
    }

    /// Wire a checker and a purchase controller to `provider` using `config`.
    pub fn from_config(
        provider: SharedProvider,
        config: &Config,
        router: Box<dyn ScreenRouter>,
    ) -> Self {
        let timeout = config.provider.timeout();
        let entitlement_id = config.entitlement.id.as_str();
        let checker = EntitlementChecker::new(provider.clone(), entitlement_id, timeout);
        let purchases = PurchaseController::new(provider, entitlement_id, timeout);
        Self::new(checker, purchases, router)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn last_status(&self) -> EntitlementStatus {
        self.last_status
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn lifecycle_handle(&self) -> LifecycleHandle {
        self.lifecycle.handle()
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle.is_torn_down()
    }

    pub fn tear_down(&self) {
        self.lifecycle.tear_down();
    }

    /// Re-verify entitlement on entering Home and auto-advance if entitled.
    ///
    /// Check failures are invisible: the checker fails closed and the user
    /// stays on Home.
    pub async fn on_enter(&mut self) {
        if !self.accepts("on_enter", ScreenState::is_home) {
            return;
        }

        let checked = suspend(&self.lifecycle, self.checker.check()).await;
        let Some(status) = checked else {
            self.discard("entitlement_check");
            return;
        };

        self.observe(ObservationSource::LaunchCheck, status);
        self.dispatch(SessionIntent::EntitlementChecked(status));
    }

    /// User asked for the lobby from Home.
    pub fn request_access(&mut self) {
        if !self.accepts("request_access", ScreenState::is_home) {
            return;
        }

        let status = self.last_status;
        self.events.record(FlowEventKind::EntitlementObserved {
            source: ObservationSource::LastKnown,
            status,
        });
        self.dispatch(SessionIntent::AccessRequested(status));
    }

    /// User picked an offer on the paywall.
    ///
    /// Returns the outcome that was applied, or `None` when the call was
    /// ignored or its result arrived after teardown.
    pub async fn select_offer(&mut self, offer_id: &str) -> Option<PurchaseOutcome> {
        if !self.accepts("select_offer", ScreenState::is_paywall) {
            return None;
        }

        self.events.record(FlowEventKind::PurchaseStarted {
            offer: offer_id.to_string(),
        });
        tracing::info!(session_id = %self.session_id, offer = %offer_id, "Purchase requested");

        let settled = suspend(&self.lifecycle, self.purchases.purchase(offer_id)).await;
        let Some(outcome) = settled else {
            self.discard("purchase");
            return None;
        };

        if let Some(status) = outcome.status() {
            self.observe(ObservationSource::Purchase, status);
        }
        self.dispatch(SessionIntent::PurchaseResolved(outcome.clone()));
        Some(outcome)
    }

    /// User left the paywall.
    pub fn dismiss(&mut self) {
        if self.accepts("dismiss", ScreenState::is_paywall) {
            self.dispatch(SessionIntent::Dismissed);
        }
    }

    /// User closed the paywall notice.
    pub fn dismiss_notice(&mut self) {
        if self.accepts("dismiss_notice", ScreenState::is_paywall) {
            self.dispatch(SessionIntent::NoticeDismissed);
        }
    }

    fn accepts(&mut self, intent: &'static str, valid: fn(&ScreenState) -> bool) -> bool {
        if self.lifecycle.is_torn_down() {
            tracing::debug!(
                session_id = %self.session_id,
                intent,
                "Ignoring call on torn down session"
            );
            return false;
        }
        if !valid(&self.state) {
            let screen = self.state.screen();
            tracing::debug!(
                session_id = %self.session_id,
                intent,
                screen = %screen,
                "Intent not valid on this screen"
            );
            self.events
                .record(FlowEventKind::IntentIgnored { intent, screen });
            return false;
        }
        true
    }

    fn observe(&mut self, source: ObservationSource, status: EntitlementStatus) {
        self.last_status = status;
        self.events
            .record(FlowEventKind::EntitlementObserved { source, status });
    }

    fn discard(&mut self, operation: &'static str) {
        tracing::debug!(
            session_id = %self.session_id,
            operation,
            "Discarding result after teardown"
        );
        self.events
            .record(FlowEventKind::StaleOutcomeDiscarded { operation });
    }

    fn dispatch(&mut self, intent: SessionIntent) {
        let from = self.state.clone();
        let to = SessionReducer::reduce(from.clone(), intent.clone());

        if to.is_granted() && !from.is_granted() && !self.last_status.is_active() {
            tracing::error!(
                session_id = %self.session_id,
                intent = intent.name(),
                "Refusing to grant access without an active entitlement"
            );
            return;
        }

        if from.screen() != to.screen() {
            tracing::info!(
                session_id = %self.session_id,
                from = %from.screen(),
                to = %to.screen(),
                intent = intent.name(),
                "Screen transition"
            );
            self.events.record(FlowEventKind::Transition {
                from: from.screen(),
                to: to.screen(),
            });
        }

        if let Some(navigation) = route_for(&from, &to, &intent) {
            navigation.apply(self.router.as_mut());
            self.events.record(FlowEventKind::Routed(navigation));
        }

        if let (SessionIntent::PurchaseResolved(_), Some(notice)) = (&intent, to.notice()) {
            tracing::info!(
                session_id = %self.session_id,
                kind = ?notice.kind,
                message = %notice.message,
                "Paywall notice"
            );
            self.events.record(FlowEventKind::NoticeRaised(notice.kind));
        }

        self.state = to;
    }
}

/// Await `call` unless the session is torn down first. A result that
/// lands after teardown is treated the same as no result.
async fn suspend<F: Future>(lifecycle: &SessionLifecycle, call: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = lifecycle.wait() => None,
        output = call => (!lifecycle.is_torn_down()).then_some(output),
    }
}
