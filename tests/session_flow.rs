//! End-to-end tests for the session flow orchestrator.

mod common;

use std::sync::Arc;
use std::time::Duration;

use teammate_gate::entitlement::EntitlementChecker;
use teammate_gate::provider::{ProviderError, ScriptedPurchase};
use teammate_gate::purchase::{PurchaseController, PurchaseFailure, PurchaseOutcome};
use teammate_gate::router::{Navigation, ScreenId};
use teammate_gate::session::{
    FlowEventKind, NoticeKind, ObservationSource, ScreenState, SessionOrchestrator,
};

use common::{make_session, sandbox, RecordingRouter, SHORT};

// ---------------------------------------------------------------------------
// On-enter check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn entitled_user_auto_advances_to_lobby() {
    let provider = Arc::new(sandbox().entitled());
    let (mut session, router) = make_session(provider);

    session.on_enter().await;

    assert_eq!(session.state(), &ScreenState::Granted);
    assert_eq!(router.calls(), vec![Navigation::Replace(ScreenId::Lobby)]);
    assert!(session.events().grants_are_backed_by_entitlement());
}

#[tokio::test]
async fn unentitled_user_stays_home() {
    let provider = Arc::new(sandbox());
    let (mut session, router) = make_session(provider);

    session.on_enter().await;

    assert_eq!(session.state(), &ScreenState::Home);
    assert!(router.calls().is_empty());
}

#[tokio::test]
async fn failed_check_stays_home_silently() {
    let provider = Arc::new(sandbox().entitled());
    provider.fail_status_with(Some(ProviderError::Network("offline".into())));
    let (mut session, router) = make_session(provider);

    session.on_enter().await;

    assert_eq!(session.state(), &ScreenState::Home);
    assert!(session.state().notice().is_none());
    assert!(router.calls().is_empty());
    assert!(!session.last_status().is_active());
}

// ---------------------------------------------------------------------------
// Request access
// ---------------------------------------------------------------------------

#[tokio::test]
async fn purchase_from_paywall_grants_access() {
    let provider = Arc::new(sandbox());
    let (mut session, router) = make_session(provider.clone());

    session.on_enter().await;
    session.request_access();
    assert!(session.state().is_paywall());

    let outcome = session.select_offer("yearly").await;

    assert!(matches!(outcome, Some(PurchaseOutcome::Granted(_))));
    assert_eq!(session.state(), &ScreenState::Granted);
    assert_eq!(
        router.calls(),
        vec![
            Navigation::Forward(ScreenId::Paywall),
            Navigation::Replace(ScreenId::Lobby),
        ]
    );
    assert_eq!(provider.calls().purchase, 1);
    assert!(session.events().grants_are_backed_by_entitlement());
}

#[tokio::test]
async fn access_request_after_auto_advance_is_ignored() {
    let provider = Arc::new(sandbox().entitled());
    let (mut session, router) = make_session(provider);

    session.on_enter().await;
    // Already granted by the launch check; a second request is ignored.
    session.request_access();

    assert_eq!(router.calls(), vec![Navigation::Replace(ScreenId::Lobby)]);
}

#[tokio::test]
async fn access_request_without_check_fails_closed_to_paywall() {
    let provider = Arc::new(sandbox().entitled());
    let (mut session, router) = make_session(provider.clone());

    session.request_access();

    assert!(session.state().is_paywall());
    assert_eq!(router.calls(), vec![Navigation::Forward(ScreenId::Paywall)]);
    assert_eq!(provider.calls().entitlement_status, 0);
}

#[tokio::test]
async fn access_request_waits_for_timed_out_check_then_fails_closed() {
    let provider = Arc::new(sandbox().entitled().with_latency(Duration::from_millis(200)));
    let router = RecordingRouter::default();
    let mut session = SessionOrchestrator::new(
        EntitlementChecker::new(provider.clone(), "pro", SHORT),
        PurchaseController::new(provider, "pro", Duration::from_secs(2)),
        Box::new(router.clone()),
    );

    session.on_enter().await;
    assert!(session.state().is_home());

    session.request_access();

    assert!(session.state().is_paywall());
    assert_eq!(router.calls(), vec![Navigation::Forward(ScreenId::Paywall)]);
}

// ---------------------------------------------------------------------------
// Paywall outcomes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancelled_purchase_stays_on_paywall_without_routing() {
    let provider = Arc::new(sandbox());
    provider.set_next_purchase(ScriptedPurchase::Cancel);
    let (mut session, router) = make_session(provider);

    session.request_access();
    let routed_before = router.calls().len();

    let outcome = session.select_offer("monthly").await;

    assert_eq!(outcome, Some(PurchaseOutcome::Cancelled));
    assert!(session.state().is_paywall());
    assert_eq!(router.calls().len(), routed_before);
    assert_eq!(
        session.state().notice().map(|n| n.kind),
        Some(NoticeKind::Cancelled)
    );
}

#[tokio::test]
async fn failed_purchase_raises_connection_notice() {
    let provider = Arc::new(sandbox());
    provider.set_next_purchase(ScriptedPurchase::Fail(ProviderError::Network(
        "offline".into(),
    )));
    let (mut session, router) = make_session(provider);

    session.request_access();
    session.select_offer("monthly").await;

    let notice = session.state().notice().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Failed);
    assert_eq!(notice.title, "Purchase failed");
    assert_eq!(notice.message, "Check your connection");
    assert_eq!(router.calls(), vec![Navigation::Forward(ScreenId::Paywall)]);
}

#[tokio::test]
async fn settled_purchase_without_entitlement_does_not_grant() {
    let provider = Arc::new(sandbox());
    provider.set_next_purchase(ScriptedPurchase::GrantWithoutEntitlement);
    let (mut session, _router) = make_session(provider);

    session.request_access();
    let outcome = session.select_offer("monthly").await;

    assert_eq!(
        outcome,
        Some(PurchaseOutcome::Failed(PurchaseFailure::EntitlementNotGranted))
    );
    assert!(session.state().is_paywall());
    assert!(!session.state().is_granted());
    assert!(!session.last_status().is_active());
    assert!(session.events().kinds().any(|k| matches!(
        k,
        FlowEventKind::EntitlementObserved {
            source: ObservationSource::Purchase,
            status,
        } if !status.is_active()
    )));
}

#[tokio::test]
async fn unknown_offer_stays_on_paywall() {
    let provider = Arc::new(sandbox());
    let (mut session, _router) = make_session(provider.clone());

    session.request_access();
    let outcome = session.select_offer("lifetime").await;

    assert!(matches!(
        outcome,
        Some(PurchaseOutcome::Failed(PurchaseFailure::OfferUnavailable { .. }))
    ));
    assert!(session.state().is_paywall());
    assert_eq!(provider.calls().purchase, 0);
}

#[tokio::test]
async fn retry_after_cancel_can_grant() {
    let provider = Arc::new(sandbox());
    provider.set_next_purchase(ScriptedPurchase::Cancel);
    let (mut session, _router) = make_session(provider.clone());

    session.request_access();
    session.select_offer("monthly").await;
    session.dismiss_notice();
    assert_eq!(session.state(), &ScreenState::paywall());

    provider.set_next_purchase(ScriptedPurchase::Grant);
    session.select_offer("monthly").await;

    assert!(session.state().is_granted());
    assert_eq!(provider.calls().purchase, 2);
}

#[tokio::test]
async fn dismiss_returns_home() {
    let provider = Arc::new(sandbox());
    let (mut session, router) = make_session(provider);

    session.request_access();
    session.dismiss();

    assert_eq!(session.state(), &ScreenState::Home);
    assert_eq!(
        router.calls(),
        vec![Navigation::Forward(ScreenId::Paywall), Navigation::Back]
    );
}

// ---------------------------------------------------------------------------
// Invalid intents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn offer_selection_outside_paywall_is_ignored() {
    let provider = Arc::new(sandbox());
    let (mut session, router) = make_session(provider.clone());

    assert_eq!(session.select_offer("monthly").await, None);

    assert_eq!(provider.calls().current_offerings, 0);
    assert_eq!(provider.calls().purchase, 0);
    assert!(router.calls().is_empty());
    assert!(session.events().kinds().any(|k| matches!(
        k,
        FlowEventKind::IntentIgnored {
            intent: "select_offer",
            screen: ScreenId::Home
        }
    )));
}

#[tokio::test]
async fn granted_is_terminal() {
    let provider = Arc::new(sandbox().entitled());
    let (mut session, router) = make_session(provider);

    session.on_enter().await;
    session.dismiss();
    session.request_access();
    session.on_enter().await;

    assert!(session.state().is_granted());
    assert_eq!(router.calls().len(), 1);
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn teardown_during_check_discards_result() {
    let provider = Arc::new(sandbox().entitled().with_latency(Duration::from_millis(200)));
    let (mut session, router) = make_session(provider);
    let handle = session.lifecycle_handle();

    tokio::join!(session.on_enter(), async {
        tokio::time::sleep(SHORT).await;
        handle.tear_down();
    });

    assert_eq!(session.state(), &ScreenState::Home);
    assert!(router.calls().is_empty());
    assert!(session.events().kinds().any(|k| matches!(
        k,
        FlowEventKind::StaleOutcomeDiscarded {
            operation: "entitlement_check"
        }
    )));
}

#[tokio::test]
async fn teardown_during_purchase_discards_outcome() {
    let provider = Arc::new(sandbox().with_latency(Duration::from_millis(200)));
    let (mut session, router) = make_session(provider);
    session.request_access();
    let handle = session.lifecycle_handle();

    let (outcome, _) = tokio::join!(session.select_offer("monthly"), async {
        tokio::time::sleep(SHORT).await;
        handle.tear_down();
    });

    assert_eq!(outcome, None);
    assert!(session.state().is_paywall());
    assert_eq!(router.calls(), vec![Navigation::Forward(ScreenId::Paywall)]);
}

#[tokio::test]
async fn calls_after_teardown_are_noops() {
    let provider = Arc::new(sandbox().entitled());
    let (mut session, router) = make_session(provider.clone());

    session.tear_down();
    session.on_enter().await;
    session.request_access();

    assert!(session.is_torn_down());
    assert_eq!(session.state(), &ScreenState::Home);
    assert!(router.calls().is_empty());
    assert_eq!(provider.calls().entitlement_status, 0);
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_status_read_is_logged() {
    let provider = Arc::new(sandbox());
    let (mut session, _router) = make_session(provider);

    session.on_enter().await;
    session.request_access();
    session.select_offer("monthly").await;

    let sources: Vec<_> = session
        .events()
        .kinds()
        .filter_map(|k| match k {
            FlowEventKind::EntitlementObserved { source, status } => {
                Some((*source, status.is_active()))
            }
            _ => None,
        })
        .collect();

    assert_eq!(
        sources,
        vec![
            (ObservationSource::LaunchCheck, false),
            (ObservationSource::LastKnown, false),
            (ObservationSource::Purchase, true),
        ]
    );
    assert_eq!(
        session.events().navigations(),
        vec![
            Navigation::Forward(ScreenId::Paywall),
            Navigation::Replace(ScreenId::Lobby),
        ]
    );
    assert!(session.events().grants_are_backed_by_entitlement());
}
