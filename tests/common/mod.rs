//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use teammate_gate::config::Config;
use teammate_gate::entitlement::{BillingPeriod, Offering, Offerings, PurchaseOffer};
use teammate_gate::provider::InMemoryProvider;
use teammate_gate::router::{Navigation, ScreenId, ScreenRouter};
use teammate_gate::session::SessionOrchestrator;

/// Router that records every call for later assertions.
#[derive(Clone, Default)]
pub struct RecordingRouter {
    calls: Arc<Mutex<Vec<Navigation>>>,
}

impl RecordingRouter {
    pub fn calls(&self) -> Vec<Navigation> {
        self.calls.lock().clone()
    }
}

impl ScreenRouter for RecordingRouter {
    fn navigate_replace(&mut self, screen: ScreenId) {
        self.calls.lock().push(Navigation::Replace(screen));
    }

    fn navigate_forward(&mut self, screen: ScreenId) {
        self.calls.lock().push(Navigation::Forward(screen));
    }

    fn navigate_back(&mut self) {
        self.calls.lock().push(Navigation::Back);
    }
}

/// Monthly and yearly packages, as sold in the app.
pub fn catalog() -> Offerings {
    Offerings::with_current(Offering {
        identifier: "default".to_string(),
        packages: vec![
            PurchaseOffer::new("monthly", "$19.99/mo", BillingPeriod::Monthly),
            PurchaseOffer::new("yearly", "$179/yr", BillingPeriod::Yearly),
        ],
    })
}

/// Initialized sandbox provider with no entitlement.
pub fn sandbox() -> InMemoryProvider {
    InMemoryProvider::new("pro", catalog()).initialized()
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.provider.timeout_seconds = 2;
    config
}

/// Build an orchestrator over `provider` with a recording router.
pub fn make_session(provider: Arc<InMemoryProvider>) -> (SessionOrchestrator, RecordingRouter) {
    let router = RecordingRouter::default();
    let session =
        SessionOrchestrator::from_config(provider, &test_config(), Box::new(router.clone()));
    (session, router)
}

pub const SHORT: Duration = Duration::from_millis(20);
