//! Deterministic in-memory entitlement provider.
//!
//! Behaves like a store sandbox: it owns a catalog and one user's
//! entitlements, and its purchase behavior is scripted up front. Every
//! operation is counted so callers can assert which calls went out.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::entitlement::{CustomerInfo, EntitlementInfo, Offerings, PurchaseOffer};

use super::{EntitlementProvider, ProviderError, PurchaseError};

/// What the next purchase call does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScriptedPurchase {
    /// Purchase settles and the entitlement becomes active.
    #[default]
    Grant,
    /// Purchase settles but the entitlement is not activated.
    GrantWithoutEntitlement,
    /// The user backs out of the store sheet.
    Cancel,
    /// The provider reports an error.
    Fail(ProviderError),
}

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub initialize: usize,
    pub entitlement_status: usize,
    pub current_offerings: usize,
    pub purchase: usize,
}

struct Inner {
    initialized: bool,
    platform_key: Option<String>,
    offerings: Offerings,
    customer: CustomerInfo,
    next_purchase: ScriptedPurchase,
    status_error: Option<ProviderError>,
    offerings_error: Option<ProviderError>,
    latency: Duration,
    purchase_latency: Duration,
    calls: CallCounts,
}

pub struct InMemoryProvider {
    entitlement_id: String,
    inner: Mutex<Inner>,
}

impl InMemoryProvider {
    /// Create an uninitialized provider that grants `entitlement_id`.
    pub fn new(entitlement_id: &str, offerings: Offerings) -> Self {
        Self {
            entitlement_id: entitlement_id.to_string(),
            inner: Mutex::new(Inner {
                initialized: false,
                platform_key: None,
                offerings,
                customer: CustomerInfo::default(),
                next_purchase: ScriptedPurchase::default(),
                status_error: None,
                offerings_error: None,
                latency: Duration::ZERO,
                purchase_latency: Duration::ZERO,
                calls: CallCounts::default(),
            }),
        }
    }

    /// Skip the initialize step.
    pub fn initialized(self) -> Self {
        self.inner.lock().initialized = true;
        self
    }

    /// Seed the user as already holding the entitlement.
    pub fn entitled(self) -> Self {
        let info = EntitlementInfo::active(&self.entitlement_id, None);
        {
            let mut inner = self.inner.lock();
            inner.customer = std::mem::take(&mut inner.customer).with_entitlement(info);
        }
        self
    }

    pub fn with_customer(self, customer: CustomerInfo) -> Self {
        self.inner.lock().customer = customer;
        self
    }

    /// Delay every response by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.inner.lock().latency = latency;
        self
    }

    /// Extra delay on purchase calls only, like a store sheet awaiting the user.
    pub fn with_purchase_latency(self, latency: Duration) -> Self {
        self.inner.lock().purchase_latency = latency;
        self
    }

    pub fn set_next_purchase(&self, script: ScriptedPurchase) {
        self.inner.lock().next_purchase = script;
    }

    /// Make entitlement queries fail with `error` until cleared with `None`.
    pub fn fail_status_with(&self, error: Option<ProviderError>) {
        self.inner.lock().status_error = error;
    }

    /// Make catalog queries fail with `error` until cleared with `None`.
    pub fn fail_offerings_with(&self, error: Option<ProviderError>) {
        self.inner.lock().offerings_error = error;
    }

    pub fn calls(&self) -> CallCounts {
        self.inner.lock().calls
    }

    pub fn customer(&self) -> CustomerInfo {
        self.inner.lock().customer.clone()
    }

    pub fn platform_key(&self) -> Option<String> {
        self.inner.lock().platform_key.clone()
    }

    async fn settle(&self) {
        let latency = self.inner.lock().latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl EntitlementProvider for InMemoryProvider {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn initialize(&self, platform_key: &str) -> Result<(), ProviderError> {
        self.inner.lock().calls.initialize += 1;
        self.settle().await;

        if platform_key.trim().is_empty() {
            return Err(ProviderError::Fault("empty platform key".to_string()));
        }
        let mut inner = self.inner.lock();
        inner.initialized = true;
        inner.platform_key = Some(platform_key.to_string());
        Ok(())
    }

    async fn entitlement_status(
        &self,
        _entitlement_id: &str,
    ) -> Result<CustomerInfo, ProviderError> {
        self.inner.lock().calls.entitlement_status += 1;
        self.settle().await;

        let inner = self.inner.lock();
        if !inner.initialized {
            return Err(ProviderError::NotInitialized);
        }
        if let Some(err) = &inner.status_error {
            return Err(err.clone());
        }
        Ok(inner.customer.clone())
    }

    async fn current_offerings(&self) -> Result<Offerings, ProviderError> {
        self.inner.lock().calls.current_offerings += 1;
        self.settle().await;

        let inner = self.inner.lock();
        if !inner.initialized {
            return Err(ProviderError::NotInitialized);
        }
        if let Some(err) = &inner.offerings_error {
            return Err(err.clone());
        }
        Ok(inner.offerings.clone())
    }

    async fn purchase(&self, offer: &PurchaseOffer) -> Result<CustomerInfo, PurchaseError> {
        let purchase_latency = {
            let mut inner = self.inner.lock();
            inner.calls.purchase += 1;
            inner.purchase_latency
        };
        self.settle().await;
        if !purchase_latency.is_zero() {
            tokio::time::sleep(purchase_latency).await;
        }

        let mut inner = self.inner.lock();
        if !inner.initialized {
            return Err(ProviderError::NotInitialized.into());
        }
        if inner.offerings.find_package(&offer.identifier).is_none() {
            return Err(ProviderError::Fault(format!(
                "unknown package '{}'",
                offer.identifier
            ))
            .into());
        }

        match inner.next_purchase.clone() {
            ScriptedPurchase::Grant => {
                let info =
                    EntitlementInfo::active(&self.entitlement_id, Some(&offer.identifier));
                inner.customer = std::mem::take(&mut inner.customer).with_entitlement(info);
                Ok(inner.customer.clone())
            }
            ScriptedPurchase::GrantWithoutEntitlement => Ok(inner.customer.clone()),
            ScriptedPurchase::Cancel => Err(PurchaseError::Cancelled),
            ScriptedPurchase::Fail(err) => Err(err.into()),
        }
    }
}
