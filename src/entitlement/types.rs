//! Entitlement and catalog value types.
//!
//! `CustomerInfo` is the raw payload the provider returns for a user.
//! `EntitlementStatus` is the only thing the rest of the crate is allowed
//! to branch on, and it is always derived from a `CustomerInfo`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Entitlement identifier that unlocks the teammate lobby.
pub const DEFAULT_ENTITLEMENT_ID: &str = "pro";

/// Lifecycle of a single entitlement as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementState {
    Active,
    Expired,
    Pending,
}

/// One entitlement entry in a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementInfo {
    pub identifier: String,
    pub state: EntitlementState,
    /// Store product that granted the entitlement, if any.
    #[serde(default)]
    pub product_identifier: Option<String>,
}

impl EntitlementInfo {
    pub fn active(identifier: &str, product_identifier: Option<&str>) -> Self {
        Self {
            identifier: identifier.to_string(),
            state: EntitlementState::Active,
            product_identifier: product_identifier.map(str::to_string),
        }
    }
}

/// Raw entitlement response for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub entitlements: BTreeMap<String, EntitlementInfo>,
}

impl CustomerInfo {
    /// Parse a provider JSON payload.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_entitlement(mut self, info: EntitlementInfo) -> Self {
        self.entitlements.insert(info.identifier.clone(), info);
        self
    }

    /// True iff `entitlement_id` is present and currently active.
    pub fn is_entitlement_active(&self, entitlement_id: &str) -> bool {
        self.entitlements
            .get(entitlement_id)
            .is_some_and(|info| info.state == EntitlementState::Active)
    }
}

/// Whether the user currently holds the gating entitlement.
///
/// Only built from a provider response or as the fail-closed default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitlementStatus {
    is_active: bool,
}

impl EntitlementStatus {
    /// Interpret a provider response.
    pub fn from_customer_info(info: &CustomerInfo, entitlement_id: &str) -> Self {
        Self {
            is_active: info.is_entitlement_active(entitlement_id),
        }
    }

    /// The fail-closed status used whenever no proof of entitlement exists.
    pub fn inactive() -> Self {
        Self { is_active: false }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Default for EntitlementStatus {
    fn default() -> Self {
        Self::inactive()
    }
}

/// Billing period of a purchasable plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => write!(f, "monthly"),
            BillingPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

/// A purchasable package from the provider's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOffer {
    pub identifier: String,
    /// Localized display price, e.g. "$19.99/mo".
    pub price: String,
    pub period: BillingPeriod,
}

impl PurchaseOffer {
    pub fn new(identifier: &str, price: &str, period: BillingPeriod) -> Self {
        Self {
            identifier: identifier.to_string(),
            price: price.to_string(),
            period,
        }
    }
}

/// A named bundle of packages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub identifier: String,
    #[serde(default)]
    pub packages: Vec<PurchaseOffer>,
}

/// The provider's offering catalog. `current` may be absent when the
/// provider has no offering configured for this user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offerings {
    #[serde(default)]
    pub current: Option<Offering>,
}

impl Offerings {
    pub fn with_current(offering: Offering) -> Self {
        Self {
            current: Some(offering),
        }
    }

    /// Look up a package in the current offering by identifier.
    pub fn find_package(&self, identifier: &str) -> Option<&PurchaseOffer> {
        self.current
            .as_ref()?
            .packages
            .iter()
            .find(|p| p.identifier == identifier)
    }
}
