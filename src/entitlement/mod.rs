//! Entitlement data model and the entitlement checker.

mod checker;
mod types;

pub use checker::EntitlementChecker;
pub use types::{
    BillingPeriod, CustomerInfo, EntitlementInfo, EntitlementState, EntitlementStatus, Offering,
    Offerings, PurchaseOffer, DEFAULT_ENTITLEMENT_ID,
};
