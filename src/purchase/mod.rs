//! Purchase flow: catalog lookup, purchase submission and reconciliation.

mod controller;
mod outcome;

pub use controller::PurchaseController;
pub use outcome::{PurchaseFailure, PurchaseOutcome};
