use super::{billing_result::BillingResult, iap_inventory::Inventory, iap_purchase::Purchase};

/// Completion of an asynchronous billing request, delivered back to the task
/// that owns the session.
#[derive(Debug, Clone)]
pub enum BillingEvent {
    SetupFinished(BillingResult),
    InventoryQueried(BillingResult, Inventory),
    PurchaseFinished(BillingResult, Option<Purchase>),
}
