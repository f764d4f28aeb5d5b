use async_trait::async_trait;

use crate::domain::entities::{
    activity_result::ActivityResult, billing_result::BillingResult, iap_inventory::Inventory,
    iap_purchase::Purchase, purchase_request::PurchaseRequest,
};

/// The platform billing library. Requests may take arbitrarily long; the
/// session runs them in the background and feeds their completions back as
/// events.
#[async_trait]
pub trait BillingClient: Send + Sync + 'static {
    /// Toggles the library's own verbose logging.
    fn enable_debug_logging(&self, enable: bool);

    /// Connects to the billing service. `public_key` is the app's
    /// base64-encoded store key, used by the library to verify purchase
    /// signatures.
    async fn start_setup(&self, public_key: &str) -> BillingResult;

    /// Fetches the purchases the user currently owns.
    async fn query_inventory(&self) -> (BillingResult, Inventory);

    /// Starts the store's purchase UI. Resolves once the flow's result has
    /// been passed to [`BillingClient::handle_activity_result`].
    async fn launch_purchase_flow(&self, request: PurchaseRequest)
        -> (BillingResult, Option<Purchase>);

    /// Returns `true` if the result belonged to a purchase flow started by
    /// this library.
    fn handle_activity_result(&self, result: &ActivityResult) -> bool;

    fn subscriptions_supported(&self) -> bool;

    /// Releases the connection to the billing service.
    fn dispose(&self);
}
