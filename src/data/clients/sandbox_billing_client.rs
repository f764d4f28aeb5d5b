use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::debug;

use crate::domain::{
    entities::{
        activity_result::{
            ActivityResult, INAPP_DATA_SIGNATURE, INAPP_PURCHASE_DATA, RESPONSE_CODE,
            RESULT_CANCELED, RESULT_OK,
        },
        billing_result::{BillingResponse, BillingResult},
        iap_inventory::Inventory,
        iap_product_id::ItemType,
        iap_purchase::Purchase,
        purchase_request::PurchaseRequest,
    },
    repositories::billing_client::BillingClient,
};

type PurchaseOutcome = (BillingResult, Option<Purchase>);

/// In-process stand-in for the platform billing library, with scripted
/// responses. Purchase flows stay open until a matching activity result is
/// forwarded, the same way the store UI reports back.
pub struct SandboxBillingClient {
    setup_result: BillingResult,
    inventory_result: BillingResult,
    inventory: Inventory,
    subscriptions_supported: bool,
    state: Mutex<SandboxState>,
}

#[derive(Default)]
struct SandboxState {
    debug_logging: bool,
    setup_done: bool,
    disposed: bool,
    pending: Option<PendingPurchase>,
    launched: Vec<PurchaseRequest>,
    inventory_queries: usize,
}

struct PendingPurchase {
    request: PurchaseRequest,
    completion: oneshot::Sender<PurchaseOutcome>,
}

impl Default for SandboxBillingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxBillingClient {
    pub fn new() -> Self {
        Self {
            setup_result: BillingResult::ok("Setup successful."),
            inventory_result: BillingResult::ok("Inventory refresh successful."),
            inventory: Inventory::new(),
            subscriptions_supported: true,
            state: Mutex::new(SandboxState::default()),
        }
    }

    pub fn with_setup_result(mut self, result: BillingResult) -> Self {
        self.setup_result = result;
        self
    }

    pub fn with_inventory_result(mut self, result: BillingResult) -> Self {
        self.inventory_result = result;
        self
    }

    pub fn with_owned_purchase(mut self, purchase: Purchase) -> Self {
        self.inventory.add_purchase(purchase);
        self
    }

    pub fn with_subscriptions_supported(mut self, supported: bool) -> Self {
        self.subscriptions_supported = supported;
        self
    }

    /// Every purchase flow requested so far, including rejected ones.
    pub fn launched_requests(&self) -> Vec<PurchaseRequest> {
        self.state().launched.clone()
    }

    pub fn inventory_query_count(&self) -> usize {
        self.state().inventory_queries
    }

    pub fn is_set_up(&self) -> bool {
        self.state().setup_done
    }

    pub fn has_pending_purchase(&self) -> bool {
        self.state().pending.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.state().disposed
    }

    pub fn is_debug_logging_enabled(&self) -> bool {
        self.state().debug_logging
    }

    fn state(&self) -> MutexGuard<'_, SandboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn log(&self, message: &str) {
        if self.state().debug_logging {
            debug!(target: "sandbox_billing", "{message}");
        }
    }

    fn complete_purchase(request: &PurchaseRequest, result: &ActivityResult) -> PurchaseOutcome {
        if result.result_code == RESULT_CANCELED {
            return (
                BillingResult::new(BillingResponse::UserCancelled, "User canceled."),
                None,
            );
        }
        let Some(data) = &result.data else {
            return (
                BillingResult::new(BillingResponse::BadResponse, "Null data in IAB result"),
                None,
            );
        };
        let response = match data.extra(RESPONSE_CODE).map(str::parse::<i32>) {
            None => BillingResponse::Ok,
            Some(Ok(code)) => BillingResponse::from_code(code),
            Some(Err(_)) => {
                return (
                    BillingResult::new(BillingResponse::BadResponse, "Unexpected response code"),
                    None,
                )
            }
        };

        if result.result_code != RESULT_OK {
            return (
                BillingResult::new(
                    BillingResponse::UnknownPurchaseResponse,
                    "Unknown purchase response.",
                ),
                None,
            );
        }
        if response != BillingResponse::Ok {
            return (
                BillingResult::new(response, "Problem purchasing item."),
                None,
            );
        }

        let Some(purchase_data) = data.extra(INAPP_PURCHASE_DATA) else {
            return (
                BillingResult::new(BillingResponse::BadResponse, "IAB returned null purchase data"),
                None,
            );
        };
        let signature = data.extra(INAPP_DATA_SIGNATURE).unwrap_or_default();
        match Purchase::from_original_json(request.item_type, purchase_data, signature) {
            Ok(purchase) => (BillingResult::ok("Success"), Some(purchase)),
            Err(e) => (
                BillingResult::new(
                    BillingResponse::BadResponse,
                    format!("Failed to parse purchase data: {e}"),
                ),
                None,
            ),
        }
    }
}

#[async_trait]
impl BillingClient for SandboxBillingClient {
    fn enable_debug_logging(&self, enable: bool) {
        self.state().debug_logging = enable;
    }

    async fn start_setup(&self, _public_key: &str) -> BillingResult {
        self.log("starting setup");
        let mut state = self.state();
        if state.disposed {
            return BillingResult::new(BillingResponse::RemoteException, "Billing client disposed.");
        }
        state.setup_done = self.setup_result.is_success();
        self.setup_result.clone()
    }

    async fn query_inventory(&self) -> (BillingResult, Inventory) {
        self.log("querying inventory");
        let setup_done = {
            let mut state = self.state();
            state.inventory_queries += 1;
            state.setup_done
        };
        if !setup_done {
            return (
                BillingResult::new(BillingResponse::UnknownError, "Billing not set up."),
                Inventory::new(),
            );
        }
        if self.inventory_result.is_failure() {
            return (self.inventory_result.clone(), Inventory::new());
        }
        (self.inventory_result.clone(), self.inventory.clone())
    }

    async fn launch_purchase_flow(&self, request: PurchaseRequest) -> PurchaseOutcome {
        self.log("launching purchase flow");
        let completion = {
            let mut state = self.state();
            state.launched.push(request.clone());
            if !state.setup_done {
                return (
                    BillingResult::new(BillingResponse::UnknownError, "Billing not set up."),
                    None,
                );
            }
            if request.item_type == ItemType::Subs && !self.subscriptions_supported {
                return (
                    BillingResult::new(
                        BillingResponse::SubscriptionsNotAvailable,
                        "Subscriptions are not available.",
                    ),
                    None,
                );
            }
            if state.pending.is_some() {
                return (
                    BillingResult::new(
                        BillingResponse::DeveloperError,
                        "Another purchase flow is in progress.",
                    ),
                    None,
                );
            }
            let (tx, rx) = oneshot::channel();
            state.pending = Some(PendingPurchase {
                request,
                completion: tx,
            });
            rx
        };

        completion.await.unwrap_or_else(|_| {
            (
                BillingResult::new(
                    BillingResponse::UnknownError,
                    "Purchase flow abandoned, billing client disposed.",
                ),
                None,
            )
        })
    }

    fn handle_activity_result(&self, result: &ActivityResult) -> bool {
        let pending = {
            let mut state = self.state();
            match state.pending.take() {
                Some(p) if p.request.request_code == result.request_code => p,
                other => {
                    state.pending = other;
                    return false;
                }
            }
        };
        self.log("handling purchase result");
        let outcome = Self::complete_purchase(&pending.request, result);
        // The flow may already have been dropped by its caller.
        let _ = pending.completion.send(outcome);
        true
    }

    fn subscriptions_supported(&self) -> bool {
        self.subscriptions_supported
    }

    fn dispose(&self) {
        self.log("disposing");
        let mut state = self.state();
        state.disposed = true;
        state.setup_done = false;
        state.pending = None;
    }
}
