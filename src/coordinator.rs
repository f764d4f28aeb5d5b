use std::{future::Future, sync::Arc};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::{
    config::BillingConfig,
    domain::{
        entities::{
            activity_result::ActivityResult,
            billing_event::BillingEvent,
            billing_result::BillingResult,
            iap_inventory::Inventory,
            iap_product_id::ItemType,
            iap_purchase::Purchase,
            purchase_request::PurchaseRequest,
            user_message::UserMessage,
        },
        repositories::{billing_client::BillingClient, screen_host::ScreenHost},
    },
    errors::BillingError,
};

enum Lifecycle<C> {
    Active(Arc<C>),
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupState {
    Pending,
    Ready,
    Failed,
}

/// Mediates between one screen and the billing library, and tracks whether
/// the user owns the configured subscription.
///
/// Requests to the library run as spawned tasks; their completions come back
/// through the event channel and must be passed to
/// [`BillingSessionCoordinator::handle_event`] by the task owning the
/// coordinator. Methods that issue requests must be called from within a
/// tokio runtime.
pub struct BillingSessionCoordinator<C: BillingClient, H: ScreenHost> {
    config: BillingConfig,
    lifecycle: Lifecycle<C>,
    host: H,
    events: UnboundedSender<BillingEvent>,
    setup: SetupState,
    purchase_in_flight: bool,
    subscribed: bool,
}

impl<C: BillingClient, H: ScreenHost> BillingSessionCoordinator<C, H> {
    pub fn new(
        config: BillingConfig,
        client: Arc<C>,
        host: H,
        events: UnboundedSender<BillingEvent>,
    ) -> Self {
        client.enable_debug_logging(config.debug_logging);
        Self {
            config,
            lifecycle: Lifecycle::Active(client),
            host,
            events,
            setup: SetupState::Pending,
            purchase_in_flight: false,
            subscribed: false,
        }
    }

    /// Whether the tracked subscription is owned and its payload verified.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Disposed)
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Starts connecting to the billing service. Once setup succeeds, owned
    /// purchases are queried.
    pub fn initialize(&mut self) {
        let Some(client) = self.client() else {
            debug!("initialize ignored, billing session disposed");
            return;
        };
        debug!("starting in-app billing setup");
        let public_key = self.config.public_key.clone();
        self.dispatch(async move {
            BillingEvent::SetupFinished(client.start_setup(&public_key).await)
        });
    }

    pub fn handle_event(&mut self, event: BillingEvent) {
        match event {
            BillingEvent::SetupFinished(result) => self.on_setup_finished(result),
            BillingEvent::InventoryQueried(result, inventory) => {
                self.on_inventory_queried(result, inventory)
            }
            BillingEvent::PurchaseFinished(result, purchase) => {
                self.on_purchase_finished(result, purchase)
            }
        }
    }

    /// Starts the purchase flow for the tracked subscription. The outcome
    /// arrives later as a [`BillingEvent::PurchaseFinished`].
    pub fn request_subscription(&mut self) {
        let Some(client) = self.client() else {
            debug!("purchase request ignored, billing session disposed");
            return;
        };
        if let Err(e) = self.check_can_purchase(&client) {
            self.report(e);
            return;
        }

        let request = PurchaseRequest {
            sku: self.config.subscription_sku.clone(),
            item_type: ItemType::Subs,
            request_code: self.config.request_code,
            developer_payload: self.config.developer_payload.clone(),
        };
        info!(
            sku = %request.sku,
            request_code = request.request_code,
            "launching purchase flow for subscription"
        );
        self.purchase_in_flight = true;
        self.dispatch(async move {
            let (result, purchase) = client.launch_purchase_flow(request).await;
            BillingEvent::PurchaseFinished(result, purchase)
        });
    }

    /// Passes an activity result on to the billing library, falling back to
    /// the host for results the library does not own. Returns whether the
    /// library handled it.
    pub fn forward_activity_result(&mut self, result: ActivityResult) -> bool {
        debug!(
            request_code = result.request_code,
            result_code = result.result_code,
            "activity result received"
        );
        let Some(client) = self.client() else {
            return false;
        };
        if client.handle_activity_result(&result) {
            debug!("activity result handled by billing library");
            true
        } else {
            self.host.on_unhandled_activity_result(&result);
            false
        }
    }

    /// Checks the purchase's developer payload against the configured one.
    ///
    /// A static payload cannot stop a purchase being replayed to another
    /// user or device. Deployments with a server should generate and check
    /// payloads there instead.
    pub fn verify_developer_payload(&self, purchase: &Purchase) -> bool {
        purchase.developer_payload() == self.config.developer_payload
    }

    /// Releases the billing library. Completions that arrive afterwards are
    /// ignored.
    pub fn teardown(&mut self) {
        let lifecycle = std::mem::replace(&mut self.lifecycle, Lifecycle::Disposed);
        if let Lifecycle::Active(client) = lifecycle {
            client.dispose();
            info!("billing session disposed");
        }
    }

    fn on_setup_finished(&mut self, result: BillingResult) {
        let Some(client) = self.client() else {
            debug!("setup finished after dispose, ignoring");
            return;
        };
        if result.is_failure() {
            self.setup = SetupState::Failed;
            self.report(BillingError::SetupFailed(result));
            return;
        }

        info!("in-app billing setup successful, querying inventory");
        self.setup = SetupState::Ready;
        self.dispatch(async move {
            let (result, inventory) = client.query_inventory().await;
            BillingEvent::InventoryQueried(result, inventory)
        });
    }

    fn on_inventory_queried(&mut self, result: BillingResult, inventory: Inventory) {
        if self.is_disposed() {
            debug!("inventory query finished after dispose, ignoring");
            return;
        }
        if result.is_failure() {
            self.report(BillingError::InventoryQueryFailed(result));
            return;
        }

        let sku = self.config.subscription_sku.sku();
        let owned = inventory
            .get_purchase(sku)
            .is_some_and(|p| self.is_tracked_and_verified(p));
        if owned {
            self.subscribed = true;
        }
        info!(
            sku,
            has_subscription = self.subscribed,
            "inventory query finished"
        );
    }

    fn on_purchase_finished(&mut self, result: BillingResult, purchase: Option<Purchase>) {
        if self.is_disposed() {
            debug!("purchase finished after dispose, ignoring");
            return;
        }
        self.purchase_in_flight = false;
        debug!(%result, "purchase finished");

        let purchase = match self.accept_purchase(result, purchase) {
            Ok(purchase) => purchase,
            Err(e) => {
                self.report(e);
                return;
            }
        };
        if purchase.sku() != self.config.subscription_sku.sku() {
            debug!(sku = purchase.sku(), "purchase is not for the tracked subscription");
            return;
        }

        info!(
            sku = purchase.sku(),
            order_id = purchase.order_id(),
            package_name = purchase.package_name(),
            purchase_time = %purchase.purchase_time(),
            purchase_state = ?purchase.purchase_state(),
            auto_renewing = purchase.is_auto_renewing(),
            "subscription purchased"
        );
        self.subscribed = true;
        self.host.show_message(&UserMessage::info("Thank you for subscribing!"));
    }

    fn accept_purchase(
        &self,
        result: BillingResult,
        purchase: Option<Purchase>,
    ) -> Result<Purchase, BillingError> {
        if result.is_failure() {
            return Err(BillingError::PurchaseFailed(result));
        }
        let purchase = purchase.ok_or(BillingError::PurchaseMissing)?;
        if !self.verify_developer_payload(&purchase) {
            return Err(BillingError::PayloadVerificationFailed);
        }
        Ok(purchase)
    }

    fn check_can_purchase(&self, client: &C) -> Result<(), BillingError> {
        if self.setup != SetupState::Ready {
            return Err(BillingError::NotReady);
        }
        if self.purchase_in_flight {
            return Err(BillingError::PurchaseInProgress);
        }
        if !client.subscriptions_supported() {
            return Err(BillingError::SubscriptionsUnsupported);
        }
        Ok(())
    }

    fn is_tracked_and_verified(&self, purchase: &Purchase) -> bool {
        purchase.sku() == self.config.subscription_sku.sku()
            && self.verify_developer_payload(purchase)
    }

    fn client(&self) -> Option<Arc<C>> {
        match &self.lifecycle {
            Lifecycle::Active(client) => Some(Arc::clone(client)),
            Lifecycle::Disposed => None,
        }
    }

    fn report(&self, error: BillingError) {
        warn!(error = %error, "billing error");
        self.host.show_message(&UserMessage::error(error.to_string()));
    }

    fn dispatch<F>(&self, request: F)
    where
        F: Future<Output = BillingEvent> + Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = request.await;
            if events.send(event).is_err() {
                debug!("billing event dropped, session no longer listening");
            }
        });
    }
}
