use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use crate::{
    config::BillingConfig,
    coordinator::BillingSessionCoordinator,
    domain::{
        entities::{activity_result::ActivityResult, billing_event::BillingEvent},
        repositories::{billing_client::BillingClient, screen_host::ScreenHost},
    },
};

/// Inputs the hosting screen sends to its billing session.
#[derive(Debug, Clone)]
pub enum ScreenInput {
    /// The subscribe button was pressed.
    SubscribeClicked,
    /// Every activity result the screen receives is forwarded here.
    ActivityResult(ActivityResult),
    /// The screen is going away.
    Destroyed,
}

/// A coordinator together with the channel its billing completions arrive
/// on.
pub struct BillingSession<C: BillingClient, H: ScreenHost> {
    coordinator: BillingSessionCoordinator<C, H>,
    events: UnboundedReceiver<BillingEvent>,
}

impl<C: BillingClient, H: ScreenHost> BillingSession<C, H> {
    pub fn new(config: BillingConfig, client: Arc<C>, host: H) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            coordinator: BillingSessionCoordinator::new(config, client, host, tx),
            events: rx,
        }
    }

    pub fn coordinator(&self) -> &BillingSessionCoordinator<C, H> {
        &self.coordinator
    }

    /// Initializes billing, then handles billing completions and screen
    /// inputs one at a time until the screen is destroyed or its input
    /// channel closes. Returns the torn-down coordinator.
    pub async fn run(
        self,
        mut inputs: mpsc::Receiver<ScreenInput>,
    ) -> BillingSessionCoordinator<C, H> {
        let Self {
            mut coordinator,
            mut events,
        } = self;
        coordinator.initialize();

        loop {
            tokio::select! {
                // Completions first, so later inputs observe their effects.
                biased;
                Some(event) = events.recv() => coordinator.handle_event(event),
                input = inputs.recv() => match input {
                    Some(ScreenInput::SubscribeClicked) => coordinator.request_subscription(),
                    Some(ScreenInput::ActivityResult(result)) => {
                        coordinator.forward_activity_result(result);
                    }
                    Some(ScreenInput::Destroyed) | None => {
                        debug!("screen destroyed, tearing down billing session");
                        coordinator.teardown();
                        break;
                    }
                },
            }
        }
        coordinator
    }
}
