use chrono::{DateTime, Utc};

use super::iap_product_id::ItemType;

/// A purchase record as handed over by the billing library. Read-only once
/// received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub(crate) item_type: ItemType,
    pub(crate) order_id: String,
    pub(crate) package_name: String,
    pub(crate) sku: String,
    pub(crate) purchase_time: DateTime<Utc>,
    pub(crate) purchase_state: PurchaseState,
    pub(crate) developer_payload: String,
    pub(crate) token: String,
    pub(crate) is_auto_renewing: bool,
    pub(crate) original_json: String,
    pub(crate) signature: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    Purchased,
    Canceled,
    Refunded,
}

impl Purchase {
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// May be empty for test purchases.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn purchase_time(&self) -> DateTime<Utc> {
        self.purchase_time
    }

    pub fn purchase_state(&self) -> PurchaseState {
        self.purchase_state
    }

    /// The string attached when the purchase flow was launched, echoed back
    /// by the store.
    pub fn developer_payload(&self) -> &str {
        &self.developer_payload
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_auto_renewing(&self) -> bool {
        self.is_auto_renewing
    }

    pub fn original_json(&self) -> &str {
        &self.original_json
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}
