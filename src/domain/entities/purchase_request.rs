use super::iap_product_id::{IapSubscriptionId, ItemType};

/// Everything the billing library needs to start a purchase flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub sku: IapSubscriptionId,
    pub item_type: ItemType,
    /// Identifies the flow's result when it is forwarded back as an
    /// activity result.
    pub request_code: i32,
    pub developer_payload: String,
}
