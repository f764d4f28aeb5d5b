use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_repr::Deserialize_repr;

use crate::domain::entities::{
    iap_product_id::ItemType,
    iap_purchase::{Purchase, PurchaseState},
};

/// Purchase data JSON returned by the on-device billing service, for example
/// in the `INAPP_PURCHASE_DATA` extra of a purchase result:
///
/// ```json
/// {
///   "packageName": "com.example.app",
///   "productId": "infinite_amount",
///   "purchaseTime": 1442891989248,
///   "purchaseState": 0,
///   "developerPayload": "...",
///   "purchaseToken": "...",
///   "autoRenewing": true
/// }
/// ```
///
/// Test purchases omit `orderId`, and older service versions send `token`
/// instead of `purchaseToken`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PurchaseDataModel {
    #[serde(default)]
    pub(crate) order_id: Option<String>,
    pub(crate) package_name: String,
    pub(crate) product_id: String,
    #[serde(with = "ts_milliseconds")]
    pub(crate) purchase_time: DateTime<Utc>,
    pub(crate) purchase_state: PurchaseStateModel,
    #[serde(default)]
    pub(crate) developer_payload: Option<String>,
    #[serde(default)]
    pub(crate) purchase_token: Option<String>,
    #[serde(default)]
    pub(crate) token: Option<String>,
    #[serde(default)]
    pub(crate) auto_renewing: bool,
}

#[derive(Debug, Deserialize_repr, PartialEq)]
#[repr(u8)]
pub(crate) enum PurchaseStateModel {
    Purchased = 0,
    Canceled = 1,
    Refunded = 2,
}

impl From<PurchaseStateModel> for PurchaseState {
    fn from(m: PurchaseStateModel) -> Self {
        match m {
            PurchaseStateModel::Purchased => PurchaseState::Purchased,
            PurchaseStateModel::Canceled => PurchaseState::Canceled,
            PurchaseStateModel::Refunded => PurchaseState::Refunded,
        }
    }
}

impl Purchase {
    /// Parses the purchase data JSON as delivered by the billing service,
    /// keeping the raw JSON and its signature alongside.
    pub fn from_original_json(
        item_type: ItemType,
        json: &str,
        signature: &str,
    ) -> Result<Self, serde_json::Error> {
        let m: PurchaseDataModel = serde_json::from_str(json)?;
        Ok(Purchase {
            item_type,
            order_id: m.order_id.unwrap_or_default(),
            package_name: m.package_name,
            sku: m.product_id,
            purchase_time: m.purchase_time,
            purchase_state: m.purchase_state.into(),
            developer_payload: m.developer_payload.unwrap_or_default(),
            token: m.purchase_token.or(m.token).unwrap_or_default(),
            is_auto_renewing: m.auto_renewing,
            original_json: json.to_string(),
            signature: signature.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SAMPLE: &str = r#"{
        "packageName": "com.asiantech.inapppurchase",
        "productId": "infinite_amount",
        "purchaseTime": 1442891989248,
        "purchaseState": 0,
        "developerPayload": "0923{=***000_3920}[]_0",
        "purchaseToken": "ihkancifbbfjfdgemleiedfm.AO-J1Oy1v1atf3zvE",
        "autoRenewing": true
    }"#;

    #[test]
    fn parses_subscription_purchase_data() {
        let purchase = Purchase::from_original_json(ItemType::Subs, SAMPLE, "sig").unwrap();
        assert_eq!(purchase.sku(), "infinite_amount");
        assert_eq!(purchase.package_name(), "com.asiantech.inapppurchase");
        assert_eq!(purchase.order_id(), "");
        assert_eq!(purchase.developer_payload(), "0923{=***000_3920}[]_0");
        assert_eq!(purchase.token(), "ihkancifbbfjfdgemleiedfm.AO-J1Oy1v1atf3zvE");
        assert_eq!(purchase.purchase_state(), PurchaseState::Purchased);
        assert_eq!(
            purchase.purchase_time(),
            Utc.timestamp_millis_opt(1442891989248).unwrap()
        );
        assert!(purchase.is_auto_renewing());
        assert_eq!(purchase.item_type(), ItemType::Subs);
        assert_eq!(purchase.original_json(), SAMPLE);
        assert_eq!(purchase.signature(), "sig");
    }

    #[test]
    fn falls_back_to_legacy_token_and_empty_payload() {
        let json = r#"{
            "orderId": "GPA.1234-5678",
            "packageName": "com.example",
            "productId": "gas",
            "purchaseTime": 0,
            "purchaseState": 2,
            "token": "legacy-token"
        }"#;
        let purchase = Purchase::from_original_json(ItemType::InApp, json, "").unwrap();
        assert_eq!(purchase.order_id(), "GPA.1234-5678");
        assert_eq!(purchase.token(), "legacy-token");
        assert_eq!(purchase.developer_payload(), "");
        assert_eq!(purchase.purchase_state(), PurchaseState::Refunded);
        assert!(!purchase.is_auto_renewing());
    }

    #[test]
    fn rejects_unknown_purchase_state() {
        let json = r#"{
            "packageName": "com.example",
            "productId": "gas",
            "purchaseTime": 0,
            "purchaseState": 9
        }"#;
        assert!(Purchase::from_original_json(ItemType::InApp, json, "").is_err());
    }
}
