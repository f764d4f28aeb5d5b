use std::collections::HashMap;

use super::{iap_product_id::ItemType, iap_purchase::Purchase};

/// Purchases owned by the user, keyed by SKU, as returned from an inventory
/// query.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    purchases: HashMap<String, Purchase>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_purchase(&self, sku: &str) -> Option<&Purchase> {
        self.purchases.get(sku)
    }

    pub fn has_purchase(&self, sku: &str) -> bool {
        self.purchases.contains_key(sku)
    }

    /// Replaces any purchase already recorded for the same SKU.
    pub fn add_purchase(&mut self, purchase: Purchase) {
        self.purchases.insert(purchase.sku().to_string(), purchase);
    }

    pub fn erase_purchase(&mut self, sku: &str) -> Option<Purchase> {
        self.purchases.remove(sku)
    }

    pub fn all_owned_skus(&self) -> Vec<&str> {
        self.purchases.keys().map(String::as_str).collect()
    }

    pub fn owned_skus_of_type(&self, item_type: ItemType) -> Vec<&str> {
        self.purchases
            .values()
            .filter(|p| p.item_type() == item_type)
            .map(Purchase::sku)
            .collect()
    }

    pub fn all_purchases(&self) -> impl Iterator<Item = &Purchase> {
        self.purchases.values()
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }
}

impl FromIterator<Purchase> for Inventory {
    fn from_iter<I: IntoIterator<Item = Purchase>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for purchase in iter {
            inventory.add_purchase(purchase);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(item_type: ItemType, sku: &str) -> Purchase {
        let json = format!(
            r#"{{"packageName":"com.example","productId":"{sku}","purchaseTime":0,"purchaseState":0}}"#
        );
        Purchase::from_original_json(item_type, &json, "").unwrap()
    }

    #[test]
    fn looks_up_purchases_by_sku() {
        let inventory: Inventory = [
            purchase(ItemType::Subs, "infinite_amount"),
            purchase(ItemType::InApp, "gas"),
        ]
        .into_iter()
        .collect();

        assert!(inventory.has_purchase("gas"));
        assert_eq!(
            inventory.get_purchase("infinite_amount").map(Purchase::sku),
            Some("infinite_amount")
        );
        assert!(inventory.get_purchase("premium").is_none());
        assert_eq!(inventory.owned_skus_of_type(ItemType::Subs), vec!["infinite_amount"]);

        let mut skus = inventory.all_owned_skus();
        skus.sort();
        assert_eq!(skus, vec!["gas", "infinite_amount"]);
    }

    #[test]
    fn erase_removes_only_that_sku() {
        let mut inventory: Inventory = [
            purchase(ItemType::InApp, "gas"),
            purchase(ItemType::InApp, "premium"),
        ]
        .into_iter()
        .collect();

        assert!(inventory.erase_purchase("gas").is_some());
        assert!(inventory.erase_purchase("gas").is_none());
        assert!(!inventory.has_purchase("gas"));
        assert!(inventory.has_purchase("premium"));
        assert!(!inventory.is_empty());
    }
}
