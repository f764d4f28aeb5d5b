use std::fmt;

/// SKU of the subscription tracked by a billing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IapSubscriptionId(pub String);

impl IapSubscriptionId {
    pub fn sku(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IapSubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IapSubscriptionId {
    fn from(sku: &str) -> Self {
        Self(sku.to_string())
    }
}

/// Item type marker passed to the billing library with each purchase flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// One-time (managed) product.
    InApp,
    /// Auto-renewing subscription.
    Subs,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::InApp => "inapp",
            ItemType::Subs => "subs",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
