use base64::{prelude::BASE64_STANDARD, Engine as _};
use once_cell::sync::Lazy;

use crate::{domain::entities::iap_product_id::IapSubscriptionId, errors::ConfigError};

pub const PUBLIC_KEY_VAR: &str = "IAP_PUBLIC_KEY";
pub const DEVELOPER_PAYLOAD_VAR: &str = "IAP_DEVELOPER_PAYLOAD";
pub const SUBSCRIPTION_SKU_VAR: &str = "IAP_SUBSCRIPTION_SKU";
pub const REQUEST_CODE_VAR: &str = "IAP_REQUEST_CODE";
pub const DEBUG_LOGGING_VAR: &str = "IAP_DEBUG_LOGGING";

pub const DEFAULT_SUBSCRIPTION_SKU: &str = "infinite_amount";
/// Arbitrary, only needs to be unique among the screen's activity requests.
pub const DEFAULT_REQUEST_CODE: i32 = 10001;

/// When set to a truthy value, enables the billing library's verbose
/// logging. Defaults to `false`.
pub static DEBUG_LOGGING: Lazy<bool> = Lazy::new(|| {
    std::env::var(DEBUG_LOGGING_VAR)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
});

/// Static inputs of a billing session.
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// The app-specific base64-encoded public key from the store console.
    pub public_key: String,
    /// Attached to every purchase and expected back verbatim.
    pub developer_payload: String,
    pub subscription_sku: IapSubscriptionId,
    pub request_code: i32,
    pub debug_logging: bool,
}

impl BillingConfig {
    pub fn new(public_key: impl Into<String>, developer_payload: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            developer_payload: developer_payload.into(),
            subscription_sku: IapSubscriptionId(DEFAULT_SUBSCRIPTION_SKU.to_string()),
            request_code: DEFAULT_REQUEST_CODE,
            debug_logging: false,
        }
    }

    pub fn with_subscription_sku(mut self, sku: impl Into<String>) -> Self {
        self.subscription_sku = IapSubscriptionId(sku.into());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), *DEBUG_LOGGING)
    }

    pub(crate) fn from_lookup<F>(lookup: F, debug_logging: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_key = lookup(PUBLIC_KEY_VAR)
            .map(|value| value.trim().to_string())
            .ok_or(ConfigError::Missing(PUBLIC_KEY_VAR))?;
        if public_key.is_empty() {
            return Err(ConfigError::Empty(PUBLIC_KEY_VAR));
        }
        BASE64_STANDARD
            .decode(&public_key)
            .map_err(|source| ConfigError::InvalidBase64 {
                name: PUBLIC_KEY_VAR,
                source,
            })?;

        // An empty payload is allowed; it is still compared verbatim.
        let developer_payload =
            lookup(DEVELOPER_PAYLOAD_VAR).ok_or(ConfigError::Missing(DEVELOPER_PAYLOAD_VAR))?;

        let subscription_sku = lookup(SUBSCRIPTION_SKU_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBSCRIPTION_SKU.to_string());

        let request_code = match lookup(REQUEST_CODE_VAR) {
            Some(value) => value
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidInteger {
                    name: REQUEST_CODE_VAR,
                    value,
                })?,
            None => DEFAULT_REQUEST_CODE,
        };

        Ok(Self {
            public_key,
            developer_payload,
            subscription_sku: IapSubscriptionId(subscription_sku),
            request_code,
            debug_logging,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let vars = HashMap::from([
            (PUBLIC_KEY_VAR, "TUlJQklqQU5CZ2txaGtpRzl3MEJBUUVGQUFPQw=="),
            (DEVELOPER_PAYLOAD_VAR, "abc123"),
        ]);
        let config = BillingConfig::from_lookup(lookup(&vars), true).unwrap();
        assert_eq!(config.developer_payload, "abc123");
        assert_eq!(config.subscription_sku.sku(), DEFAULT_SUBSCRIPTION_SKU);
        assert_eq!(config.request_code, DEFAULT_REQUEST_CODE);
        assert!(config.debug_logging);
    }

    #[test]
    fn overrides_sku_and_request_code() {
        let vars = HashMap::from([
            (PUBLIC_KEY_VAR, "a2V5"),
            (DEVELOPER_PAYLOAD_VAR, ""),
            (SUBSCRIPTION_SKU_VAR, "premium_monthly"),
            (REQUEST_CODE_VAR, " 42 "),
        ]);
        let config = BillingConfig::from_lookup(lookup(&vars), false).unwrap();
        assert_eq!(config.developer_payload, "");
        assert_eq!(config.subscription_sku.sku(), "premium_monthly");
        assert_eq!(config.request_code, 42);
    }

    #[test]
    fn rejects_missing_or_malformed_key() {
        let vars = HashMap::from([(DEVELOPER_PAYLOAD_VAR, "abc123")]);
        assert!(matches!(
            BillingConfig::from_lookup(lookup(&vars), false),
            Err(ConfigError::Missing(PUBLIC_KEY_VAR))
        ));

        let vars = HashMap::from([(PUBLIC_KEY_VAR, "  "), (DEVELOPER_PAYLOAD_VAR, "abc123")]);
        assert!(matches!(
            BillingConfig::from_lookup(lookup(&vars), false),
            Err(ConfigError::Empty(PUBLIC_KEY_VAR))
        ));

        let vars = HashMap::from([
            (PUBLIC_KEY_VAR, "not base64!"),
            (DEVELOPER_PAYLOAD_VAR, "abc123"),
        ]);
        assert!(matches!(
            BillingConfig::from_lookup(lookup(&vars), false),
            Err(ConfigError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_request_code() {
        let vars = HashMap::from([
            (PUBLIC_KEY_VAR, "a2V5"),
            (DEVELOPER_PAYLOAD_VAR, "abc123"),
            (REQUEST_CODE_VAR, "ten"),
        ]);
        assert!(matches!(
            BillingConfig::from_lookup(lookup(&vars), false),
            Err(ConfigError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn truthy_values() {
        for value in ["1", "true", "YES", " on "] {
            assert!(is_truthy(value));
        }
        for value in ["", "0", "false", "off"] {
            assert!(!is_truthy(value));
        }
    }
}
